//! Unit tests for the board module.
//!
//! Tests are organised by aggregate operation, covering happy paths, error
//! cases, and the boundaries of task moves.

mod task_tests;
