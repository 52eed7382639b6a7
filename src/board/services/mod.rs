//! Application services for board mutation and retrieval.

mod mutation;

pub use mutation::{BoardService, BoardServiceError, BoardServiceResult, MoveTaskRequest};
