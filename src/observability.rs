//! Structured logging setup.
//!
//! Services and adapters emit `tracing` events with `board_id`, `user_id`
//! and `operation` fields; this module installs the subscriber that renders
//! them.

use std::fmt::Display;
use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs (for production).
    Json,
    /// Pretty-printed logs (for development).
    #[default]
    Pretty,
}

/// Initializes the logging subsystem.
///
/// Call once at process start. Later calls are no-ops. `RUST_LOG` controls
/// levels and defaults to `info`.
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
        }
    });
}

/// Creates a span for one request against a board.
///
/// Events emitted while the span is active inherit its `operation`,
/// `board_id` and `user_id` fields.
#[must_use]
pub fn board_span(operation: &str, board_id: impl Display, user_id: impl Display) -> Span {
    tracing::info_span!(
        "board",
        operation,
        board_id = %board_id,
        user_id = %user_id
    )
}
