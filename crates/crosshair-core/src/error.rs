// File: crates/crosshair-core/src/error.rs
// Summary: Error type shared by configuration, attach and lifecycle paths.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrosshairError {
    /// Wrapper selector must be `#id` or `.class`.
    #[error("wrapper selector must be a class or id, got {0:?}")]
    InvalidSelector(String),

    #[error("invalid style value {value:?}: {reason}")]
    InvalidStyle { value: String, reason: &'static str },

    #[error("invalid crosshair options: {0}")]
    Config(#[from] serde_json::Error),

    #[error("crosshair overlay already created")]
    AlreadyCreated,

    #[error("initial point {initial} out of range ({len} points rendered)")]
    InitialPointOutOfRange { initial: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CrosshairError>;
