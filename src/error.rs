//! Error types shared by the namespace, host, and event parsing layers.
//!
//! The click counter itself is total: none of its operations can fail. Errors
//! only arise around it, when the host resolves globals, parses event names,
//! or talks to a dispatch queue that has already shut down.

/// Errors produced by the analytics host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("global `{0}` is already defined")]
    GlobalAlreadyDefined(String),

    #[error("global `{0}` is not defined")]
    GlobalNotFound(String),

    #[error("`{0}` is not a valid global name")]
    InvalidGlobalName(String),

    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("event queue is closed")]
    QueueClosed,
}

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, AppError>;
