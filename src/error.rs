//! Error types for the reminder daemon.

/// Top-level error type for chime.
#[derive(Debug, thiserror::Error)]
pub enum ChimeError {
    /// Configuration file could not be parsed or written.
    #[error("config error: {0}")]
    Config(String),

    /// Schedule file is missing, unreadable, or lacks a required column.
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Text-to-speech program failed to run or exited unsuccessfully.
    #[error("speech error: {0}")]
    Speech(String),

    /// Console or other notification sink failed.
    #[error("notify error: {0}")]
    Notify(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ChimeError>;
