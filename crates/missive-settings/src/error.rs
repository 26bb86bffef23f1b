use thiserror::Error;

/// Errors produced by the settings layer.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error reading or writing the settings file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The blob on disk (or the value being saved) is not valid JSON for
    /// the settings shape.
    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A theme field failed validation (malformed colour, etc).
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SettingsError>;
