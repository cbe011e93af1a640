//! Error types for theme-core

/// Result type for theme-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur before or around a sync.
///
/// Failures writing or deleting individual generated files are not errors:
/// they are recorded as `Error: ...` messages in the [`crate::SyncReport`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown action name
    #[error("Invalid sync action: {0}")]
    InvalidAction(String),

    /// The payload parsed but is missing required members
    #[error("Invalid payload: {}", .errors.join("; "))]
    InvalidPayload { errors: Vec<String> },

    // Transparent wrappers for underlying crate errors
    /// File store error from theme-fs
    #[error(transparent)]
    Fs(#[from] theme_fs::Error),

    /// Element tree error from theme-view
    #[error(transparent)]
    View(#[from] theme_view::Error),

    /// Field group error from theme-fields
    #[error(transparent)]
    Fields(#[from] theme_fields::Error),

    /// JSON deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
