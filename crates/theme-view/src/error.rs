//! Error types for theme-view

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid element payload: {0}")]
    Payload(#[from] serde_json::Error),
}
