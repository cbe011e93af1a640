//! Error types for theme-fields

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid field group payload: {0}")]
    Payload(#[from] serde_json::Error),
}
