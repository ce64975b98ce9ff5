//! Error types for binding the autofill controller to a page

pub type Result<T> = std::result::Result<T, AutofillError>;

#[derive(Debug, thiserror::Error)]
pub enum AutofillError {
    #[error("no global window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("local storage is unavailable")]
    StorageUnavailable,
    #[error("element not found: #{id}")]
    MissingElement { id: String },
    #[error("element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },
    #[error("autofill already attached to #{id}")]
    AlreadyAttached { id: String },
    #[error("malformed autofill config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid autofill config: {0}")]
    InvalidConfig(String),
}

impl AutofillError {
    pub fn missing(id: &str) -> Self {
        Self::MissingElement { id: id.to_string() }
    }

    pub fn wrong_type(id: &str, expected: &'static str) -> Self {
        Self::WrongElementType {
            id: id.to_string(),
            expected,
        }
    }
}
