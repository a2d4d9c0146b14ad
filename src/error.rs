use thiserror::Error;

/// Main error type for the sheet store.
/// Aggregates errors from dependencies and from every internal module.
#[derive(Error, Debug)]
pub enum SheetStoreError {
    #[error("{0}")]
    WithContextError(String),

    // Third-party library errors
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    UrlError(#[from] url::ParseError),

    #[error("{0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Spreadsheet module errors
    #[error("{0}")]
    RangeError(#[from] crate::spreadsheet::range::RangeError),

    // Database module errors
    #[error("{0}")]
    StoreError(#[from] crate::database::StoreError),

    // Backend module errors
    #[error("{0}")]
    BackendError(#[from] crate::backend::BackendError),

    #[error("{0}")]
    AuthError(#[from] crate::backend::auth::AuthError),

    // Configuration errors
    #[error("{0}")]
    ConfigError(#[from] crate::config::ConfigError),
}

impl SheetStoreError {
    /// Returns the record-store error carried by this error, if any.
    pub fn as_store_error(&self) -> Option<&crate::database::StoreError> {
        match self {
            SheetStoreError::StoreError(error) => Some(error),
            _ => None,
        }
    }
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, SheetStoreError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| SheetStoreError::WithContextError(format!("{}: {}", message, e)))
    }
}
