#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service call failed or was rejected.
    #[error("{operation} failed: {message}")]
    Recognition {
        operation: &'static str,
        message: String,
    },
}

impl Error {
    #[must_use]
    pub fn recognition(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Recognition {
            operation,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
