/// Crate-wide result type for LINE channel operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request did not carry a valid `x-line-signature`.
    #[error("webhook authentication failed: {reason}")]
    Authentication { reason: &'static str },

    /// The webhook body is not a valid event batch.
    #[error("malformed webhook payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Message content could not be downloaded.
    #[error("failed to retrieve content for message {message_id}: {message}")]
    Retrieval { message_id: String, message: String },

    /// A reply could not be delivered (invalid, expired, or reused token).
    #[error("reply delivery failed: {message}")]
    Delivery { message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    #[must_use]
    pub fn authentication(reason: &'static str) -> Self {
        Self::Authentication { reason }
    }

    #[must_use]
    pub fn retrieval(message_id: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Retrieval {
            message_id: message_id.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn delivery(message: impl std::fmt::Display) -> Self {
        Self::Delivery {
            message: message.to_string(),
        }
    }
}
