use {async_trait::async_trait, bytes::Bytes};

use crate::{error::Result, reply::ReplyRequest};

/// Sends a reply. Each reply token is single-use; a second call with the same
/// token fails with [`crate::Error::Delivery`].
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    async fn reply(&self, request: &ReplyRequest) -> Result<()>;
}

/// Downloads the binary content attached to a message.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_content(&self, message_id: &str) -> Result<Bytes>;
}
