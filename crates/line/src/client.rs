use std::time::Duration;

use {
    async_trait::async_trait,
    bytes::Bytes,
    miru_config::LineConfig,
    secrecy::{ExposeSecret, Secret},
    tracing::debug,
};

use crate::{
    error::{Error, Result},
    reply::ReplyRequest,
    transport::{ContentFetcher, ReplyTransport},
};

/// HTTP client for the LINE Messaging API.
pub struct LineClient {
    http: reqwest::Client,
    access_token: Secret<String>,
    api_base: String,
    data_api_base: String,
}

impl LineClient {
    pub fn new(config: &LineConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            access_token: config.channel_access_token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            data_api_base: config.data_api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ReplyTransport for LineClient {
    async fn reply(&self, request: &ReplyRequest) -> Result<()> {
        let url = format!("{}/v2/bot/message/reply", self.api_base);
        let resp = self
            .http
            .post(url)
            .bearer_auth(self.access_token.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(Error::delivery)?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::delivery(format!("LINE reply failed ({status}): {body}")));
        }
        debug!(reply_token = %request.reply_token, "reply delivered");
        Ok(())
    }
}

#[async_trait]
impl ContentFetcher for LineClient {
    async fn fetch_content(&self, message_id: &str) -> Result<Bytes> {
        let url = format!(
            "{}/v2/bot/message/{}/content",
            self.data_api_base,
            urlencoding::encode(message_id)
        );
        let resp = self
            .http
            .get(url)
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await
            .map_err(|e| Error::retrieval(message_id, e))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::retrieval(message_id, format!("HTTP {status}: {body}")));
        }
        let data = resp
            .bytes()
            .await
            .map_err(|e| Error::retrieval(message_id, e))?;
        debug!(message_id, len = data.len(), "downloaded message content");
        Ok(data)
    }
}
