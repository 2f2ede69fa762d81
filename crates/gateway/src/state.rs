use std::sync::Arc;

use {
    miru_config::MiruConfig,
    miru_line::{Dispatcher, LineClient},
    miru_vision::RekognitionVision,
    secrecy::Secret,
};

/// Process-wide state, built once at startup and shared by every request.
pub struct GatewayState {
    pub dispatcher: Dispatcher,
    pub channel_secret: Secret<String>,
    pub version: &'static str,
}

impl GatewayState {
    pub fn new(dispatcher: Dispatcher, channel_secret: Secret<String>) -> Arc<Self> {
        Arc::new(Self {
            dispatcher,
            channel_secret,
            version: env!("CARGO_PKG_VERSION"),
        })
    }

    /// Wire the real LINE and vision clients from config.
    pub async fn from_config(config: &MiruConfig) -> anyhow::Result<Arc<Self>> {
        miru_config::ensure_credentials(config)?;
        let line = Arc::new(LineClient::new(&config.line)?);
        let vision = Arc::new(RekognitionVision::from_config(&config.vision).await);
        let dispatcher = Dispatcher::new(line.clone(), line, vision);
        Ok(Self::new(dispatcher, config.line.channel_secret.clone()))
    }
}
