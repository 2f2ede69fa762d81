/// Config schema types (server, LINE channel, vision service).
use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MiruConfig {
    pub server: ServerConfig,
    pub line: LineConfig,
    pub vision: VisionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to. Defaults to "127.0.0.1".
    pub bind: String,
    pub port: u16,
    /// Route the platform posts webhook batches to.
    pub webhook_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 8080,
            webhook_path: "/callback".into(),
        }
    }
}

/// LINE Messaging API channel credentials and endpoints.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Channel secret, the HMAC key for `x-line-signature`.
    #[serde(serialize_with = "serialize_secret")]
    pub channel_secret: Secret<String>,

    /// Long-lived channel access token used as the bearer for API calls.
    #[serde(serialize_with = "serialize_secret")]
    pub channel_access_token: Secret<String>,

    /// Base URL for the reply endpoint.
    pub api_base: String,

    /// Base URL for message content downloads.
    pub data_api_base: String,

    pub timeout_secs: u64,
}

impl std::fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineConfig")
            .field("channel_secret", &"[REDACTED]")
            .field("channel_access_token", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("data_api_base", &self.data_api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_secret: Secret::new(String::new()),
            channel_access_token: Secret::new(String::new()),
            api_base: "https://api.line.me".into(),
            data_api_base: "https://api-data.line.me".into(),
            timeout_secs: 10,
        }
    }
}

/// Image analysis backend (Amazon Rekognition).
///
/// Credentials come from the standard AWS chain (environment, shared
/// profile, container or instance role), never from this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// AWS region. Falls back to the SDK's region chain (`AWS_REGION`, profile).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Endpoint override, e.g. a local emulator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Budget for one analysis call, retries included.
    pub timeout_secs: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            timeout_secs: 15,
        }
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = LineConfig {
            channel_secret: Secret::new("topsecret".into()),
            channel_access_token: Secret::new("token-abc".into()),
            ..Default::default()
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("topsecret"));
        assert!(!rendered.contains("token-abc"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: MiruConfig = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.server.webhook_path, "/callback");
        assert_eq!(cfg.line.api_base, "https://api.line.me");
        assert!(cfg.vision.region.is_none());
        assert_eq!(cfg.vision.timeout_secs, 15);
    }
}
