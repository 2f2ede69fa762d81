//! Startup validation.

use secrecy::ExposeSecret;

use crate::{
    error::{Error, Result},
    schema::MiruConfig,
};

/// Fail unless both LINE credentials are present.
///
/// The webhook cannot authenticate requests without the channel secret, and
/// cannot reply without the access token, so either being absent is fatal.
pub fn ensure_credentials(config: &MiruConfig) -> Result<()> {
    if config.line.channel_secret.expose_secret().trim().is_empty() {
        return Err(Error::missing_credential("LINE_CHANNEL_SECRET"));
    }
    if config.line.channel_access_token.expose_secret().trim().is_empty() {
        return Err(Error::missing_credential("LINE_CHANNEL_ACCESS_TOKEN"));
    }
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, secrecy::Secret};

    #[test]
    fn default_config_is_missing_secret() {
        let err = ensure_credentials(&MiruConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingCredential {
                name: "LINE_CHANNEL_SECRET"
            }
        ));
    }

    #[test]
    fn missing_token_is_reported() {
        let mut cfg = MiruConfig::default();
        cfg.line.channel_secret = Secret::new("secret".into());
        let err = ensure_credentials(&cfg).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required credential: LINE_CHANNEL_ACCESS_TOKEN"
        );
    }

    #[test]
    fn complete_credentials_pass() {
        let mut cfg = MiruConfig::default();
        cfg.line.channel_secret = Secret::new("secret".into());
        cfg.line.channel_access_token = Secret::new("token".into());
        assert!(ensure_credentials(&cfg).is_ok());
    }
}
