use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported config format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A credential required at startup is absent or empty.
    #[error("missing required credential: {name}")]
    MissingCredential { name: &'static str },
}

impl Error {
    #[must_use]
    pub fn missing_credential(name: &'static str) -> Self {
        Self::MissingCredential { name }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
