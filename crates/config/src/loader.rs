use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::{
    env_subst::substitute_env,
    error::{Error, Result},
    schema::MiruConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["miru.toml", "miru.yaml", "miru.yml", "miru.json"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<MiruConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations, then apply environment
/// overrides.
///
/// Search order:
/// 1. `./miru.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/miru/miru.{toml,yaml,yml,json}` (user-global)
///
/// Falls back to `MiruConfig::default()` when no file is found or the file
/// fails to parse.
pub fn discover_and_load() -> MiruConfig {
    let mut config = match find_config_file() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                MiruConfig::default()
            })
        },
        None => {
            debug!("no config file found, using defaults");
            MiruConfig::default()
        },
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

/// Overlay well-known environment variables onto `config`.
///
/// Empty values are ignored so an exported-but-blank variable never wipes a
/// credential from the file.
pub fn apply_env_overrides(config: &mut MiruConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("LINE_CHANNEL_SECRET") {
        config.line.channel_secret = Secret::new(v);
    }
    if let Some(v) = get("LINE_CHANNEL_ACCESS_TOKEN") {
        config.line.channel_access_token = Secret::new(v);
    }
    if let Some(v) = get("MIRU_VISION_REGION") {
        config.vision.region = Some(v);
    }
    if let Some(v) = get("MIRU_VISION_ENDPOINT") {
        config.vision.endpoint = Some(v);
    }
    if let Some(port) = get("MIRU_PORT").and_then(|v| v.parse().ok()) {
        config.server.port = port;
    }
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILENAMES.iter().map(PathBuf::from);
    let global = config_dir()
        .into_iter()
        .flat_map(|dir| CONFIG_FILENAMES.iter().map(move |name| dir.join(name)));
    local.chain(global).find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/miru/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "miru").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> Result<MiruConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => Err(Error::UnsupportedFormat {
            extension: ext.to_string(),
        }),
    }
}
