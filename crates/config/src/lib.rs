//! Configuration loading, env substitution, and credential validation.
//!
//! Config files: `miru.toml`, `miru.yaml`, or `miru.json`
//! Searched in `./` then `~/.config/miru/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values. The LINE channel
//! credentials and vision region/endpoint can also be supplied purely through the
//! environment (see [`loader::apply_env_overrides`]).

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::{apply_env_overrides, config_dir, discover_and_load, load_config},
    schema::{LineConfig, MiruConfig, ServerConfig, VisionConfig},
    validate::ensure_credentials,
};
