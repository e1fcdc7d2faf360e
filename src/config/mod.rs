pub mod schema;

pub use schema::ToolKitConfig;

use crate::types::Environment;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "PAYMAN_API_SECRET";
/// Environment variable selecting `production` or `sandbox`.
pub const ENVIRONMENT_VAR: &str = "PAYMAN_ENVIRONMENT";
/// Environment variable overriding the API base URL.
pub const BASE_URL_VAR: &str = "PAYMAN_BASE_URL";

/// Default paykit home directory (~/.paykit).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".paykit"))
        .unwrap_or_else(|| PathBuf::from(".paykit"))
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
    default_home_dir().join("paykit.toml")
}

/// Expand a leading `~` in a user-supplied path.
pub fn resolve_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<ToolKitConfig> {
    if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read paykit config file")?;
        let config: ToolKitConfig =
            toml::from_str(&contents).context("Failed to parse paykit config (TOML)")?;
        Ok(config)
    } else {
        Ok(ToolKitConfig::default())
    }
}

/// Save config to the given path (TOML format).
pub fn save_config(config: &ToolKitConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents).context("Failed to write config file")?;
    Ok(())
}

/// Apply `PAYMAN_*` overrides from the process environment.
pub fn apply_env_overrides(config: &mut ToolKitConfig) -> Result<()> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

fn apply_overrides(
    config: &mut ToolKitConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(secret) = lookup(API_SECRET_VAR).filter(|s| !s.is_empty()) {
        config.api_secret = secret;
    }
    if let Some(env) = lookup(ENVIRONMENT_VAR).filter(|s| !s.is_empty()) {
        config.environment = env
            .parse::<Environment>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid {}", ENVIRONMENT_VAR))?;
    }
    if let Some(url) = lookup(BASE_URL_VAR).filter(|s| !s.is_empty()) {
        config.base_url = Some(url);
    }
    Ok(())
}
