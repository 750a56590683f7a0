use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Root configuration structure, deserialized from
/// `.gradle-submitr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Analysis service connection settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Connection settings for the analysis service.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceConfig {
    /// Endpoint base URL; may also be supplied with `--api-url`.
    pub base_url: Option<String>,
    /// Optional bearer token sent with every request.
    pub token: Option<String>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.gradle-submitr/config.toml`
/// 3. `~/.config/gradle-submitr/config.toml`
/// 4. Built-in [`Config::default`] (no endpoint, no token)
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = project_path.join(".gradle-submitr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("gradle-submitr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
