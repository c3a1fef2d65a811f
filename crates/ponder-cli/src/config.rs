//! Configuration file management for ponder.
//!
//! Provides a TOML-based config file at `~/.config/ponder/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use ponder_core::completion::WorkersAiConfig;

/// Default model selector, passed through to the completion service.
pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3.3-70b-instruct-fp8-fast";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub model: ModelSection,
    pub auth: AuthSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSection {
    /// Cloudflare account the Workers AI endpoint belongs to.
    pub account_id: String,
    /// Model selector string.
    pub model: String,
    /// API base URL override; omit for the public endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthSection {
    /// API token with Workers AI access.
    pub api_token: String,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the ponder config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/ponder` or `~/.config/ponder`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("ponder");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("ponder")
}

/// Return the path to the ponder config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    // Set permissions to 0600 (owner read/write only) on Unix.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct PonderConfig {
    pub workers_ai: WorkersAiConfig,
    pub model: String,
}

impl PonderConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Model: `cli_model` > `PONDER_MODEL` env > `config_file.model.model` > [`DEFAULT_MODEL`]
    /// - Account ID: `PONDER_ACCOUNT_ID` env > `config_file.model.account_id` > error
    /// - API token: `PONDER_API_TOKEN` env > `config_file.auth.api_token` > error
    /// - Base URL: `PONDER_BASE_URL` env > `config_file.model.base_url` > public endpoint
    pub fn resolve(cli_model: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let model = if let Some(m) = cli_model {
            m.to_string()
        } else if let Ok(m) = std::env::var("PONDER_MODEL") {
            m
        } else if let Some(ref cfg) = file_config {
            cfg.model.model.clone()
        } else {
            DEFAULT_MODEL.to_string()
        };

        let account_id = if let Ok(id) = std::env::var("PONDER_ACCOUNT_ID") {
            id
        } else if let Some(ref cfg) = file_config {
            cfg.model.account_id.clone()
        } else {
            bail!(
                "account ID not found; set PONDER_ACCOUNT_ID or run `ponder init` to create a config file"
            );
        };

        let api_token = if let Ok(token) = std::env::var("PONDER_API_TOKEN") {
            token
        } else if let Some(ref cfg) = file_config {
            cfg.auth.api_token.clone()
        } else {
            bail!(
                "API token not found; set PONDER_API_TOKEN or run `ponder init` to create a config file"
            );
        };

        let mut workers_ai = WorkersAiConfig::new(account_id, api_token);
        if let Ok(url) = std::env::var("PONDER_BASE_URL") {
            workers_ai.base_url = url;
        } else if let Some(url) = file_config.as_ref().and_then(|c| c.model.base_url.clone()) {
            workers_ai.base_url = url;
        }

        Ok(Self { workers_ai, model })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
