//! # Service Bootstrap
//!
//! Builds the [`AppConfig`] at startup and logs a startup banner.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults: port 8080, unique names enforced for `Arupa`.
//! 2. `POLICY_CONFIG`: optional path to a YAML file with `port` and a
//!    `name_uniqueness` map. Types missing from the map keep their default.
//! 3. `PORT`: listen port.
//! 4. `UNIQUE_POLICY_TYPES`: comma-separated list of types that enforce
//!    unique names. Replaces the enforced set entirely; an empty value
//!    disables enforcement.
//!
//! Any error here is fatal at startup.

use std::collections::BTreeMap;
use std::path::Path;

use pms_core::{NameUniqueness, PolicyType};
use serde::Deserialize;

use crate::state::{AppConfig, AppState};

/// Env var naming the YAML config file.
pub const CONFIG_PATH_VAR: &str = "POLICY_CONFIG";
/// Env var overriding the listen port.
pub const PORT_VAR: &str = "PORT";
/// Env var overriding the set of unique-name policy types.
pub const UNIQUE_TYPES_VAR: &str = "UNIQUE_POLICY_TYPES";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors during service bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Config file not found at the given path.
    #[error("config file not found: {path}")]
    ConfigNotFound { path: String },

    /// Config file is not valid YAML or has the wrong shape.
    #[error("invalid config file {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    /// A policy type name did not match any known type.
    #[error("unknown policy type {value:?} in {origin}")]
    UnknownPolicyType { origin: String, value: String },

    /// `PORT` is not a valid port number.
    #[error("invalid port {value:?}")]
    InvalidPort { value: String },

    /// IO error reading the config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

/// On-disk shape of the YAML config. Type names are kept as strings so
/// they can be matched case-insensitively.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    name_uniqueness: BTreeMap<String, bool>,
}

fn load_config_file(path: &Path) -> Result<ConfigFile, BootstrapError> {
    if !path.exists() {
        return Err(BootstrapError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }

    let text = std::fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(&text).map_err(|e| BootstrapError::InvalidConfig {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn parse_policy_type(value: &str, origin: &str) -> Result<PolicyType, BootstrapError> {
    value
        .parse()
        .map_err(|_| BootstrapError::UnknownPolicyType {
            origin: origin.to_string(),
            value: value.to_string(),
        })
}

fn parse_unique_types(list: &str) -> Result<NameUniqueness, BootstrapError> {
    let types = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_policy_type(s, UNIQUE_TYPES_VAR))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(NameUniqueness::from_types(types))
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Load configuration from the process environment.
pub fn load_config() -> Result<AppConfig, BootstrapError> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration, reading variables through `var`.
pub fn load_config_from(
    var: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, BootstrapError> {
    let mut config = AppConfig::default();

    if let Some(path) = var(CONFIG_PATH_VAR) {
        let path = Path::new(&path);
        let file = load_config_file(path)?;
        if let Some(port) = file.port {
            config.port = port;
        }
        let origin = path.display().to_string();
        for (name, enforce) in &file.name_uniqueness {
            let policy_type = parse_policy_type(name, &origin)?;
            config.name_uniqueness.set(policy_type, *enforce);
        }
    }

    if let Some(port) = var(PORT_VAR) {
        config.port = port
            .trim()
            .parse()
            .map_err(|_| BootstrapError::InvalidPort { value: port.clone() })?;
    }

    if let Some(list) = var(UNIQUE_TYPES_VAR) {
        config.name_uniqueness = parse_unique_types(&list)?;
    }

    Ok(config)
}

/// Load configuration from the environment, log the startup banner and
/// build the application state.
pub fn bootstrap() -> Result<AppState, BootstrapError> {
    let config = load_config()?;
    log_banner(&config);
    Ok(AppState::with_config(config))
}

fn log_banner(config: &AppConfig) {
    let enforced: Vec<&str> = config
        .name_uniqueness
        .enforced_types()
        .map(|t| t.as_str())
        .collect();
    let enforced = if enforced.is_empty() {
        "none".to_string()
    } else {
        enforced.join(", ")
    };

    tracing::info!("Policy service configured");
    tracing::info!("  Port:               {}", config.port);
    tracing::info!("  Unique-name types:  {}", enforced);
}
