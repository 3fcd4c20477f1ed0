// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const ENV_RUT_CONFIG: &str = "RUT_CONFIG";

/// Optional user settings read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CliConfig {
    /// `EnvFilter` directive used when no flag or env var overrides it.
    pub log_level: Option<String>,
    pub log_json: bool,
    /// Emit machine-readable output without passing `--json`.
    pub json: bool,
}

impl CliConfig {
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text)
                .map_err(|err| format!("invalid config {}: {err}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(format!("failed to read config {}: {err}", path.display())),
        }
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[must_use]
pub fn resolve_config_path() -> PathBuf {
    resolve_config_path_with(|key| std::env::var(key).ok())
}

pub(crate) fn resolve_config_path_with<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    if let Some(explicit) = non_empty(ENV_RUT_CONFIG) {
        return PathBuf::from(explicit);
    }
    if let Some(xdg_config_home) = non_empty("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg_config_home).join("rut").join("config.toml");
    }
    if let Some(home) = non_empty("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join("rut")
            .join("config.toml");
    }
    PathBuf::from(".rut").join("config.toml")
}
