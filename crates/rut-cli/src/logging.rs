// SPDX-License-Identifier: Apache-2.0

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::CliConfig;

pub const ENV_RUT_LOG_LEVEL: &str = "RUT_LOG_LEVEL";
pub const ENV_RUT_LOG_JSON: &str = "RUT_LOG_JSON";

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LogFlags {
    pub(crate) quiet: bool,
    pub(crate) verbose: u8,
    pub(crate) trace: bool,
}

/// Flags beat the environment, which beats the config file.
pub(crate) fn resolve_log_level(
    flags: LogFlags,
    env_level: Option<String>,
    config: &CliConfig,
) -> String {
    if flags.trace || flags.verbose > 1 {
        return "trace".to_string();
    }
    if flags.verbose == 1 {
        return "debug".to_string();
    }
    if flags.quiet {
        return "error".to_string();
    }
    env_level
        .map(|level| level.trim().to_string())
        .filter(|level| !level.is_empty())
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|value| matches!(value.trim(), "1" | "true" | "TRUE" | "yes" | "on"))
}

pub(crate) fn init_logging(flags: LogFlags, config: &CliConfig) -> Result<(), String> {
    let level = resolve_log_level(flags, std::env::var(ENV_RUT_LOG_LEVEL).ok(), config);
    let filter =
        EnvFilter::try_new(&level).map_err(|e| format!("invalid log level `{level}`: {e}"))?;
    let log_json = env_bool(ENV_RUT_LOG_JSON).unwrap_or(config.log_json);

    let installed = if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    installed.map_err(|e| format!("failed to install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_env_and_config() {
        let config = CliConfig {
            log_level: Some("info".to_string()),
            ..CliConfig::default()
        };
        let trace = LogFlags {
            trace: true,
            quiet: true,
            ..LogFlags::default()
        };
        assert_eq!(resolve_log_level(trace, Some("error".into()), &config), "trace");

        let verbose = LogFlags {
            verbose: 1,
            ..LogFlags::default()
        };
        assert_eq!(resolve_log_level(verbose, None, &config), "debug");

        let quiet = LogFlags {
            quiet: true,
            ..LogFlags::default()
        };
        assert_eq!(resolve_log_level(quiet, Some("debug".into()), &config), "error");
    }

    #[test]
    fn env_beats_config_and_default_is_warn() {
        let config = CliConfig {
            log_level: Some("info".to_string()),
            ..CliConfig::default()
        };
        let flags = LogFlags::default();
        assert_eq!(resolve_log_level(flags, Some("debug".into()), &config), "debug");
        assert_eq!(resolve_log_level(flags, Some(" ".into()), &config), "info");
        assert_eq!(
            resolve_log_level(flags, None, &CliConfig::default()),
            "warn"
        );
    }
}
