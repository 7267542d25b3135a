//! Runtime configuration loaded from the environment.
//!
//! Command-line flags override these values in `main`.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::common::error::ConfigError;
use crate::features::domain::RangePolicy;

pub const DEFAULT_MODEL_DIR: &str = "./saved_models";
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format for log lines.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" => Ok(LogFormat::Text),
            _ => Err(ConfigError::InvalidValue {
                key: "MEDPREDICT_LOG_FORMAT",
                value: s.to_string(),
                expected: "json or text",
            }),
        }
    }
}

/// Snapshot of configuration values consumed by the service.
#[derive(Clone, Debug)]
pub struct AppCfg {
    pub model_dir: PathBuf,
    pub bind: SocketAddr,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `medpredict=debug`.
    pub log_level: String,
    pub log_format: LogFormat,
    pub range_policy: RangePolicy,
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind = env_or("MEDPREDICT_BIND", DEFAULT_BIND);
        let bind: SocketAddr = bind
            .parse()
            .map_err(|source| ConfigError::InvalidBind { value: bind, source })?;

        let range_policy = match lookup("MEDPREDICT_RANGE_POLICY") {
            Some(raw) => raw.parse()?,
            None => RangePolicy::default(),
        };

        let log_format = match lookup("MEDPREDICT_LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            model_dir: PathBuf::from(env_or("MEDPREDICT_MODEL_DIR", DEFAULT_MODEL_DIR)),
            bind,
            log_level: env_or("MEDPREDICT_LOG_LEVEL", DEFAULT_LOG_LEVEL),
            log_format,
            range_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = AppCfg::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.model_dir, PathBuf::from(DEFAULT_MODEL_DIR));
        assert_eq!(cfg.bind.port(), 8501);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.range_policy, RangePolicy::PassThrough);
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = AppCfg::from_lookup(lookup(&[
            ("MEDPREDICT_MODEL_DIR", "/srv/models"),
            ("MEDPREDICT_BIND", "0.0.0.0:9000"),
            ("MEDPREDICT_LOG_FORMAT", "text"),
            ("MEDPREDICT_RANGE_POLICY", "reject"),
        ]))
        .unwrap();
        assert_eq!(cfg.model_dir, PathBuf::from("/srv/models"));
        assert_eq!(cfg.bind.port(), 9000);
        assert_eq!(cfg.log_format, LogFormat::Text);
        assert_eq!(cfg.range_policy, RangePolicy::Reject);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            AppCfg::from_lookup(lookup(&[("MEDPREDICT_BIND", "nowhere")])),
            Err(ConfigError::InvalidBind { .. })
        ));
        assert!(matches!(
            AppCfg::from_lookup(lookup(&[("MEDPREDICT_RANGE_POLICY", "strict")])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
