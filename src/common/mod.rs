//! Shared configuration, error and logging utilities.
pub mod config;
pub mod error;
pub mod log;

pub use config::{AppCfg, LogFormat};
pub use error::{
    BuildError, ConfigError, ErrorCode, ModelError, ModelLoadError, PredictionError, UnknownDomain,
};
