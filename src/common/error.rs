//! Error types shared across the crate.
//!
//! Per-request failures (`BuildError`, `PredictionError`) are recoverable and
//! rendered to the caller. `ModelLoadError` is fatal and only produced at startup.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::features::domain::{DiseaseKind, FieldKind};

/// Stable error codes surfaced in logs and API responses.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// A required field had no value.
    MissingField = 1,
    /// A value could not be converted to the field's numeric kind.
    InvalidValue = 2,
    /// A value fell outside the field's bounds under the reject policy.
    OutOfRange = 3,
    /// The classifier itself failed.
    ModelFailure = 4,
    /// Model artifacts could not be loaded.
    ModelLoad = 5,
    /// Requested page does not exist.
    UnknownDomain = 6,
    /// Invalid configuration value.
    Config = 7,
    /// Request body was not valid JSON for the endpoint.
    MalformedBody = 8,
}

impl ErrorCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Fatal startup failure while loading the model directory.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("model directory not found at {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("model artifact `{name}` not found at {}", path.display())]
    MissingArtifact { name: &'static str, path: PathBuf },

    #[error("model artifact `{name}` could not be read: {source}")]
    Unreadable {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact `{name}` is corrupt: {source}")]
    Corrupt {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact `{name}` uses unsupported format version {version}")]
    UnsupportedVersion { name: &'static str, version: u32 },

    #[error("model artifact `{name}` is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("model artifact `{name}` expects {actual} features but the {domain} form provides {expected}")]
    ShapeMismatch {
        name: &'static str,
        domain: DiseaseKind,
        expected: usize,
        actual: usize,
    },
}

impl ModelLoadError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ModelLoad
    }
}

/// Failure raised by a predictor while evaluating one vector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    Backend(String),
}

/// Failure while turning named input into a feature vector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("missing value for `{field}` ({domain})")]
    MissingField {
        domain: DiseaseKind,
        field: &'static str,
    },

    #[error("`{value}` is not valid for `{field}`: expected {kind}")]
    TypeConversion {
        field: &'static str,
        value: String,
        kind: FieldKind,
    },

    #[error("{value} is outside the accepted range [{min}, {max}] for `{field}`")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl BuildError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BuildError::MissingField { .. } => ErrorCode::MissingField,
            BuildError::TypeConversion { .. } => ErrorCode::InvalidValue,
            BuildError::OutOfRange { .. } => ErrorCode::OutOfRange,
        }
    }
}

/// Per-request failure reported by the inference invoker.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("invalid input: {0}")]
    Input(#[from] BuildError),

    #[error("the {domain} model could not produce a prediction: {source}")]
    Model {
        domain: DiseaseKind,
        #[source]
        source: ModelError,
    },
}

impl PredictionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PredictionError::Input(err) => err.code(),
            PredictionError::Model { .. } => ErrorCode::ModelFailure,
        }
    }
}

/// Requested page name matched none of the domains.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown page `{0}`; expected diabetes, heart_disease or parkinsons")]
pub struct UnknownDomain(pub String);

impl UnknownDomain {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::UnknownDomain
    }
}

/// Invalid configuration supplied through the environment or flags.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}: expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid bind address `{value}`: {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorCode::Ok as u32, 0);
        assert_eq!(ErrorCode::MissingField as u32, 1);
        assert_eq!(ErrorCode::InvalidValue as u32, 2);
        assert_eq!(ErrorCode::OutOfRange as u32, 3);
        assert_eq!(ErrorCode::ModelFailure as u32, 4);
        assert_eq!(ErrorCode::ModelLoad as u32, 5);
        assert_eq!(ErrorCode::UnknownDomain as u32, 6);
        assert_eq!(ErrorCode::Config as u32, 7);
        assert_eq!(ErrorCode::MalformedBody as u32, 8);
    }

    #[test]
    fn prediction_error_inherits_input_code() {
        let err: PredictionError = BuildError::MissingField {
            domain: DiseaseKind::Diabetes,
            field: "Age",
        }
        .into();
        assert_eq!(err.code(), ErrorCode::MissingField);
        assert_eq!(err.to_string(), "invalid input: missing value for `Age` (diabetes)");
    }

    #[test]
    fn load_error_names_the_artifact() {
        let err = ModelLoadError::MissingArtifact {
            name: "heart_disease_model",
            path: PathBuf::from("/models/heart_disease_model.json"),
        };
        assert!(err.to_string().contains("heart_disease_model"));
    }
}
