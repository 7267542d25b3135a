//! Outcome types produced by the inference layer.

use std::fmt;

use serde::Serialize;

use crate::features::domain::{DiseaseKind, DomainSpec, FeatureVector};

/// Binary decision derived from a model's raw output.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionOutcome {
    Positive,
    Negative,
}

impl PredictionOutcome {
    /// Exactly `1` is positive. Every other value, including `-1`, `0.5` and
    /// NaN, is negative.
    pub fn from_raw(raw: f64) -> Self {
        if raw == 1.0 {
            PredictionOutcome::Positive
        } else {
            PredictionOutcome::Negative
        }
    }

    /// The domain's fixed display string for this outcome.
    pub fn label(&self, spec: &DomainSpec) -> &'static str {
        match self {
            PredictionOutcome::Positive => spec.positive_label,
            PredictionOutcome::Negative => spec.negative_label,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, PredictionOutcome::Positive)
    }
}

impl fmt::Display for PredictionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionOutcome::Positive => f.write_str("positive"),
            PredictionOutcome::Negative => f.write_str("negative"),
        }
    }
}

/// Result of a single inference call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub domain: DiseaseKind,
    pub outcome: PredictionOutcome,
    pub label: &'static str,
    /// Model output before label mapping.
    pub raw: f64,
    pub features: FeatureVector,
    pub latency_us: u64,
}
