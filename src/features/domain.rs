//! Domain definitions for the three prediction forms and their input fields.
//!
//! A domain is a fixed, ordered list of [`FieldSpec`]s. The order is the column
//! order the classifiers were fitted on, so a field's `position` is part of the
//! model contract and never changes at runtime.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::{ConfigError, UnknownDomain};

use super::catalog;

/// One of the three independent prediction problems.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseKind {
    #[default]
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl DiseaseKind {
    /// Menu order; the first entry is the landing page.
    pub const ALL: [DiseaseKind; 3] = [
        DiseaseKind::Diabetes,
        DiseaseKind::HeartDisease,
        DiseaseKind::Parkinsons,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseKind::Diabetes => "diabetes",
            DiseaseKind::HeartDisease => "heart_disease",
            DiseaseKind::Parkinsons => "parkinsons",
        }
    }

    /// Logical artifact name expected in the model directory.
    pub fn artifact_name(&self) -> &'static str {
        match self {
            DiseaseKind::Diabetes => "diabetes_model",
            DiseaseKind::HeartDisease => "heart_disease_model",
            DiseaseKind::Parkinsons => "parkinsons_model",
        }
    }

    /// Static form definition for this domain.
    pub fn spec(&self) -> &'static DomainSpec {
        catalog::spec(*self)
    }
}

impl fmt::Display for DiseaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiseaseKind {
    type Err = UnknownDomain;

    /// Accepts identifiers (`heart_disease`, `heart-disease`), short aliases
    /// (`heart`) and the menu titles (`Heart Disease Prediction`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let stem = lowered
            .strip_suffix(" prediction")
            .unwrap_or(&lowered)
            .replace('\'', "")
            .replace([' ', '-'], "_");

        match stem.as_str() {
            "diabetes" => Ok(DiseaseKind::Diabetes),
            "heart" | "heart_disease" => Ok(DiseaseKind::HeartDisease),
            "parkinson" | "parkinsons" | "parkinsons_disease" => Ok(DiseaseKind::Parkinsons),
            _ => Err(UnknownDomain(s.to_string())),
        }
    }
}

/// Numeric kind a field value must convert to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Real,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => f.write_str("an integer"),
            FieldKind::Real => f.write_str("a real number"),
        }
    }
}

/// Static description of one input feature.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
    pub kind: FieldKind,
    /// Inclusive lower bound shown by the form; advisory.
    pub min: f64,
    /// Inclusive upper bound shown by the form; advisory.
    pub max: f64,
    pub default: f64,
    /// Zero-based column index in the model input.
    pub position: usize,
}

impl FieldSpec {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Form definition for a single domain.
#[derive(Debug, Serialize)]
pub struct DomainSpec {
    pub kind: DiseaseKind,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub positive_label: &'static str,
    pub negative_label: &'static str,
    pub fields: &'static [FieldSpec],
}

impl DomainSpec {
    /// Look up a field by its exact name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of values the model expects.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// What the builder does with a value outside `[min, max]`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RangePolicy {
    /// Pass the value to the model unchanged.
    #[default]
    PassThrough,
    /// Clamp into range, as the input widgets do.
    Clamp,
    /// Refuse the request.
    Reject,
}

impl RangePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangePolicy::PassThrough => "pass-through",
            RangePolicy::Clamp => "clamp",
            RangePolicy::Reject => "reject",
        }
    }
}

impl FromStr for RangePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass-through" | "passthrough" | "pass_through" => Ok(RangePolicy::PassThrough),
            "clamp" => Ok(RangePolicy::Clamp),
            "reject" => Ok(RangePolicy::Reject),
            _ => Err(ConfigError::InvalidValue {
                key: "range_policy",
                value: s.to_string(),
                expected: "pass-through, clamp, reject",
            }),
        }
    }
}

/// A raw user-supplied value before conversion.
///
/// Forms and JSON bodies deliver numbers; command lines deliver text. Any other
/// JSON value (`true`, arrays, objects) is kept as `Other` so the builder can
/// reject it per field. A JSON `null` counts as an absent value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Other(serde_json::Value::Null))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// User input keyed by field name, in no particular order.
pub type Values = HashMap<String, FieldValue>;

/// Ordered numeric model input, one value per field position.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}
