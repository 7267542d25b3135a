//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use medpredict::DiseaseKind;
use serde_json::{json, Value};

/// Linear artifact that fires when `features[column] > threshold`.
pub fn threshold_linear(n_features: usize, column: usize, threshold: f64) -> Value {
    let mut coefficients = vec![0.0; n_features];
    coefficients[column] = 1.0;
    json!({
        "format_version": 1,
        "kind": "linear",
        "n_features": n_features,
        "coefficients": coefficients,
        "intercept": -threshold,
    })
}

/// Tree artifact with a single split on `column`.
pub fn stump(n_features: usize, column: usize, threshold: f64) -> Value {
    json!({
        "kind": "tree",
        "n_features": n_features,
        "root": {
            "node": "split",
            "feature": column,
            "threshold": threshold,
            "left": { "node": "leaf", "value": 0.0 },
            "right": { "node": "leaf", "value": 1.0 },
        },
    })
}

pub fn write_artifact(dir: &Path, kind: DiseaseKind, body: &Value) {
    let path = dir.join(format!("{}.json", kind.artifact_name()));
    fs::write(path, serde_json::to_vec_pretty(body).unwrap()).unwrap();
}

/// Model directory with one working artifact per domain:
/// diabetes on Glucose > 150, heart disease on age > 60 (tree),
/// Parkinson's on PPE > 0.2.
pub fn model_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), DiseaseKind::Diabetes, &threshold_linear(8, 1, 150.0));
    write_artifact(dir.path(), DiseaseKind::HeartDisease, &stump(13, 0, 60.0));
    write_artifact(dir.path(), DiseaseKind::Parkinsons, &threshold_linear(22, 21, 0.2));
    dir
}
