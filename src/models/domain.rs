//! Predictor contract and the portable artifact formats that implement it.
//!
//! Artifacts are JSON documents tagged by `kind`:
//!
//! ```json
//! {"format_version": 1, "kind": "linear", "n_features": 8,
//!  "coefficients": [0.1, 0.03, ...], "intercept": -5.2, "classes": [0, 1]}
//! ```
//!
//! Every predictor returns the raw class label it was fitted with; mapping that
//! label to an outcome happens in the inference layer.

use serde::{Deserialize, Serialize};

use crate::common::error::ModelError;
use crate::features::domain::DiseaseKind;

/// Read-only, deterministic classifier.
pub trait Predictor: Send + Sync {
    /// Short backend identifier for diagnostics.
    fn kind(&self) -> &'static str;

    /// Input width the predictor was fitted on.
    fn n_features(&self) -> usize;

    /// Predict the class label for a single row.
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Predict one label per row.
    fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}

fn check_width(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::DimensionMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

fn default_classes() -> [f64; 2] {
    [0.0, 1.0]
}

/// Linear decision function `w·x + b`, as produced by a linear SVM or
/// logistic regression. Positive scores map to `classes[1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub n_features: usize,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_classes")]
    pub classes: [f64; 2],
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            n_features: coefficients.len(),
            coefficients,
            intercept,
            classes: default_classes(),
        }
    }

    /// Signed distance to the separating hyperplane.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_width(self.n_features, features)?;
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.intercept)
    }

    fn validate(&self) -> Result<(), String> {
        if self.coefficients.len() != self.n_features {
            return Err(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                self.n_features
            ));
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        let score = self.decision_function(features)?;
        Ok(if score > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }
}

/// A node in a decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    /// `features[feature] <= threshold` goes left.
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        value: f64,
    },
}

impl TreeNode {
    fn evaluate(&self, features: &[f64]) -> Result<f64, ModelError> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).ok_or_else(|| {
                        ModelError::Backend(format!(
                            "split on feature {feature} but the row has {} values",
                            features.len()
                        ))
                    })?;
                    node = if *value <= *threshold { left } else { right };
                }
                TreeNode::Leaf { value } => return Ok(*value),
            }
        }
    }

    /// Largest feature index referenced by any split.
    fn max_feature(&self) -> Option<usize> {
        match self {
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => [Some(*feature), left.max_feature(), right.max_feature()]
                .into_iter()
                .flatten()
                .max(),
            TreeNode::Leaf { .. } => None,
        }
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        match self.max_feature() {
            Some(max) if max >= n_features => Err(format!(
                "split on feature {max} but only {n_features} features"
            )),
            _ => Ok(()),
        }
    }
}

/// Single decision tree whose leaves hold class labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub n_features: usize,
    pub root: TreeNode,
}

impl Predictor for DecisionTree {
    fn kind(&self) -> &'static str {
        "tree"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_width(self.n_features, features)?;
        self.root.evaluate(features)
    }
}

/// Majority vote over decision trees. Ties go to the smallest label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forest {
    pub n_features: usize,
    pub trees: Vec<TreeNode>,
}

impl Predictor for Forest {
    fn kind(&self) -> &'static str {
        "forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_width(self.n_features, features)?;

        let mut votes: Vec<(f64, usize)> = Vec::new();
        for tree in &self.trees {
            let label = tree.evaluate(features)?;
            match votes.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => votes.push((label, 1)),
            }
        }

        votes
            .into_iter()
            .max_by(|(la, ca), (lb, cb)| ca.cmp(cb).then_with(|| lb.total_cmp(la)))
            .map(|(label, _)| label)
            .ok_or_else(|| ModelError::Backend("forest has no trees".to_string()))
    }
}

/// Any supported artifact body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    Tree(DecisionTree),
    Forest(Forest),
}

impl ModelArtifact {
    pub fn n_features(&self) -> usize {
        match self {
            ModelArtifact::Linear(m) => m.n_features,
            ModelArtifact::Tree(m) => m.n_features,
            ModelArtifact::Forest(m) => m.n_features,
        }
    }

    /// Structural checks that do not depend on the domain.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ModelArtifact::Linear(m) => m.validate(),
            ModelArtifact::Tree(m) => m.root.validate(m.n_features),
            ModelArtifact::Forest(m) => {
                if m.trees.is_empty() {
                    return Err("forest has no trees".to_string());
                }
                m.trees.iter().try_for_each(|t| t.validate(m.n_features))
            }
        }
    }

    pub fn into_predictor(self) -> Box<dyn Predictor> {
        match self {
            ModelArtifact::Linear(m) => Box::new(m),
            ModelArtifact::Tree(m) => Box::new(m),
            ModelArtifact::Forest(m) => Box::new(m),
        }
    }
}

pub const FORMAT_VERSION: u32 = 1;

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

/// On-disk envelope: a version number plus the tagged artifact body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(flatten)]
    pub model: ModelArtifact,
}

/// Loaded model as reported by the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub domain: DiseaseKind,
    pub artifact: &'static str,
    pub kind: &'static str,
    pub n_features: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(TreeNode::Leaf { value: left }),
            right: Box::new(TreeNode::Leaf { value: right }),
        }
    }

    #[test]
    fn linear_model_uses_sign_of_decision_function() {
        let model = LinearModel::new(vec![1.0, -1.0], 0.0);
        assert_eq!(model.predict(&[2.0, 1.0]).unwrap(), 1.0);
        assert_eq!(model.predict(&[1.0, 2.0]).unwrap(), 0.0);
        // on the hyperplane counts as the negative class
        assert_eq!(model.predict(&[1.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn linear_model_honours_custom_classes() {
        let mut model = LinearModel::new(vec![1.0], 0.0);
        model.classes = [-1.0, 1.0];
        assert_eq!(model.predict(&[-3.0]).unwrap(), -1.0);
    }

    #[test]
    fn width_mismatch_is_an_error() {
        let model = LinearModel::new(vec![1.0, 1.0], 0.0);
        assert_eq!(
            model.predict(&[1.0]),
            Err(ModelError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn tree_follows_thresholds() {
        let tree = DecisionTree {
            n_features: 2,
            root: TreeNode::Split {
                feature: 0,
                threshold: 10.0,
                left: Box::new(TreeNode::Leaf { value: 0.0 }),
                right: Box::new(stump(1, 5.0, 0.0, 1.0)),
            },
        };
        assert_eq!(tree.predict(&[3.0, 9.0]).unwrap(), 0.0);
        assert_eq!(tree.predict(&[10.0, 9.0]).unwrap(), 0.0);
        assert_eq!(tree.predict(&[11.0, 4.0]).unwrap(), 0.0);
        assert_eq!(tree.predict(&[11.0, 6.0]).unwrap(), 1.0);
    }

    #[test]
    fn forest_takes_majority_and_breaks_ties_low() {
        let forest = Forest {
            n_features: 1,
            trees: vec![stump(0, 0.5, 0.0, 1.0), stump(0, 1.5, 0.0, 1.0), stump(0, 2.5, 0.0, 1.0)],
        };
        assert_eq!(forest.predict(&[2.0]).unwrap(), 1.0);
        assert_eq!(forest.predict(&[1.0]).unwrap(), 0.0);

        let tied = Forest {
            n_features: 1,
            trees: vec![stump(0, 0.5, 0.0, 1.0), stump(0, 1.5, 0.0, 1.0)],
        };
        assert_eq!(tied.predict(&[1.0]).unwrap(), 0.0);
    }

    #[test]
    fn batch_predicts_each_row() {
        let model = LinearModel::new(vec![1.0], -0.5);
        let rows = vec![vec![0.0], vec![1.0]];
        assert_eq!(model.predict_batch(&rows).unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn parses_tagged_artifact_file() {
        let raw = r#"{
            "format_version": 1,
            "kind": "tree",
            "n_features": 2,
            "root": {"node": "split", "feature": 1, "threshold": 0.5,
                     "left": {"node": "leaf", "value": 0},
                     "right": {"node": "leaf", "value": 1}}
        }"#;
        let file: ArtifactFile = serde_json::from_str(raw).unwrap();
        assert_eq!(file.format_version, 1);
        assert!(file.model.validate().is_ok());
        let predictor = file.model.into_predictor();
        assert_eq!(predictor.kind(), "tree");
        assert_eq!(predictor.predict(&[0.0, 0.9]).unwrap(), 1.0);
    }

    #[test]
    fn format_version_defaults_to_current() {
        let raw = r#"{"kind": "linear", "n_features": 1, "coefficients": [2.0], "intercept": 0.0}"#;
        let file: ArtifactFile = serde_json::from_str(raw).unwrap();
        assert_eq!(file.format_version, FORMAT_VERSION);
    }

    #[test]
    fn validation_catches_structural_errors() {
        let linear = ModelArtifact::Linear(LinearModel {
            n_features: 3,
            coefficients: vec![1.0],
            intercept: 0.0,
            classes: default_classes(),
        });
        assert!(linear.validate().is_err());

        let tree = ModelArtifact::Tree(DecisionTree {
            n_features: 1,
            root: stump(4, 0.0, 0.0, 1.0),
        });
        assert!(tree.validate().is_err());

        let forest = ModelArtifact::Forest(Forest {
            n_features: 1,
            trees: Vec::new(),
        });
        assert!(forest.validate().is_err());
    }
}
