//! Process-wide, read-only store of the three loaded predictors.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::common::error::{ModelError, ModelLoadError};
use crate::features::domain::{DiseaseKind, FeatureVector};

use super::domain::{ModelSummary, Predictor};
use super::repo_fs::FsModelRepo;

/// One predictor per domain, immutable after construction.
///
/// Cloning is cheap and shares the underlying models.
#[derive(Clone)]
pub struct ModelRepository {
    diabetes: Arc<dyn Predictor>,
    heart_disease: Arc<dyn Predictor>,
    parkinsons: Arc<dyn Predictor>,
}

impl ModelRepository {
    /// Load all artifacts from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        FsModelRepo::at(dir).load_all()
    }

    pub fn from_predictors(
        diabetes: Arc<dyn Predictor>,
        heart_disease: Arc<dyn Predictor>,
        parkinsons: Arc<dyn Predictor>,
    ) -> Self {
        Self {
            diabetes,
            heart_disease,
            parkinsons,
        }
    }

    pub fn predictor(&self, kind: DiseaseKind) -> &dyn Predictor {
        match kind {
            DiseaseKind::Diabetes => self.diabetes.as_ref(),
            DiseaseKind::HeartDisease => self.heart_disease.as_ref(),
            DiseaseKind::Parkinsons => self.parkinsons.as_ref(),
        }
    }

    /// Raw model output for one vector. The vector width is not checked here.
    pub fn predict(&self, kind: DiseaseKind, vector: &FeatureVector) -> Result<f64, ModelError> {
        self.predictor(kind).predict(vector.as_slice())
    }

    pub fn describe(&self) -> Vec<ModelSummary> {
        DiseaseKind::ALL
            .iter()
            .map(|&kind| {
                let predictor = self.predictor(kind);
                ModelSummary {
                    domain: kind,
                    artifact: kind.artifact_name(),
                    kind: predictor.kind(),
                    n_features: predictor.n_features(),
                }
            })
            .collect()
    }
}

impl fmt::Debug for ModelRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.describe()).finish()
    }
}
