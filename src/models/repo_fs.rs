//! Filesystem loader for the three model artifacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::common::config::AppCfg;
use crate::common::error::ModelLoadError;
use crate::features::domain::DiseaseKind;

use super::domain::{ArtifactFile, Predictor, FORMAT_VERSION};
use super::registry::ModelRepository;

pub const ARTIFACT_EXTENSION: &str = "json";

/// Reads model artifacts from a single directory.
pub struct FsModelRepo {
    root: PathBuf,
}

impl FsModelRepo {
    pub fn new(cfg: &AppCfg) -> Self {
        Self::at(&cfg.model_dir)
    }

    pub fn at(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn artifact_path(&self, kind: DiseaseKind) -> PathBuf {
        self.root
            .join(kind.artifact_name())
            .with_extension(ARTIFACT_EXTENSION)
    }

    /// Load and validate one artifact against its domain's field count.
    pub fn load_artifact(&self, kind: DiseaseKind) -> Result<Arc<dyn Predictor>, ModelLoadError> {
        let name = kind.artifact_name();
        let path = self.artifact_path(kind);

        let raw = fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ModelLoadError::MissingArtifact {
                name,
                path: path.clone(),
            },
            _ => ModelLoadError::Unreadable { name, source },
        })?;

        let file: ArtifactFile =
            serde_json::from_str(&raw).map_err(|source| ModelLoadError::Corrupt { name, source })?;

        if file.format_version != FORMAT_VERSION {
            return Err(ModelLoadError::UnsupportedVersion {
                name,
                version: file.format_version,
            });
        }

        file.model
            .validate()
            .map_err(|reason| ModelLoadError::Invalid { name, reason })?;

        let expected = kind.spec().len();
        let actual = file.model.n_features();
        if actual != expected {
            return Err(ModelLoadError::ShapeMismatch {
                name,
                domain: kind,
                expected,
                actual,
            });
        }

        let predictor: Arc<dyn Predictor> = Arc::from(file.model.into_predictor());
        info!(
            domain = %kind,
            artifact = name,
            backend = predictor.kind(),
            n_features = actual,
            "model artifact loaded"
        );
        Ok(predictor)
    }

    /// Load all three artifacts; the first failure aborts.
    pub fn load_all(&self) -> Result<ModelRepository, ModelLoadError> {
        if !self.root.is_dir() {
            return Err(ModelLoadError::MissingDirectory {
                path: self.root.clone(),
            });
        }

        Ok(ModelRepository::from_predictors(
            self.load_artifact(DiseaseKind::Diabetes)?,
            self.load_artifact(DiseaseKind::HeartDisease)?,
            self.load_artifact(DiseaseKind::Parkinsons)?,
        ))
    }
}
