//! medpredict: patient-form prediction for diabetes, heart disease and
//! Parkinson's disease backed by pre-trained classifiers loaded from disk.
//!
//! Layers follow the flow of one request: `features` turns named input into an
//! ordered vector, `models` holds the loaded predictors, `inference` runs them
//! and maps the label, `api` presents the result.

pub mod api;
pub mod common;
pub mod features;
pub mod inference;
pub mod models;

pub use common::{AppCfg, BuildError, ModelLoadError, PredictionError};
pub use features::{DiseaseKind, FeatureVector, FieldValue, RangePolicy, Values};
pub use inference::{InferenceService, PageDispatcher, Prediction, PredictionOutcome};
pub use models::{ModelRepository, Predictor};
