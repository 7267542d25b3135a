//! Model artifacts, their loader and the read-only repository.

pub mod domain;
pub mod registry;
pub mod repo_fs;

pub use domain::{ModelArtifact, ModelSummary, Predictor};
pub use registry::ModelRepository;
pub use repo_fs::FsModelRepo;
