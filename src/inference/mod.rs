//! Inference: outcome mapping, the per-request invoker and page dispatch.

pub mod dispatch;
pub mod domain;
pub mod service;

pub use dispatch::PageDispatcher;
pub use domain::{Prediction, PredictionOutcome};
pub use service::InferenceService;
