//! Inference orchestration: build the vector, run the model, map the label.

use std::time::Instant;

use tracing::{info, warn};

use crate::common::error::{ErrorCode, PredictionError};
use crate::features::domain::{DiseaseKind, RangePolicy, Values};
use crate::features::service::FeatureBuilder;
use crate::models::registry::ModelRepository;

use super::domain::{Prediction, PredictionOutcome};

/// Runs end-to-end predictions against a loaded repository.
///
/// Holds no mutable state, so one instance can serve concurrent requests.
#[derive(Clone, Debug)]
pub struct InferenceService {
    repo: ModelRepository,
    builder: FeatureBuilder,
}

impl InferenceService {
    pub fn new(repo: ModelRepository, policy: RangePolicy) -> Self {
        Self {
            repo,
            builder: FeatureBuilder::new(policy),
        }
    }

    pub fn repository(&self) -> &ModelRepository {
        &self.repo
    }

    pub fn range_policy(&self) -> RangePolicy {
        self.builder.policy()
    }

    /// Perform a single prediction for `kind`.
    pub fn infer(&self, kind: DiseaseKind, values: &Values) -> Result<Prediction, PredictionError> {
        let start = Instant::now();
        let result = self.run(kind, values, start);
        let dur_us = elapsed_us(start);

        match &result {
            Ok(prediction) => info!(
                domain = %kind,
                outcome = %prediction.outcome,
                raw = prediction.raw,
                code = ErrorCode::Ok.as_u32(),
                dur_us,
                "prediction served"
            ),
            Err(err) => warn!(
                domain = %kind,
                code = err.code().as_u32(),
                error = %err,
                dur_us,
                "prediction failed"
            ),
        }
        result
    }

    fn run(
        &self,
        kind: DiseaseKind,
        values: &Values,
        start: Instant,
    ) -> Result<Prediction, PredictionError> {
        let features = self.builder.build(kind, values)?;
        let raw = self
            .repo
            .predict(kind, &features)
            .map_err(|source| PredictionError::Model { domain: kind, source })?;
        let outcome = PredictionOutcome::from_raw(raw);

        Ok(Prediction {
            domain: kind,
            outcome,
            label: outcome.label(kind.spec()),
            raw,
            features,
            latency_us: elapsed_us(start),
        })
    }
}

fn elapsed_us(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}
