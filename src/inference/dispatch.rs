//! Page selection for one session.
//!
//! A dispatcher is owned by a single session or request; nothing here is
//! shared between users.

use tracing::debug;

use crate::common::error::{PredictionError, UnknownDomain};
use crate::features::domain::{DiseaseKind, DomainSpec, Values};

use super::domain::Prediction;
use super::service::InferenceService;

/// Currently selected page. Starts on the diabetes page.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PageDispatcher {
    selected: DiseaseKind,
}

impl PageDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher already pointing at `kind`.
    pub fn at(kind: DiseaseKind) -> Self {
        Self { selected: kind }
    }

    pub fn selected(&self) -> DiseaseKind {
        self.selected
    }

    pub fn page(&self) -> &'static DomainSpec {
        self.selected.spec()
    }

    pub fn select(&mut self, kind: DiseaseKind) {
        if kind != self.selected {
            debug!(from = %self.selected, to = %kind, "page changed");
        }
        self.selected = kind;
    }

    /// Select by identifier or menu title. The selection is unchanged on error.
    pub fn select_by_name(&mut self, name: &str) -> Result<DiseaseKind, UnknownDomain> {
        let kind = name.parse()?;
        self.select(kind);
        Ok(kind)
    }

    /// Run the selected page's prediction.
    pub fn submit(
        &self,
        service: &InferenceService,
        values: &Values,
    ) -> Result<Prediction, PredictionError> {
        service.infer(self.selected, values)
    }
}
