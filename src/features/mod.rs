//! Form definitions and feature vector assembly for the three domains.

pub mod catalog;
pub mod domain;
pub mod service;

pub use catalog::DISCLAIMER;
pub use domain::{
    DiseaseKind, DomainSpec, FeatureVector, FieldKind, FieldSpec, FieldValue, RangePolicy, Values,
};
pub use service::{build, default_values, with_defaults, FeatureBuilder};
