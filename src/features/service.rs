//! Assembles user input into the ordered vector a classifier expects.

use tracing::debug;

use crate::common::error::BuildError;

use super::domain::{
    DiseaseKind, FeatureVector, FieldKind, FieldSpec, FieldValue, RangePolicy, Values,
};

/// Converts named values into a [`FeatureVector`] for one domain.
#[derive(Copy, Clone, Debug, Default)]
pub struct FeatureBuilder {
    policy: RangePolicy,
}

impl FeatureBuilder {
    pub fn new(policy: RangePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Build the vector for `kind`, placing every value at its field's position.
    ///
    /// Keys not named by the domain are ignored.
    pub fn build(&self, kind: DiseaseKind, values: &Values) -> Result<FeatureVector, BuildError> {
        let spec = kind.spec();
        let mut out = vec![0.0; spec.len()];

        for field in spec.fields {
            let raw = values
                .get(field.name)
                .filter(|v| !v.is_null())
                .ok_or(BuildError::MissingField {
                    domain: kind,
                    field: field.name,
                })?;
            let value = convert(field, raw)?;
            out[field.position] = self.apply_policy(field, value)?;
        }

        debug!(domain = %kind, len = out.len(), policy = self.policy.as_str(), "feature vector built");
        Ok(FeatureVector::new(out))
    }

    fn apply_policy(&self, field: &FieldSpec, value: f64) -> Result<f64, BuildError> {
        if field.contains(value) {
            return Ok(value);
        }
        match self.policy {
            RangePolicy::PassThrough => Ok(value),
            RangePolicy::Clamp => Ok(value.clamp(field.min, field.max)),
            RangePolicy::Reject => Err(BuildError::OutOfRange {
                field: field.name,
                value,
                min: field.min,
                max: field.max,
            }),
        }
    }
}

/// Build with the reference behaviour: out-of-range values pass through.
pub fn build(kind: DiseaseKind, values: &Values) -> Result<FeatureVector, BuildError> {
    FeatureBuilder::default().build(kind, values)
}

/// Convert one raw value to the numeric kind declared by `field`.
pub fn convert(field: &FieldSpec, raw: &FieldValue) -> Result<f64, BuildError> {
    let parsed = match raw {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(text) => text.trim().parse::<f64>().ok(),
        FieldValue::Other(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() && (field.kind == FieldKind::Real || v.fract() == 0.0) => Ok(v),
        _ => Err(BuildError::TypeConversion {
            field: field.name,
            value: raw.to_string(),
            kind: field.kind,
        }),
    }
}

/// The form's prefilled values for `kind`.
pub fn default_values(kind: DiseaseKind) -> Values {
    kind.spec()
        .fields
        .iter()
        .map(|f| (f.name.to_string(), FieldValue::Number(f.default)))
        .collect()
}

/// Overlay `values` on top of the defaults for `kind`. Nulls keep the default.
pub fn with_defaults(kind: DiseaseKind, values: &Values) -> Values {
    let mut merged = default_values(kind);
    merged.extend(
        values
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    merged
}
