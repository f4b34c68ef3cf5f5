use crate::core::features::{FeatureSchema, FeatureVector};
use thiserror::Error;

/// Errors a scoring model can raise for a single candidate
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("feature layout mismatch at column {position}: model expects '{expected}', got '{found}'")]
    SchemaMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("feature vector has {found} columns, model expects {expected}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column '{field}' expects a numeric value, got '{value}'")]
    NonNumeric { field: String, value: String },

    #[error("model produced a non-finite score: {0}")]
    NonFinite(f64),

    #[error("model error: {0}")]
    Model(String),
}

/// Compatibility scoring model.
///
/// Implementations are loaded once and shared read-only across requests.
pub trait ScoringModel: Send + Sync {
    /// Feature layout the model was trained on
    fn schema(&self) -> &FeatureSchema;

    /// Raw compatibility score for one feature vector
    fn predict(&self, features: &FeatureVector) -> Result<f64, ScoringError>;
}

/// Verify that a vector's columns match the schema, name by name.
pub fn check_columns(schema: &FeatureSchema, features: &FeatureVector) -> Result<(), ScoringError> {
    if schema.len() != features.len() {
        return Err(ScoringError::ColumnCount {
            expected: schema.len(),
            found: features.len(),
        });
    }

    for (position, (expected, found)) in schema.fields.iter().zip(features.names()).enumerate() {
        if expected != found {
            return Err(ScoringError::SchemaMismatch {
                position,
                expected: expected.clone(),
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

/// Score a candidate as a percentage (raw score x 100)
#[inline]
pub fn score_percentage(
    model: &dyn ScoringModel,
    features: &FeatureVector,
) -> Result<f64, ScoringError> {
    let raw = model.predict(features)?;
    if !raw.is_finite() {
        return Err(ScoringError::NonFinite(raw));
    }

    Ok(raw * 100.0)
}
