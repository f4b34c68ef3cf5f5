use crate::core::{check_columns, FeatureSchema, FeatureValue, FeatureVector, ScoringError, ScoringModel};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to open model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model schema version '{found}' does not match '{expected}'")]
    SchemaVersion { expected: String, found: String },

    #[error("model declares {found} features, expected {expected}")]
    FeatureCount { expected: usize, found: usize },

    #[error("model feature {position} is '{found}', expected '{expected}'")]
    FeatureOrder {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("weight given for unknown feature '{0}'")]
    UnknownWeight(String),

    #[error("feature '{0}' has both numeric and categorical weights")]
    ConflictingWeight(String),
}

/// Output transform applied to the linear predictor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    #[default]
    Identity,
    Logistic,
}

impl Link {
    #[inline]
    fn apply(self, z: f64) -> f64 {
        match self {
            Link::Identity => z,
            Link::Logistic => 1.0 / (1.0 + (-z).exp()),
        }
    }
}

/// Serialized model as written by the training pipeline
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    schema_version: String,
    features: Vec<String>,
    #[serde(default)]
    intercept: f64,
    #[serde(default)]
    numeric: HashMap<String, f64>,
    #[serde(default)]
    categorical: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    link: Link,
}

#[derive(Debug, Clone)]
enum ColumnWeight {
    Unused,
    Numeric(f64),
    Categorical(HashMap<String, f64>),
}

/// Linear compatibility model over numeric and one-hot categorical columns
///
/// ```json
/// {
///   "schema_version": "employment-match/v1",
///   "features": ["disability_type", "experience_years", "..."],
///   "intercept": 0.1,
///   "numeric": { "experience_years": 0.01 },
///   "categorical": { "company_size": { "large": 0.2 } },
///   "link": "logistic"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LinearModel {
    schema: FeatureSchema,
    intercept: f64,
    columns: Vec<ColumnWeight>,
    link: Link,
}

impl LinearModel {
    /// Load a model artifact from disk, checking it against the current schema
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;
        Self::from_artifact(artifact, FeatureSchema::current())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact, FeatureSchema::current())
    }

    fn from_artifact(artifact: ModelArtifact, expected: &FeatureSchema) -> Result<Self, ModelError> {
        if artifact.schema_version != expected.version {
            return Err(ModelError::SchemaVersion {
                expected: expected.version.clone(),
                found: artifact.schema_version,
            });
        }

        if artifact.features.len() != expected.len() {
            return Err(ModelError::FeatureCount {
                expected: expected.len(),
                found: artifact.features.len(),
            });
        }

        if let Some((position, (wanted, found))) = expected
            .fields
            .iter()
            .zip(artifact.features.iter())
            .enumerate()
            .find(|(_, (wanted, found))| wanted != found)
        {
            return Err(ModelError::FeatureOrder {
                position,
                expected: wanted.clone(),
                found: found.clone(),
            });
        }

        let mut columns = vec![ColumnWeight::Unused; expected.len()];

        for (name, weight) in artifact.numeric {
            let position = expected
                .position(&name)
                .ok_or_else(|| ModelError::UnknownWeight(name.clone()))?;
            columns[position] = ColumnWeight::Numeric(weight);
        }

        for (name, levels) in artifact.categorical {
            let position = expected
                .position(&name)
                .ok_or_else(|| ModelError::UnknownWeight(name.clone()))?;
            if matches!(columns[position], ColumnWeight::Numeric(_)) {
                return Err(ModelError::ConflictingWeight(name));
            }
            columns[position] = ColumnWeight::Categorical(levels);
        }

        Ok(Self {
            schema: expected.clone(),
            intercept: artifact.intercept,
            columns,
            link: artifact.link,
        })
    }
}

impl ScoringModel for LinearModel {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, ScoringError> {
        check_columns(&self.schema, features)?;

        let mut z = self.intercept;
        for ((name, value), weight) in features.iter().zip(self.columns.iter()) {
            match weight {
                ColumnWeight::Unused => {}
                ColumnWeight::Numeric(w) => {
                    let x = value.as_integer().ok_or_else(|| ScoringError::NonNumeric {
                        field: name.to_string(),
                        value: value.to_string(),
                    })?;
                    z += w * x as f64;
                }
                // Levels unseen in training contribute nothing
                ColumnWeight::Categorical(levels) => {
                    let level = match value {
                        FeatureValue::Text(text) => levels.get(text.as_str()),
                        FeatureValue::Integer(n) => levels.get(&n.to_string()),
                    };
                    z += level.copied().unwrap_or(0.0);
                }
            }
        }

        let score = self.link.apply(z);
        if !score.is_finite() {
            return Err(ScoringError::NonFinite(score));
        }
        Ok(score)
    }
}
