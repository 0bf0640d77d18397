//! Trained scoring artifact: model, label encoders and feature column order.

mod encoders;
mod forest;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use super::features::FeatureOrder;
use forest::ForestExport;

pub use encoders::{CategoricalField, LabelEncoder, LabelEncoders, VocabularyDrift};
pub use forest::{DecisionTree, RandomForest};

pub const MODEL_FILE: &str = "random_forest_model.json";
pub const ENCODERS_FILE: &str = "label_encoders.json";
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";

/// Regression model mapping an ordered feature vector to a raw score.
pub trait ScoringModel: Send + Sync {
    fn feature_count(&self) -> usize;

    /// Callers pass exactly `feature_count()` values in artifact column order.
    fn score(&self, features: &[f64]) -> f64;

    fn describe(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid forest export: {detail}")]
    InvalidForest { detail: String },
    #[error("no encoder exported for {field}")]
    MissingEncoder { field: CategoricalField },
    #[error("encoder for {field} has no classes")]
    EmptyEncoder { field: CategoricalField },
    #[error("invalid feature manifest: {detail}")]
    FeatureManifest { detail: String },
    #[error("model expects {model} features but the manifest lists {manifest}")]
    FeatureCountMismatch { model: usize, manifest: usize },
    #[error(transparent)]
    Vocabulary(#[from] VocabularyDrift),
}

/// Everything a prediction needs from one training run. Read-only after load.
pub struct ScoringArtifact {
    model: Box<dyn ScoringModel>,
    encoders: LabelEncoders,
    feature_order: FeatureOrder,
}

impl ScoringArtifact {
    /// Loads the three artifact files from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();

        let model_path = dir.join(MODEL_FILE);
        let export: ForestExport = parse(&model_path)?;
        let forest = export.validate()?;

        let encoders_path = dir.join(ENCODERS_FILE);
        let classes: BTreeMap<String, Vec<String>> = parse(&encoders_path)?;
        let encoders = LabelEncoders::from_classes(classes)?;

        let names_path = dir.join(FEATURE_NAMES_FILE);
        let columns: Vec<String> = parse(&names_path)?;
        let feature_order = FeatureOrder::from_columns(&columns)
            .map_err(|detail| ArtifactError::FeatureManifest { detail })?;

        let artifact = Self::from_parts(Box::new(forest), encoders, feature_order)?;
        info!(
            dir = %dir.display(),
            model = %artifact.model.describe(),
            features = artifact.feature_order.len(),
            "scoring artifact loaded"
        );
        Ok(artifact)
    }

    /// Assembles an artifact, checking the parts agree with each other and
    /// with the category mapper's vocabulary.
    pub fn from_parts(
        model: Box<dyn ScoringModel>,
        encoders: LabelEncoders,
        feature_order: FeatureOrder,
    ) -> Result<Self, ArtifactError> {
        if model.feature_count() != feature_order.len() {
            return Err(ArtifactError::FeatureCountMismatch {
                model: model.feature_count(),
                manifest: feature_order.len(),
            });
        }
        encoders.check_vocabulary()?;

        Ok(Self {
            model,
            encoders,
            feature_order,
        })
    }

    pub fn model(&self) -> &dyn ScoringModel {
        self.model.as_ref()
    }

    pub fn encoders(&self) -> &LabelEncoders {
        &self.encoders
    }

    pub fn feature_order(&self) -> &FeatureOrder {
        &self.feature_order
    }
}

impl std::fmt::Debug for ScoringArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringArtifact")
            .field("model", &self.model.describe())
            .field("encoders", &self.encoders)
            .field("feature_order", &self.feature_order)
            .finish()
    }
}

fn read(path: &Path) -> Result<String, ArtifactError> {
    fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    serde_json::from_str(&read(path)?).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
