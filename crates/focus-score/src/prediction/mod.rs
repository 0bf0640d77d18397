//! Procrastination score pipeline: questionnaire answers in, scored and
//! interpreted result out.
//!
//! `Predictor` is the entry point. It builds the model's feature vector from the
//! raw answers, scores it with the loaded artifact and interprets the score
//! against the same answers.

pub mod archive;
pub mod artifact;
pub mod categories;
pub mod domain;
pub mod features;
pub mod interpretation;
pub mod predictor;
pub mod router;

#[cfg(test)]
mod tests;

pub use archive::ResultArchiveRecord;
pub use artifact::{
    ArtifactError, CategoricalField, LabelEncoders, RandomForest, ScoringArtifact, ScoringModel,
    VocabularyDrift,
};
pub use categories::{
    map_gender, map_school_grade, map_usage_purpose, Gender, SchoolGrade, UsagePurpose,
};
pub use domain::{AnalyzedInputs, FormAnswers, FormValue, PredictionResult, ProfileData};
pub use features::{FeatureBuilder, FeatureName, FeatureOrder, FeatureRecord, FeatureVector};
pub use interpretation::{
    classify, Impact, Interpretation, Recommendation, RiskFactor, RiskTier, Severity,
};
pub use predictor::Predictor;
pub use router::{prediction_router, PredictionRequest};
