use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error};

use super::artifact::{ArtifactError, ScoringArtifact, VocabularyDrift};
use super::domain::{AnalyzedInputs, FormAnswers, PredictionResult, ProfileData};
use super::features::{FeatureBuilder, FeatureVector};
use super::interpretation::interpret;

/// Entry point for scoring a questionnaire. Holds the artifact loaded at
/// startup; clones share it.
#[derive(Debug, Clone)]
pub struct Predictor {
    artifact: Arc<ScoringArtifact>,
}

impl Predictor {
    pub fn new(artifact: ScoringArtifact) -> Self {
        Self {
            artifact: Arc::new(artifact),
        }
    }

    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        ScoringArtifact::load(dir).map(Self::new)
    }

    pub fn artifact(&self) -> &ScoringArtifact {
        &self.artifact
    }

    pub fn features(
        &self,
        form: &FormAnswers,
        profile: Option<&ProfileData>,
    ) -> Result<FeatureVector, VocabularyDrift> {
        FeatureBuilder::new(self.artifact.encoders(), self.artifact.feature_order())
            .build(form, profile)
    }

    pub fn predict(
        &self,
        form: &FormAnswers,
        profile: Option<&ProfileData>,
    ) -> Result<PredictionResult, VocabularyDrift> {
        let features = self.features(form, profile).map_err(|drift| {
            error!(field = %drift.field, label = %drift.label, "vocabulary drift");
            drift
        })?;

        let raw_score = self.artifact.model().score(features.values());
        let interpretation = interpret(raw_score, form);
        let tier = interpretation.tier;

        debug!(
            raw_score,
            score = interpretation.score,
            tier = tier.label(),
            recommendations = interpretation.recommendations.len(),
            risk_factors = interpretation.risk_factors.len(),
            "prediction complete"
        );

        Ok(PredictionResult {
            score: round_score(interpretation.score),
            tier,
            color: tier.color(),
            description: tier.description(),
            recommendations: interpretation.recommendations,
            risk_factors: interpretation.risk_factors,
            analyzed_inputs: AnalyzedInputs::echo(form),
        })
    }
}

/// Two decimals, rounded on the exact binary value the way decimal formatting
/// does, so 1.045 (stored just below) becomes 1.04.
fn round_score(score: f64) -> f64 {
    format!("{score:.2}").parse().unwrap_or(score)
}
