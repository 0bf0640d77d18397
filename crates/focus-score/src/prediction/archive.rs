use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{FormAnswers, PredictionResult};

/// Row handed to whatever stores result history. Structured parts travel as
/// JSON text so the store can keep them opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultArchiveRecord {
    pub user_id: String,
    pub form_payload: String,
    pub score: f64,
    pub tier: String,
    pub recommendations_payload: String,
    pub risk_factors_payload: String,
    pub created_at: DateTime<Utc>,
}

impl ResultArchiveRecord {
    pub fn capture(
        user_id: impl Into<String>,
        form: &FormAnswers,
        result: &PredictionResult,
        created_at: DateTime<Utc>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            user_id: user_id.into(),
            form_payload: serde_json::to_string(form)?,
            score: result.score,
            tier: result.tier.label().to_string(),
            recommendations_payload: serde_json::to_string(&result.recommendations)?,
            risk_factors_payload: serde_json::to_string(&result.risk_factors)?,
            created_at,
        })
    }
}
