//! Turns a model score plus the raw answers into something a student can act on.

mod factors;
mod rules;
mod tiers;

pub use rules::{MAX_RECOMMENDATIONS, PROFESSIONAL_SUPPORT_SCORE};
pub use tiers::{clamp_score, classify, RiskTier, MAX_SCORE, MIN_SCORE};

use serde::{Deserialize, Serialize};

use super::domain::{FormAnswers, FormValue};

/// Urgency of a recommendation, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critico,
    Advertencia,
    Consejo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    Alto,
    Medio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Recommendation {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Raw-input threshold breach, reported independently of the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    /// Observed value formatted for display.
    pub value: String,
    pub impact: Impact,
}

/// Interpretation of one score against the answers that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    /// Clamped, unrounded.
    pub score: f64,
    pub tier: RiskTier,
    pub recommendations: Vec<Recommendation>,
    pub risk_factors: Vec<RiskFactor>,
}

pub fn interpret(raw_score: f64, form: &FormAnswers) -> Interpretation {
    let score = clamp_score(raw_score);
    let signals = Signals::read(form);

    Interpretation {
        score,
        tier: classify(score),
        recommendations: rules::recommend(&signals, score),
        risk_factors: factors::risk_factors(&signals),
    }
}

pub fn recommend(form: &FormAnswers, score: f64) -> Vec<Recommendation> {
    rules::recommend(&Signals::read(form), clamp_score(score))
}

pub fn risk_factors(form: &FormAnswers) -> Vec<RiskFactor> {
    factors::risk_factors(&Signals::read(form))
}

/// Raw answers the rule checks look at. An absent or unreadable answer is
/// `None` and keeps its checks silent.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Signals {
    pub daily_usage_hours: Option<f64>,
    pub social_media_hours: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub screen_before_bed_hours: Option<f64>,
    pub exercise_hours: Option<f64>,
    pub gaming_hours: Option<f64>,
    pub phone_checks_per_day: Option<i64>,
}

impl Signals {
    fn read(form: &FormAnswers) -> Self {
        let decimal =
            |value: &Option<FormValue>| value.as_ref().and_then(FormValue::as_decimal);

        Self {
            daily_usage_hours: decimal(&form.daily_usage_hours),
            social_media_hours: decimal(&form.time_social_media),
            sleep_hours: decimal(&form.sleep_hours),
            screen_before_bed_hours: decimal(&form.screen_time_before_bed),
            exercise_hours: decimal(&form.exercise_hours),
            gaming_hours: decimal(&form.time_gaming),
            phone_checks_per_day: form
                .phone_checks_per_day
                .as_ref()
                .and_then(|value| value.as_integer()),
        }
    }
}
