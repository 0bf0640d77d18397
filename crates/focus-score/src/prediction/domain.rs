use serde::{Deserialize, Serialize};

use super::interpretation::{Recommendation, RiskFactor, RiskTier};

/// Raw value of a questionnaire answer as the client submitted it.
///
/// Answers are kept untyped until feature construction so a malformed value can
/// fall back to its default instead of rejecting the whole submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<serde_json::Value>),
    Unrecognized(serde_json::Value),
}

impl FormValue {
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FormValue::List(
            items
                .into_iter()
                .map(|item| serde_json::Value::String(item.into()))
                .collect(),
        )
    }

    /// Decimal reading: finite numbers or numeric strings.
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            FormValue::Number(value) if value.is_finite() => Some(*value),
            FormValue::Text(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite()),
            _ => None,
        }
    }

    /// Integer reading: numbers truncate toward zero, strings must be integral.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FormValue::Number(value) if value.is_finite() => Some(value.trunc() as i64),
            FormValue::Text(raw) => raw.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            FormValue::Text(raw) => Some(raw.as_str()),
            _ => None,
        }
    }

    pub fn item_count(&self) -> Option<usize> {
        match self {
            FormValue::List(items) => Some(items.len()),
            _ => None,
        }
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Number(value as f64)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

/// Questionnaire submission. Every answer is optional; defaults are applied when
/// features are built. Wire names follow the web form's field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormAnswers {
    #[serde(
        default,
        rename = "daily_usage",
        alias = "daily_usage_hours",
        skip_serializing_if = "Option::is_none"
    )]
    pub daily_usage_hours: Option<FormValue>,
    #[serde(
        default,
        rename = "sleephours",
        alias = "sleep_hours",
        skip_serializing_if = "Option::is_none"
    )]
    pub sleep_hours: Option<FormValue>,
    /// Self-assessed grades on a 0-5 scale.
    #[serde(
        default,
        rename = "academic_perf",
        alias = "academic_performance",
        skip_serializing_if = "Option::is_none"
    )]
    pub academic_performance: Option<FormValue>,
    /// Weekly exercise hours.
    #[serde(
        default,
        rename = "exercise",
        alias = "exercise_hours",
        skip_serializing_if = "Option::is_none"
    )]
    pub exercise_hours: Option<FormValue>,
    #[serde(
        default,
        rename = "screen_before_bed",
        alias = "screen_time_before_bed",
        skip_serializing_if = "Option::is_none"
    )]
    pub screen_time_before_bed: Option<FormValue>,
    #[serde(
        default,
        rename = "checks_per_day",
        alias = "phone_checks_per_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_checks_per_day: Option<FormValue>,
    /// Selected app identifiers; only the count feeds the model.
    #[serde(
        default,
        rename = "apps_daily",
        alias = "apps_used_daily",
        skip_serializing_if = "Option::is_none"
    )]
    pub apps_used_daily: Option<FormValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_social_media: Option<FormValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_gaming: Option<FormValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_education: Option<FormValue>,
    #[serde(
        default,
        rename = "purpose",
        alias = "usage_purpose",
        skip_serializing_if = "Option::is_none"
    )]
    pub usage_purpose: Option<FormValue>,
    #[serde(
        default,
        rename = "weekend_usage",
        alias = "weekend_usage_hours",
        skip_serializing_if = "Option::is_none"
    )]
    pub weekend_usage_hours: Option<FormValue>,
    /// Only consulted when no profile is supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<FormValue>,
    /// Only consulted when no profile is supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<FormValue>,
}

/// Account data kept by the hosting application. Takes precedence over the
/// identity answers in [`FormAnswers`].
///
/// Stored account values are loosely typed; a malformed field is skipped when
/// the features are built rather than rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default, alias = "edad", skip_serializing_if = "Option::is_none")]
    pub age: Option<FormValue>,
    #[serde(default, alias = "genero", skip_serializing_if = "Option::is_none")]
    pub gender: Option<FormValue>,
    #[serde(
        default,
        alias = "grado_escolaridad",
        skip_serializing_if = "Option::is_none"
    )]
    pub school_grade: Option<FormValue>,
}

/// Raw answers echoed back for display, exactly as submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedInputs {
    pub daily_usage_hours: FormValue,
    pub apps_used: FormValue,
    pub social_media_hours: FormValue,
    pub sleep_hours: FormValue,
}

impl AnalyzedInputs {
    pub(crate) fn echo(form: &FormAnswers) -> Self {
        let zero = FormValue::Number(0.0);
        Self {
            daily_usage_hours: form.daily_usage_hours.clone().unwrap_or(zero.clone()),
            apps_used: form
                .apps_used_daily
                .clone()
                .unwrap_or(FormValue::List(Vec::new())),
            social_media_hours: form.time_social_media.clone().unwrap_or(zero.clone()),
            sleep_hours: form.sleep_hours.clone().unwrap_or(zero),
        }
    }
}

/// Consolidated outcome of one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Clamped to [1, 10] and rounded to two decimals.
    pub score: f64,
    pub tier: RiskTier,
    pub color: &'static str,
    pub description: &'static str,
    pub recommendations: Vec<Recommendation>,
    pub risk_factors: Vec<RiskFactor>,
    pub analyzed_inputs: AnalyzedInputs,
}
