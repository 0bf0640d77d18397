//! Feature construction: questionnaire answers to the model's numeric columns.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::artifact::{CategoricalField, LabelEncoders, VocabularyDrift};
use super::categories::{map_gender, map_school_grade, map_usage_purpose, DEFAULT_SCHOOL_LEVEL};
use super::domain::{FormAnswers, FormValue, ProfileData};

/// Columns of the training dataset, in dataset order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeatureName {
    Age,
    Gender,
    SchoolGrade,
    DailyUsageHours,
    SleepHours,
    AcademicPerformance,
    SocialInteractions,
    ExerciseHours,
    AnxietyLevel,
    DepressionLevel,
    SelfEsteem,
    ParentalControl,
    ScreenTimeBeforeBed,
    PhoneChecksPerDay,
    AppsUsedDaily,
    TimeOnSocialMedia,
    TimeOnGaming,
    TimeOnEducation,
    PhoneUsagePurpose,
    FamilyCommunication,
    WeekendUsageHours,
}

impl FeatureName {
    pub const ALL: [FeatureName; 21] = [
        FeatureName::Age,
        FeatureName::Gender,
        FeatureName::SchoolGrade,
        FeatureName::DailyUsageHours,
        FeatureName::SleepHours,
        FeatureName::AcademicPerformance,
        FeatureName::SocialInteractions,
        FeatureName::ExerciseHours,
        FeatureName::AnxietyLevel,
        FeatureName::DepressionLevel,
        FeatureName::SelfEsteem,
        FeatureName::ParentalControl,
        FeatureName::ScreenTimeBeforeBed,
        FeatureName::PhoneChecksPerDay,
        FeatureName::AppsUsedDaily,
        FeatureName::TimeOnSocialMedia,
        FeatureName::TimeOnGaming,
        FeatureName::TimeOnEducation,
        FeatureName::PhoneUsagePurpose,
        FeatureName::FamilyCommunication,
        FeatureName::WeekendUsageHours,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            FeatureName::Age => "Age",
            FeatureName::Gender => "Gender",
            FeatureName::SchoolGrade => "School_Grade",
            FeatureName::DailyUsageHours => "Daily_Usage_Hours",
            FeatureName::SleepHours => "Sleep_Hours",
            FeatureName::AcademicPerformance => "Academic_Performance",
            FeatureName::SocialInteractions => "Social_Interactions",
            FeatureName::ExerciseHours => "Exercise_Hours",
            FeatureName::AnxietyLevel => "Anxiety_Level",
            FeatureName::DepressionLevel => "Depression_Level",
            FeatureName::SelfEsteem => "Self_Esteem",
            FeatureName::ParentalControl => "Parental_Control",
            FeatureName::ScreenTimeBeforeBed => "Screen_Time_Before_Bed",
            FeatureName::PhoneChecksPerDay => "Phone_Checks_Per_Day",
            FeatureName::AppsUsedDaily => "Apps_Used_Daily",
            FeatureName::TimeOnSocialMedia => "Time_on_Social_Media",
            FeatureName::TimeOnGaming => "Time_on_Gaming",
            FeatureName::TimeOnEducation => "Time_on_Education",
            FeatureName::PhoneUsagePurpose => "Phone_Usage_Purpose",
            FeatureName::FamilyCommunication => "Family_Communication",
            FeatureName::WeekendUsageHours => "Weekend_Usage_Hours",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.column() == column)
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Per-field defaults applied when an answer is absent or malformed.
pub mod defaults {
    pub const AGE: i64 = 16;
    pub const GENDER: &str = "O";
    pub const DAILY_USAGE_HOURS: f64 = 5.0;
    pub const SLEEP_HOURS: f64 = 7.0;
    /// 4.0 on the form's 0-5 scale.
    pub const ACADEMIC_PERFORMANCE: f64 = 80.0;
    pub const EXERCISE_HOURS: f64 = 1.0;
    pub const SCREEN_TIME_BEFORE_BED: f64 = 1.0;
    pub const PHONE_CHECKS_PER_DAY: i64 = 50;
    /// Used when the app selection is present but not a list.
    pub const APPS_WHEN_NOT_A_LIST: f64 = 10.0;
    pub const TIME_ON_SOCIAL_MEDIA: f64 = 2.0;
    pub const TIME_ON_GAMING: f64 = 1.0;
    pub const TIME_ON_EDUCATION: f64 = 0.5;
    pub const USAGE_PURPOSE: &str = "otro";
    pub const WEEKEND_USAGE_HOURS: f64 = 6.0;

    // The form never asks for these; the model still expects them.
    pub const SOCIAL_INTERACTIONS: f64 = 5.0;
    pub const ANXIETY_LEVEL: f64 = 5.0;
    pub const DEPRESSION_LEVEL: f64 = 5.0;
    pub const SELF_ESTEEM: f64 = 5.0;
    pub const PARENTAL_CONTROL: f64 = 0.0;
    pub const FAMILY_COMMUNICATION: f64 = 5.0;
}

/// Named feature values before they are laid out in artifact column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub age: f64,
    pub gender: f64,
    pub school_grade: f64,
    pub daily_usage_hours: f64,
    pub sleep_hours: f64,
    pub academic_performance: f64,
    pub social_interactions: f64,
    pub exercise_hours: f64,
    pub anxiety_level: f64,
    pub depression_level: f64,
    pub self_esteem: f64,
    pub parental_control: f64,
    pub screen_time_before_bed: f64,
    pub phone_checks_per_day: f64,
    pub apps_used_daily: f64,
    pub time_on_social_media: f64,
    pub time_on_gaming: f64,
    pub time_on_education: f64,
    pub phone_usage_purpose: f64,
    pub family_communication: f64,
    pub weekend_usage_hours: f64,
}

impl FeatureRecord {
    pub fn value(&self, name: FeatureName) -> f64 {
        match name {
            FeatureName::Age => self.age,
            FeatureName::Gender => self.gender,
            FeatureName::SchoolGrade => self.school_grade,
            FeatureName::DailyUsageHours => self.daily_usage_hours,
            FeatureName::SleepHours => self.sleep_hours,
            FeatureName::AcademicPerformance => self.academic_performance,
            FeatureName::SocialInteractions => self.social_interactions,
            FeatureName::ExerciseHours => self.exercise_hours,
            FeatureName::AnxietyLevel => self.anxiety_level,
            FeatureName::DepressionLevel => self.depression_level,
            FeatureName::SelfEsteem => self.self_esteem,
            FeatureName::ParentalControl => self.parental_control,
            FeatureName::ScreenTimeBeforeBed => self.screen_time_before_bed,
            FeatureName::PhoneChecksPerDay => self.phone_checks_per_day,
            FeatureName::AppsUsedDaily => self.apps_used_daily,
            FeatureName::TimeOnSocialMedia => self.time_on_social_media,
            FeatureName::TimeOnGaming => self.time_on_gaming,
            FeatureName::TimeOnEducation => self.time_on_education,
            FeatureName::PhoneUsagePurpose => self.phone_usage_purpose,
            FeatureName::FamilyCommunication => self.family_communication,
            FeatureName::WeekendUsageHours => self.weekend_usage_hours,
        }
    }
}

/// Column order recorded with the trained artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOrder {
    columns: Vec<FeatureName>,
}

impl FeatureOrder {
    /// Validates a manifest: every known column exactly once, nothing else.
    pub fn from_columns<S: AsRef<str>>(columns: &[S]) -> Result<Self, String> {
        let mut resolved = Vec::with_capacity(columns.len());
        for column in columns {
            let column = column.as_ref();
            let name = FeatureName::from_column(column)
                .ok_or_else(|| format!("unknown feature column '{column}'"))?;
            if resolved.contains(&name) {
                return Err(format!("feature column '{column}' listed twice"));
            }
            resolved.push(name);
        }

        if let Some(missing) = FeatureName::ALL
            .into_iter()
            .find(|name| !resolved.contains(name))
        {
            return Err(format!("feature column '{missing}' missing from manifest"));
        }

        Ok(Self { columns: resolved })
    }

    pub fn columns(&self) -> &[FeatureName] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn arrange(&self, record: &FeatureRecord) -> FeatureVector {
        FeatureVector {
            columns: self.columns.clone(),
            values: self.columns.iter().map(|name| record.value(*name)).collect(),
        }
    }
}

/// Model input: one value per column, in artifact order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    columns: Vec<FeatureName>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn columns(&self) -> &[FeatureName] {
        &self.columns
    }

    pub fn get(&self, name: FeatureName) -> Option<f64> {
        self.columns
            .iter()
            .position(|column| *column == name)
            .map(|index| self.values[index])
    }
}

/// Builds feature vectors against one artifact's encoders and column order.
pub struct FeatureBuilder<'a> {
    encoders: &'a LabelEncoders,
    order: &'a FeatureOrder,
}

impl<'a> FeatureBuilder<'a> {
    pub fn new(encoders: &'a LabelEncoders, order: &'a FeatureOrder) -> Self {
        Self { encoders, order }
    }

    pub fn build(
        &self,
        form: &FormAnswers,
        profile: Option<&ProfileData>,
    ) -> Result<FeatureVector, VocabularyDrift> {
        let record = self.record(form, profile)?;
        Ok(self.order.arrange(&record))
    }

    pub fn record(
        &self,
        form: &FormAnswers,
        profile: Option<&ProfileData>,
    ) -> Result<FeatureRecord, VocabularyDrift> {
        let age = match profile.and_then(|profile| {
            account_answer(profile.age.as_ref(), "profile.age", FormValue::as_integer)
        }) {
            Some(age) => age as f64,
            None => integer(&form.age, "age", defaults::AGE) as f64,
        };

        let gender_raw = match profile.and_then(|profile| {
            account_answer(profile.gender.as_ref(), "profile.gender", |value| {
                value.as_label().map(str::to_string)
            })
        }) {
            Some(gender) => gender,
            None => label(&form.gender, "gender", defaults::GENDER),
        };
        let gender = self
            .encoders
            .encode(CategoricalField::Gender, map_gender(&gender_raw).label())?;

        let grade_raw = profile
            .and_then(|profile| {
                account_answer(
                    profile.school_grade.as_ref(),
                    "profile.school_grade",
                    FormValue::as_label,
                )
            })
            .filter(|grade| !grade.trim().is_empty())
            .unwrap_or(DEFAULT_SCHOOL_LEVEL);
        let school_grade = self.encoders.encode(
            CategoricalField::SchoolGrade,
            map_school_grade(grade_raw).label(),
        )?;

        let purpose_raw = label(&form.usage_purpose, "purpose", defaults::USAGE_PURPOSE);
        let phone_usage_purpose = self.encoders.encode(
            CategoricalField::PhoneUsagePurpose,
            map_usage_purpose(&purpose_raw).label(),
        )?;

        let academic_performance = form
            .academic_performance
            .as_ref()
            .and_then(|value| match value.as_decimal() {
                Some(grade) => Some(((grade / 5.0) * 100.0).trunc()),
                None => {
                    malformed("academic_perf", value);
                    None
                }
            })
            .unwrap_or(defaults::ACADEMIC_PERFORMANCE);

        let apps_used_daily = match &form.apps_used_daily {
            None => 0.0,
            Some(value) => value
                .item_count()
                .map(|count| count as f64)
                .unwrap_or(defaults::APPS_WHEN_NOT_A_LIST),
        };

        Ok(FeatureRecord {
            age,
            gender: gender as f64,
            school_grade: school_grade as f64,
            daily_usage_hours: decimal(
                &form.daily_usage_hours,
                "daily_usage",
                defaults::DAILY_USAGE_HOURS,
            ),
            sleep_hours: decimal(&form.sleep_hours, "sleephours", defaults::SLEEP_HOURS),
            academic_performance,
            social_interactions: defaults::SOCIAL_INTERACTIONS,
            exercise_hours: decimal(&form.exercise_hours, "exercise", defaults::EXERCISE_HOURS),
            anxiety_level: defaults::ANXIETY_LEVEL,
            depression_level: defaults::DEPRESSION_LEVEL,
            self_esteem: defaults::SELF_ESTEEM,
            parental_control: defaults::PARENTAL_CONTROL,
            screen_time_before_bed: decimal(
                &form.screen_time_before_bed,
                "screen_before_bed",
                defaults::SCREEN_TIME_BEFORE_BED,
            ),
            phone_checks_per_day: integer(
                &form.phone_checks_per_day,
                "checks_per_day",
                defaults::PHONE_CHECKS_PER_DAY,
            ) as f64,
            apps_used_daily,
            time_on_social_media: decimal(
                &form.time_social_media,
                "time_social_media",
                defaults::TIME_ON_SOCIAL_MEDIA,
            ),
            time_on_gaming: decimal(&form.time_gaming, "time_gaming", defaults::TIME_ON_GAMING),
            time_on_education: decimal(
                &form.time_education,
                "time_education",
                defaults::TIME_ON_EDUCATION,
            ),
            phone_usage_purpose: phone_usage_purpose as f64,
            family_communication: defaults::FAMILY_COMMUNICATION,
            weekend_usage_hours: decimal(
                &form.weekend_usage_hours,
                "weekend_usage",
                defaults::WEEKEND_USAGE_HOURS,
            ),
        })
    }
}

fn decimal(value: &Option<FormValue>, field: &'static str, default: f64) -> f64 {
    match value {
        None => default,
        Some(value) => value.as_decimal().unwrap_or_else(|| {
            malformed(field, value);
            default
        }),
    }
}

fn integer(value: &Option<FormValue>, field: &'static str, default: i64) -> i64 {
    match value {
        None => default,
        Some(value) => value.as_integer().unwrap_or_else(|| {
            malformed(field, value);
            default
        }),
    }
}

fn label(value: &Option<FormValue>, field: &'static str, default: &str) -> String {
    match value {
        None => default.to_string(),
        Some(value) => match value.as_label() {
            Some(raw) => raw.to_string(),
            None => {
                malformed(field, value);
                default.to_string()
            }
        },
    }
}

/// Coerces a stored account value, treating a malformed one as absent so the
/// form answer or the default applies instead.
fn account_answer<'v, T>(
    value: Option<&'v FormValue>,
    field: &'static str,
    coerce: impl Fn(&'v FormValue) -> Option<T>,
) -> Option<T> {
    let value = value?;
    let coerced = coerce(value);
    if coerced.is_none() {
        malformed(field, value);
    }
    coerced
}

fn malformed(field: &'static str, value: &FormValue) {
    warn!(field, ?value, "malformed form answer, using default");
}
