//! Translation from the questionnaire's localized vocabulary to the labels the
//! encoders were fit on. Every mapping is total: unknown input lands on a
//! fallback category.

use serde::{Deserialize, Serialize};

/// Gender labels as they appear in the training dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// School grades present in the training dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchoolGrade {
    Seventh,
    Eighth,
    Ninth,
    Tenth,
    Eleventh,
    Twelfth,
}

impl SchoolGrade {
    pub const ALL: [SchoolGrade; 6] = [
        SchoolGrade::Seventh,
        SchoolGrade::Eighth,
        SchoolGrade::Ninth,
        SchoolGrade::Tenth,
        SchoolGrade::Eleventh,
        SchoolGrade::Twelfth,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SchoolGrade::Seventh => "7th",
            SchoolGrade::Eighth => "8th",
            SchoolGrade::Ninth => "9th",
            SchoolGrade::Tenth => "10th",
            SchoolGrade::Eleventh => "11th",
            SchoolGrade::Twelfth => "12th",
        }
    }
}

/// Dominant reason for picking up the phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsagePurpose {
    Education,
    SocialMedia,
    Gaming,
    Browsing,
    Other,
}

impl UsagePurpose {
    pub const ALL: [UsagePurpose; 5] = [
        UsagePurpose::Education,
        UsagePurpose::SocialMedia,
        UsagePurpose::Gaming,
        UsagePurpose::Browsing,
        UsagePurpose::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            UsagePurpose::Education => "Education",
            UsagePurpose::SocialMedia => "Social Media",
            UsagePurpose::Gaming => "Gaming",
            UsagePurpose::Browsing => "Browsing",
            UsagePurpose::Other => "Other",
        }
    }
}

/// Grade assumed when the account carries no school level.
pub const DEFAULT_SCHOOL_LEVEL: &str = "Universidad";

/// Grade used for levels outside the known vocabulary.
pub const FALLBACK_SCHOOL_GRADE: SchoolGrade = SchoolGrade::Tenth;

pub fn map_gender(raw: &str) -> Gender {
    match normalize(raw).as_str() {
        "m" | "masculino" | "male" => Gender::Male,
        "f" | "femenino" | "female" => Gender::Female,
        _ => Gender::Other,
    }
}

pub fn map_school_grade(raw: &str) -> SchoolGrade {
    let normalized = normalize(raw);
    if let Some(grade) = SchoolGrade::ALL
        .into_iter()
        .find(|grade| grade.label() == normalized)
    {
        return grade;
    }

    match normalized.as_str() {
        "primaria" => SchoolGrade::Seventh,
        "secundaria" => SchoolGrade::Ninth,
        "preparatoria" => SchoolGrade::Eleventh,
        "universidad" | "posgrado" | "doctorado" => SchoolGrade::Twelfth,
        _ => FALLBACK_SCHOOL_GRADE,
    }
}

pub fn map_usage_purpose(raw: &str) -> UsagePurpose {
    match normalize(raw).as_str() {
        "educacion" | "education" => UsagePurpose::Education,
        "redes" | "social media" => UsagePurpose::SocialMedia,
        "juegos" | "gaming" => UsagePurpose::Gaming,
        "entretenimiento" | "browsing" => UsagePurpose::Browsing,
        _ => UsagePurpose::Other,
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}
