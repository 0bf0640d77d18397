use super::common::*;
use serde_json::json;

use crate::prediction::artifact::CategoricalField;
use crate::prediction::domain::{FormAnswers, FormValue, ProfileData};
use crate::prediction::features::{FeatureBuilder, FeatureName, FeatureOrder, FeatureVector};

fn build(form: &FormAnswers, profile: Option<&ProfileData>) -> FeatureVector {
    let encoders = encoders();
    let order = dataset_order();
    FeatureBuilder::new(&encoders, &order)
        .build(form, profile)
        .expect("features build")
}

fn form(value: serde_json::Value) -> FormAnswers {
    serde_json::from_value(value).expect("form deserializes")
}

#[test]
fn empty_form_yields_documented_defaults() {
    let vector = build(&FormAnswers::default(), None);
    assert_eq!(vector.values(), all_defaults_vector().as_slice());
}

#[test]
fn explicit_defaults_match_omitted_fields() {
    let baseline = build(&FormAnswers::default(), None);
    let explicit = [
        json!({ "daily_usage": 5.0 }),
        json!({ "sleephours": 7.0 }),
        json!({ "academic_perf": 4.0 }),
        json!({ "exercise": 1.0 }),
        json!({ "screen_before_bed": 1.0 }),
        json!({ "checks_per_day": 50 }),
        json!({ "apps_daily": [] }),
        json!({ "time_social_media": 2.0 }),
        json!({ "time_gaming": 1.0 }),
        json!({ "time_education": 0.5 }),
        json!({ "purpose": "otro" }),
        json!({ "weekend_usage": 6.0 }),
        json!({ "age": 16 }),
        json!({ "gender": "O" }),
    ];

    for answer in explicit {
        let vector = build(&form(answer.clone()), None);
        assert_eq!(vector, baseline, "explicit default {answer} changed the vector");
    }
}

#[test]
fn malformed_answers_fall_back_to_defaults() {
    let baseline = build(&FormAnswers::default(), None);
    let vector = build(
        &form(json!({
            "daily_usage": "bastante",
            "sleephours": true,
            "academic_perf": "n/a",
            "checks_per_day": "50.5",
            "purpose": 7,
            "gender": ["F"],
            "weekend_usage": { "hours": 3 },
        })),
        None,
    );
    assert_eq!(vector, baseline);
}

#[test]
fn profile_overrides_form_identity() {
    let answers = form(json!({ "age": 13, "gender": "M" }));
    let profile = ProfileData {
        age: Some(FormValue::from(17_i64)),
        gender: Some(FormValue::from("F")),
        school_grade: Some(FormValue::from("Preparatoria")),
    };

    let vector = build(&answers, Some(&profile));
    assert_eq!(vector.get(FeatureName::Age), Some(17.0));
    assert_eq!(vector.get(FeatureName::Gender), Some(0.0));
    assert_eq!(vector.get(FeatureName::SchoolGrade), Some(1.0));
}

#[test]
fn partial_profile_falls_back_to_form_answers() {
    let answers = form(json!({ "age": "14", "gender": "masculino" }));
    let profile = ProfileData {
        school_grade: Some(FormValue::from("  ")),
        ..ProfileData::default()
    };

    let vector = build(&answers, Some(&profile));
    assert_eq!(vector.get(FeatureName::Age), Some(14.0));
    assert_eq!(vector.get(FeatureName::Gender), Some(1.0));
    assert_eq!(vector.get(FeatureName::SchoolGrade), Some(2.0));
}

#[test]
fn loosely_typed_profile_is_coerced_or_skipped() {
    let answers = form(json!({ "age": 13, "gender": "F" }));
    let profile: ProfileData = serde_json::from_value(json!({
        "edad": "17",
        "genero": 1,
        "grado_escolaridad": 9,
    }))
    .expect("profile deserializes");

    let vector = build(&answers, Some(&profile));
    assert_eq!(vector.get(FeatureName::Age), Some(17.0));
    assert_eq!(vector.get(FeatureName::Gender), Some(0.0));
    assert_eq!(vector.get(FeatureName::SchoolGrade), Some(2.0));

    let profile: ProfileData =
        serde_json::from_value(json!({ "edad": 17.0 })).expect("profile deserializes");
    let vector = build(&answers, Some(&profile));
    assert_eq!(vector.get(FeatureName::Age), Some(17.0));

    let profile: ProfileData = serde_json::from_value(json!({ "edad": "diecisiete" }))
        .expect("profile deserializes");
    let vector = build(&answers, Some(&profile));
    assert_eq!(vector.get(FeatureName::Age), Some(13.0));
}

#[test]
fn academic_grade_scales_to_percent_and_truncates() {
    let vector = build(&form(json!({ "academic_perf": 3.33 })), None);
    assert_eq!(vector.get(FeatureName::AcademicPerformance), Some(66.0));

    let vector = build(&form(json!({ "academic_perf": "5" })), None);
    assert_eq!(vector.get(FeatureName::AcademicPerformance), Some(100.0));
}

#[test]
fn app_selection_counts_items() {
    let vector = build(
        &form(json!({ "apps_daily": ["tiktok", "instagram", "whatsapp"] })),
        None,
    );
    assert_eq!(vector.get(FeatureName::AppsUsedDaily), Some(3.0));

    let vector = build(&form(json!({ "apps_daily": "tiktok" })), None);
    assert_eq!(vector.get(FeatureName::AppsUsedDaily), Some(10.0));
}

#[test]
fn unknown_purpose_encodes_as_other() {
    let encoders = encoders();
    let other = encoders
        .encode(CategoricalField::PhoneUsagePurpose, "Other")
        .expect("Other is fitted") as f64;

    let vector = build(&form(json!({ "purpose": "streaming" })), None);
    assert_eq!(vector.get(FeatureName::PhoneUsagePurpose), Some(other));

    let vector = build(&form(json!({ "purpose": "redes" })), None);
    assert_eq!(vector.get(FeatureName::PhoneUsagePurpose), Some(4.0));
}

#[test]
fn vector_follows_artifact_column_order() {
    let mut columns: Vec<&str> = FeatureName::ALL.iter().map(|name| name.column()).collect();
    columns.swap(0, 20);
    let order = FeatureOrder::from_columns(&columns).expect("valid manifest");
    let encoders = encoders();

    let vector = FeatureBuilder::new(&encoders, &order)
        .build(&form(json!({ "weekend_usage": 9, "age": 15 })), None)
        .expect("features build");

    assert_eq!(vector.columns()[0], FeatureName::WeekendUsageHours);
    assert_eq!(vector.values()[0], 9.0);
    assert_eq!(vector.values()[20], 15.0);
}

#[test]
fn integer_checks_truncate_numbers() {
    let answers = FormAnswers {
        phone_checks_per_day: Some(FormValue::Number(120.9)),
        ..FormAnswers::default()
    };
    let vector = build(&answers, None);
    assert_eq!(vector.get(FeatureName::PhoneChecksPerDay), Some(120.0));
}
