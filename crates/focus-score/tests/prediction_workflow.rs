//! End-to-end scenarios for the prediction pipeline, loaded from the JSON
//! fixture artifact the same way the service loads its trained model.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use focus_score::prediction::artifact::{ENCODERS_FILE, FEATURE_NAMES_FILE, MODEL_FILE};
use focus_score::prediction::{
    ArtifactError, FeatureName, FormAnswers, FormValue, Impact, Predictor, ProfileData,
    ResultArchiveRecord, RiskTier, Severity,
};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/artifact")
}

fn predictor() -> Predictor {
    Predictor::load(fixture_dir()).expect("fixture artifact loads")
}

fn form(value: Value) -> FormAnswers {
    serde_json::from_value(value).expect("form deserializes")
}

/// Copies the fixture into a scratch directory so single files can be broken.
fn scratch_artifact(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "focus-score-{}-{name}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("scratch dir");
    for file in [MODEL_FILE, ENCODERS_FILE, FEATURE_NAMES_FILE] {
        fs::copy(fixture_dir().join(file), dir.join(file)).expect("copy fixture file");
    }
    dir
}

#[test]
fn heavy_usage_scenario_reports_very_high_risk() {
    let result = predictor()
        .predict(
            &form(json!({
                "daily_usage": 8,
                "time_social_media": 4,
                "sleephours": 5,
                "screen_before_bed": 2,
                "exercise": 0,
            })),
            None,
        )
        .expect("prediction succeeds");

    assert_eq!(result.score, 9.7);
    assert_eq!(result.tier, RiskTier::MuyAlto);

    let titles: Vec<&str> = result
        .recommendations
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(
        titles,
        [
            "Reduce el tiempo de uso del celular",
            "Limita el tiempo en redes sociales",
            "Mejora tus habitos de sueno",
            "Evita pantallas antes de dormir",
            "Aumenta la actividad fisica",
        ]
    );
    assert_eq!(result.recommendations[0].severity, Severity::Critico);
    assert_eq!(
        result.recommendations[0].message,
        "Usas 8.0 horas diarias. Intenta reducir a 4-5 horas estableciendo limites en las apps."
    );

    let factors: Vec<(&str, &str, Impact)> = result
        .risk_factors
        .iter()
        .map(|f| (f.factor.as_str(), f.value.as_str(), f.impact))
        .collect();
    assert_eq!(
        factors,
        [
            ("Uso excesivo del celular", "8.0 horas/dia", Impact::Alto),
            ("Tiempo elevado en redes sociales", "4.0 horas/dia", Impact::Alto),
        ]
    );
}

#[test]
fn empty_submission_uses_every_default() {
    let predictor = predictor();
    let answers = FormAnswers::default();

    let features = predictor.features(&answers, None).expect("features build");
    assert_eq!(
        features.values(),
        [
            16.0, 2.0, 2.0, 5.0, 7.0, 80.0, 5.0, 1.0, 5.0, 5.0, 5.0, 0.0, 1.0, 50.0, 0.0, 2.0,
            1.0, 0.5, 3.0, 5.0, 6.0,
        ]
        .as_slice()
    );

    let result = predictor.predict(&answers, None).expect("prediction succeeds");
    assert_eq!(result.score, 3.5);
    assert_eq!(result.tier, RiskTier::ModeradoBajo);
    assert!(result.risk_factors.is_empty());
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(
        result.recommendations[0].title,
        "Implementa la tecnica Pomodoro"
    );
}

#[test]
fn profile_takes_precedence_over_form_identity() {
    let predictor = predictor();
    let answers = form(json!({ "age": 13, "gender": "M" }));
    let profile = ProfileData {
        age: Some(FormValue::from(17_i64)),
        gender: Some(FormValue::from("F")),
        school_grade: None,
    };

    let features = predictor
        .features(&answers, Some(&profile))
        .expect("features build");
    assert_eq!(features.get(FeatureName::Age), Some(17.0));
    assert_eq!(features.get(FeatureName::Gender), Some(0.0));
}

#[test]
fn unknown_purpose_is_scored_as_other() {
    let features = predictor()
        .features(&form(json!({ "purpose": "maquillaje" })), None)
        .expect("unknown purpose still encodes");
    assert_eq!(features.get(FeatureName::PhoneUsagePurpose), Some(3.0));
}

#[test]
fn identical_requests_produce_identical_results() {
    let predictor = predictor();
    let answers = form(json!({
        "daily_usage": "6.5",
        "apps_daily": ["tiktok"],
        "checks_per_day": 101,
        "time_gaming": 2.5,
    }));

    let first = serde_json::to_vec(&predictor.predict(&answers, None).expect("first"))
        .expect("serializes");
    let second = serde_json::to_vec(&predictor.predict(&answers, None).expect("second"))
        .expect("serializes");
    assert_eq!(first, second);
}

#[test]
fn archive_record_captures_prediction() {
    let predictor = predictor();
    let answers = form(json!({ "daily_usage": 7 }));
    let result = predictor.predict(&answers, None).expect("prediction succeeds");
    let created_at = Utc
        .with_ymd_and_hms(2025, 5, 2, 18, 0, 0)
        .single()
        .expect("valid timestamp");

    let record = ResultArchiveRecord::capture("42", &answers, &result, created_at)
        .expect("record captures");

    assert_eq!(record.tier, result.tier.label());
    assert_eq!(record.score, result.score);
    let stored: FormAnswers =
        serde_json::from_str(&record.form_payload).expect("form payload round trips");
    assert_eq!(stored, answers);
}

#[test]
fn missing_artifact_directory_fails_to_load() {
    let err = Predictor::load(fixture_dir().join("does-not-exist")).expect_err("no artifact");
    match err {
        ArtifactError::Read { path, .. } => assert!(path.ends_with(MODEL_FILE)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn corrupt_encoders_fail_to_load() {
    let dir = scratch_artifact("corrupt-encoders");
    fs::write(dir.join(ENCODERS_FILE), "{ not json").expect("overwrite encoders");

    let err = Predictor::load(&dir).expect_err("encoders unreadable");
    assert!(matches!(err, ArtifactError::Parse { .. }));
    fs::remove_dir_all(dir).ok();
}

#[test]
fn corrupt_model_fails_to_load() {
    let dir = scratch_artifact("corrupt-model");
    fs::write(dir.join(MODEL_FILE), "{ not json").expect("overwrite model");

    let err = Predictor::load(&dir).expect_err("model unreadable");
    match err {
        ArtifactError::Parse { ref path, .. } => assert!(path.ends_with(MODEL_FILE)),
        ref other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains(MODEL_FILE));
    fs::remove_dir_all(dir).ok();
}

#[test]
fn unknown_manifest_column_fails_to_load() {
    let dir = scratch_artifact("bad-manifest");
    let mut columns: Vec<String> = serde_json::from_str(
        &fs::read_to_string(dir.join(FEATURE_NAMES_FILE)).expect("read manifest"),
    )
    .expect("manifest parses");
    columns[4] = "Location".to_string();
    fs::write(
        dir.join(FEATURE_NAMES_FILE),
        serde_json::to_string(&columns).expect("serialize manifest"),
    )
    .expect("overwrite manifest");

    let err = Predictor::load(&dir).expect_err("manifest rejected");
    assert!(matches!(err, ArtifactError::FeatureManifest { .. }));
    assert!(err.to_string().contains("Location"));
    fs::remove_dir_all(dir).ok();
}
