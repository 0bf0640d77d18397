use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::prediction::artifact::{LabelEncoders, RandomForest, ScoringArtifact, ScoringModel};
use crate::prediction::features::{FeatureName, FeatureOrder};
use crate::prediction::Predictor;

pub(super) const FIXTURE_FOREST: &str = r#"{
    "n_features": 21,
    "trees": [
        {
            "children_left":  [1, 3, -1, -1, -1],
            "children_right": [2, 4, -1, -1, -1],
            "feature":        [3, 15, -2, -2, -2],
            "threshold":      [6.0, 3.0, -2.0, -2.0, -2.0],
            "value":          [6.0, 4.0, 9.6, 3.2, 7.4]
        },
        {
            "children_left":  [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature":        [3, -2, -2],
            "threshold":      [7.0, -2.0, -2.0],
            "value":          [6.0, 3.8, 9.8]
        }
    ]
}"#;

pub(super) fn encoder_classes() -> BTreeMap<String, Vec<String>> {
    let entries: [(&str, &[&str]); 3] = [
        ("Gender", &["Female", "Male", "Other"]),
        ("School_Grade", &["10th", "11th", "12th", "7th", "8th", "9th"]),
        (
            "Phone_Usage_Purpose",
            &["Browsing", "Education", "Gaming", "Other", "Social Media"],
        ),
    ];
    entries
        .iter()
        .map(|(column, labels)| {
            (
                column.to_string(),
                labels.iter().map(|label| label.to_string()).collect(),
            )
        })
        .collect()
}

pub(super) fn encoders() -> LabelEncoders {
    LabelEncoders::from_classes(encoder_classes()).expect("fixture encoders build")
}

pub(super) fn dataset_order() -> FeatureOrder {
    let columns: Vec<&str> = FeatureName::ALL.iter().map(|name| name.column()).collect();
    FeatureOrder::from_columns(&columns).expect("dataset order is a valid manifest")
}

/// Vector produced by an empty form with no profile, in dataset order.
pub(super) fn all_defaults_vector() -> Vec<f64> {
    vec![
        16.0, 2.0, 2.0, 5.0, 7.0, 80.0, 5.0, 1.0, 5.0, 5.0, 5.0, 0.0, 1.0, 50.0, 0.0, 2.0, 1.0,
        0.5, 3.0, 5.0, 6.0,
    ]
}

pub(super) fn fixture_predictor() -> Predictor {
    let forest = RandomForest::from_export_str(FIXTURE_FOREST).expect("fixture forest validates");
    let artifact = ScoringArtifact::from_parts(Box::new(forest), encoders(), dataset_order())
        .expect("fixture artifact assembles");
    Predictor::new(artifact)
}

/// Returns a fixed score and remembers every vector it was asked to score.
pub(super) struct RecordingModel {
    pub output: f64,
    pub seen: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl ScoringModel for RecordingModel {
    fn feature_count(&self) -> usize {
        FeatureName::ALL.len()
    }

    fn score(&self, features: &[f64]) -> f64 {
        self.seen
            .lock()
            .expect("recording lock")
            .push(features.to_vec());
        self.output
    }

    fn describe(&self) -> String {
        format!("recording model returning {}", self.output)
    }
}

pub(super) fn recording_predictor(output: f64) -> (Predictor, Arc<Mutex<Vec<Vec<f64>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let model = RecordingModel {
        output,
        seen: Arc::clone(&seen),
    };
    let artifact = ScoringArtifact::from_parts(Box::new(model), encoders(), dataset_order())
        .expect("recording artifact assembles");
    (Predictor::new(artifact), seen)
}

pub(super) fn scenario_a_form() -> Value {
    json!({
        "daily_usage": 8,
        "time_social_media": 4,
        "sleephours": 5,
        "screen_before_bed": 2,
        "exercise": 0,
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
