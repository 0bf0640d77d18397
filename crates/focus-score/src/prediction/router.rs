use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{FormAnswers, ProfileData};
use super::predictor::Predictor;

/// Body of a prediction request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub form: FormAnswers,
    #[serde(default)]
    pub profile: Option<ProfileData>,
}

/// Router exposing the predictor over JSON.
pub fn prediction_router(predictor: Predictor) -> Router {
    Router::new()
        .route("/api/v1/predictions", post(predict_handler))
        .with_state(predictor)
}

pub(crate) async fn predict_handler(
    State(predictor): State<Predictor>,
    axum::Json(request): axum::Json<PredictionRequest>,
) -> Response {
    match predictor.predict(&request.form, request.profile.as_ref()) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(drift) => {
            let payload = json!({
                "error": drift.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
