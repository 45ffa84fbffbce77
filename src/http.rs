//! HTTP surface for the scoring engine. Routing and handlers live here
//! so the binary stays a thin shell and the routes can be exercised
//! in-process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::assessments::{
    AssessmentResult, AttemptContext, QuestionDefinition, RawResponse, ScoringEngine,
};
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub readiness: Arc<AtomicBool>,
    pub metrics: PrometheusHandle,
    pub engine: Arc<ScoringEngine>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/assessments/score", post(score_attempt_endpoint))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreAttemptRequest {
    attempt_id: String,
    respondent_id: String,
    assessment_id: String,
    #[serde(default)]
    cultural_context: Option<String>,
    questions: Vec<QuestionDefinition>,
    responses: Vec<RawResponse>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreAttemptResponse {
    scored_at: DateTime<Utc>,
    result: AssessmentResult,
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn score_attempt_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<ScoreAttemptRequest>,
) -> Result<Json<ScoreAttemptResponse>, AppError> {
    let ScoreAttemptRequest {
        attempt_id,
        respondent_id,
        assessment_id,
        cultural_context,
        questions,
        responses,
    } = payload;

    let attempt = AttemptContext {
        attempt_id,
        respondent_id,
        assessment_id,
    };

    let result = state
        .engine
        .score(&attempt, &questions, &responses, cultural_context.as_deref())?;

    Ok(Json(ScoreAttemptResponse {
        scored_at: Utc::now(),
        result,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::{
        CulturalAdjustmentTable, Dimension, QuestionId, ResponseValue, ScoringOptions,
    };
    use axum_prometheus::PrometheusMetricLayer;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        // The metric layer installs a process-global recorder, which can
        // only be set once; share a single handle across all tests.
        static METRICS: std::sync::OnceLock<PrometheusHandle> = std::sync::OnceLock::new();
        let handle = METRICS
            .get_or_init(|| PrometheusMetricLayer::pair().1)
            .clone();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: handle,
            engine: Arc::new(ScoringEngine::new(
                CulturalAdjustmentTable::identity(),
                ScoringOptions::default(),
            )),
        }
    }

    fn questions() -> Vec<QuestionDefinition> {
        Dimension::ALL
            .iter()
            .enumerate()
            .map(|(index, dimension)| QuestionDefinition {
                id: QuestionId(format!("q-{}", dimension.label())),
                assessment_id: "apest-standard-v1".to_string(),
                dimension: dimension.label().to_string(),
                weight: 1.0,
                reverse_scored: false,
                answer_options: Vec::new(),
                scale_min: 1.0,
                scale_max: 5.0,
                order_index: index as u32,
            })
            .collect()
    }

    fn responses() -> Vec<RawResponse> {
        let values: [(&str, f32); 5] = [
            ("q-apostolic", 5.0),
            ("q-prophetic", 3.0),
            ("q-evangelistic", 3.0),
            ("q-shepherding", 3.0),
            ("q-teaching", 3.0),
        ];
        values
            .iter()
            .map(|(id, value)| RawResponse {
                question_id: QuestionId(id.to_string()),
                respondent_id: "user-http".to_string(),
                value: Some(ResponseValue::Numeric(*value)),
                response_time_seconds: Some(8),
                confidence: None,
                skipped: false,
            })
            .collect()
    }

    fn score_payload(questions: Vec<QuestionDefinition>) -> Value {
        json!({
            "attempt_id": "attempt-http-001",
            "respondent_id": "user-http",
            "assessment_id": "apest-standard-v1",
            "questions": questions,
            "responses": responses(),
        })
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn score_route_returns_the_assembled_result() {
        let response = router(test_state())
            .oneshot(
                axum::http::Request::post("/api/v1/assessments/score")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&score_payload(questions())).expect("serializes"),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert!(payload.get("scored_at").is_some());
        let result = payload.get("result").expect("result present");
        assert_eq!(result["primary_gift"], "apostolic");
        assert_eq!(result["secondary_gift"], "prophetic");
        assert_eq!(result["completion_percentage"], 100);
    }

    #[tokio::test]
    async fn score_route_rejects_a_corrupt_question_bank() {
        let mut corrupt = questions();
        corrupt[1].dimension = "charisma".to_string();

        let response = router(test_state())
            .oneshot(
                axum::http::Request::post("/api/v1/assessments/score")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&score_payload(corrupt)).expect("serializes"),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        let message = payload["error"].as_str().expect("error message");
        assert!(message.contains("charisma"));
    }

    #[tokio::test]
    async fn health_route_reports_ok() {
        let response = router(test_state())
            .oneshot(
                axum::http::Request::get("/health")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_route_reflects_the_flag() {
        let state = test_state();
        state.readiness.store(false, Ordering::Release);

        let response = router(state)
            .oneshot(
                axum::http::Request::get("/ready")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
