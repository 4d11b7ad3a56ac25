//! HTTP surface of the classification relay.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use uuid::Uuid;

use super::category::Category;
use super::classifier::Classifier;

/// Classification request body. Missing or `null` fields are treated as
/// empty text; numbers and booleans are used as their JSON text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub subject: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub body: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

/// Classification success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub folder: String,
}

/// Shared state for relay handlers.
#[derive(Clone)]
pub struct RelayState {
    pub classifier: Arc<Classifier>,
}

/// Build the relay router: classify, category list and health, with
/// cross-origin requests allowed from anywhere.
pub fn relay_routes(classifier: Arc<Classifier>) -> Router {
    let state = RelayState { classifier };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/classify", post(classify))
        .route("/categories", get(categories))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "mail-sorter-relay"
    }))
}

// ── Categories ──────────────────────────────────────────────────────────

async fn categories() -> impl IntoResponse {
    let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
    Json(serde_json::json!({ "categories": names }))
}

// ── Classify ────────────────────────────────────────────────────────────

async fn classify(
    State(state): State<RelayState>,
    payload: Result<Json<ClassificationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection, "Unreadable classification request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Classification failed" })),
            );
        }
    };
    info!(
        request_id = %request_id,
        subject_len = request.subject.len(),
        body_len = request.body.len(),
        "Classification requested"
    );

    match state
        .classifier
        .classify(&request.subject, &request.body)
        .await
    {
        Ok(category) => {
            info!(request_id = %request_id, folder = %category, "Email classified");
            (
                StatusCode::OK,
                Json(serde_json::json!(ClassificationResult {
                    folder: category.to_string(),
                })),
            )
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Classification failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.public_message() })),
            )
        }
    }
}
