//! `POST /classify` and `GET /health`.

use std::{path::PathBuf, sync::Arc, time::Instant};

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    ai::InferenceError,
    config::CorsConfig,
    domain::TopicLabel,
    pipeline::Classify,
};

use super::cors::cors_layer;

const ASSETS_UNAVAILABLE: &str = "Server failed to load machine learning assets on startup.";

/// Shared handler state. `classifier` is `None` when assets failed to load.
pub struct ApiState {
    classifier: Option<Arc<dyn Classify>>,
    model_dir: PathBuf,
    loaded_at: Option<DateTime<Utc>>,
}

impl ApiState {
    pub fn ready(classifier: Arc<dyn Classify>, model_dir: PathBuf, loaded_at: DateTime<Utc>) -> Self {
        Self {
            classifier: Some(classifier),
            model_dir,
            loaded_at: Some(loaded_at),
        }
    }

    pub fn degraded(model_dir: PathBuf) -> Self {
        Self {
            classifier: None,
            model_dir,
            loaded_at: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailInput {
    pub email_text: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    assets_loaded: bool,
    model_dir: String,
    loaded_at: Option<DateTime<Utc>>,
    labels: Vec<&'static str>,
}

pub fn router(state: Arc<ApiState>, cors: &CorsConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/classify", post(classify_email))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::disable())
        .layer(cors_layer(cors)?)
        .with_state(state))
}

async fn classify_email(State(state): State<Arc<ApiState>>, Json(input): Json<EmailInput>) -> Response {
    let Some(classifier) = state.classifier.clone() else {
        tracing::warn!(target: "http", "classification requested while assets are unavailable");
        return error_response(StatusCode::SERVICE_UNAVAILABLE, ASSETS_UNAVAILABLE.to_string());
    };

    let text_len = input.email_text.len();
    let started = Instant::now();
    let outcome =
        tokio::task::spawn_blocking(move || classifier.classify(&input.email_text)).await;

    let err = match outcome {
        Ok(Ok(result)) => {
            tracing::info!(
                target: "http",
                text_len,
                classification = ?result.primary_classification,
                labels = result.detailed_labels.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "email classified"
            );
            return Json(result).into_response();
        }
        Ok(Err(err)) => err,
        Err(join_err) => InferenceError::Aborted(join_err.to_string()),
    };
    tracing::error!(target: "http", error = %err, text_len, "classification failed");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("An error occurred during classification: {err}"),
    )
}

async fn health(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    let assets_loaded = state.is_ready();
    Json(HealthResponse {
        status: if assets_loaded { "ok" } else { "degraded" },
        assets_loaded,
        model_dir: state.model_dir.display().to_string(),
        loaded_at: state.loaded_at,
        labels: TopicLabel::names(),
    })
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
