//! API handlers and their JSON envelopes.
//!
//! Domain failures are reported inside a 200 envelope (`success` flag plus
//! a human-readable message) so the front end branches on the payload, not
//! the status code. Transport-level problems (malformed JSON, wrong
//! method, oversized body) still surface as HTTP errors.

use std::time::Instant;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::store::StoreError;

/// Body of `POST /api/apply_config`.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub zshrc_content: Option<String>,
    #[serde(default)]
    pub zsh_config: Option<String>,
}

/// Body of `POST /api/save_config`.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub config: String,
}

/// Success/failure envelope shared by the write endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Envelope of `GET /api/load_config`; `config` is present only on success.
#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn apply_config(
    State(state): State<AppState>,
    Json(req): Json<ApplyRequest>,
) -> Json<ApiResponse> {
    let start = Instant::now();

    let result = state
        .store
        .apply(req.zshrc_content.as_deref(), req.zsh_config.as_deref());

    Json(match result {
        Ok(()) => {
            metrics::record_request("apply_config", true, start);
            ApiResponse::ok("configuration applied")
        }
        Err(e) => {
            log_store_error("apply_config", &e);
            metrics::record_request("apply_config", false, start);
            ApiResponse::failed(format!("failed to apply configuration: {e}"))
        }
    })
}

pub async fn save_config(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> Json<ApiResponse> {
    let start = Instant::now();

    Json(match state.store.save(&req.config) {
        Ok(()) => {
            metrics::record_request("save_config", true, start);
            ApiResponse::ok("configuration saved")
        }
        Err(e) => {
            log_store_error("save_config", &e);
            metrics::record_request("save_config", false, start);
            ApiResponse::failed(format!("failed to save configuration: {e}"))
        }
    })
}

pub async fn load_config(State(state): State<AppState>) -> Json<LoadResponse> {
    let start = Instant::now();

    Json(match state.store.load() {
        Ok(config) => {
            metrics::record_request("load_config", true, start);
            LoadResponse {
                success: true,
                message: "configuration loaded".to_string(),
                config: Some(config),
            }
        }
        Err(e) => {
            log_store_error("load_config", &e);
            metrics::record_request("load_config", false, start);
            LoadResponse {
                success: false,
                message: format!("failed to load configuration: {e}"),
                config: None,
            }
        }
    })
}

/// An unrecoverable write means a slot file may be missing or truncated;
/// everything else left the previous file state intact.
fn log_store_error(endpoint: &'static str, err: &StoreError) {
    if err.is_unrecoverable() {
        tracing::error!(endpoint, error = %err, "Slot file may be missing or truncated");
    } else {
        tracing::warn!(endpoint, error = %err, "Request failed");
    }
}
