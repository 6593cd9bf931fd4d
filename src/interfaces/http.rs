//! HTTP intake surface.
//!
//! Maps the engine's verdicts onto a uniform response envelope: `failed`
//! becomes 400, `pending` and `successful` become 200. Payload-shape
//! problems are caught at the JSON extractor; the pipeline never sees
//! them.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::domain::ports::{EvaluationRequest, SharedInstructionService};
use crate::domain::verdict::{TransferStatus, Verdict};

/// Wire envelope for every response from the intake surface.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: u16,
    pub message: String,
    pub data: Option<Verdict>,
}

pub fn router(service: SharedInstructionService) -> Router {
    Router::new()
        .route("/payment-instructions", post(submit_instruction))
        .route("/health", get(health))
        .with_state(service)
}

async fn health() -> &'static str {
    "ok"
}

async fn submit_instruction(
    State(service): State<SharedInstructionService>,
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> (StatusCode, Json<Envelope>) {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejected malformed payload");
            return envelope(StatusCode::BAD_REQUEST, "invalid request payload".to_string(), None);
        }
    };

    match service.evaluate(request).await {
        Ok(verdict) => {
            let status = match verdict.status {
                TransferStatus::Failed => StatusCode::BAD_REQUEST,
                TransferStatus::Pending | TransferStatus::Successful => StatusCode::OK,
            };
            let message = if verdict.status_reason.is_empty() {
                default_message(verdict.status).to_string()
            } else {
                verdict.status_reason.clone()
            };
            tracing::info!(
                status = %verdict.status,
                code = verdict.status_code.as_str(),
                "instruction evaluated"
            );
            envelope(status, message, Some(verdict))
        }
        Err(error) => {
            tracing::error!(%error, "instruction evaluation failed");
            envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
                None,
            )
        }
    }
}

fn envelope(
    status: StatusCode,
    message: String,
    data: Option<Verdict>,
) -> (StatusCode, Json<Envelope>) {
    (
        status,
        Json(Envelope {
            status: status.as_u16(),
            message,
            data,
        }),
    )
}

fn default_message(status: TransferStatus) -> &'static str {
    match status {
        TransferStatus::Failed => "payment instruction failed",
        TransferStatus::Pending | TransferStatus::Successful => "payment instruction processed",
    }
}
