//! HTTP endpoint handlers. Thin wrappers that forward to the core pipeline
//! and map outcomes to status codes. Upstream and parse diagnostics stay in
//! the server log; clients only ever see the generic failure message.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, instrument, warn};

use crate::domain::validate;
use crate::logic::generate_question;
use crate::protocol::{ErrorOut, GenerateIn, HealthOut};
use crate::state::AppState;

const GENERATION_FAILED: &str = "題目生成失敗";
const BAD_REQUEST_FORMAT: &str = "無效的請求格式";

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, payload))]
pub async fn http_generate_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateIn>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(target: "generate", error = %rejection, "Rejected malformed request body");
            return (StatusCode::BAD_REQUEST, Json(ErrorOut::new(BAD_REQUEST_FORMAT)))
                .into_response();
        }
    };

    let req = match validate(&body) {
        Ok(req) => req,
        Err(e) => {
            warn!(
                target: "generate",
                subject = %body.subject,
                difficulty = %body.difficulty,
                question_type = %body.question_type,
                reason = %e,
                "Rejected invalid request"
            );
            return (StatusCode::BAD_REQUEST, Json(ErrorOut::new(e.to_string()))).into_response();
        }
    };

    match generate_question(&state, &req).await {
        Ok(question) => {
            info!(target: "generate", question_type = %question.question_type(), "Generation succeeded");
            (StatusCode::OK, Json(question)).into_response()
        }
        Err(e) => {
            error!(target: "generate", error = %e, "Generation pipeline failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorOut::new(GENERATION_FAILED)))
                .into_response()
        }
    }
}
