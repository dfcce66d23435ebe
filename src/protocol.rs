//! Public request/response DTOs for the HTTP API (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

/// Inbound body of POST /api/v1/generate_question.
/// Fields arrive as free strings; membership is checked by `domain::validate`
/// so each failure category can get its own message. Absent keys default to
/// empty strings so they report 缺少必填欄位 instead of a body-format error.
#[derive(Clone, Debug, Deserialize)]
pub struct GenerateIn {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub question_type: String,
}

/// Error envelope for every non-200 response.
#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}

impl ErrorOut {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
