//! Minimal Gemini client for our single use-case.
//!
//! We only call generateContent with one user part and hand back the raw
//! reply text. Calls are instrumented and log model name, latency, and token
//! usage (not contents).
//!
//! NOTE: We never log the API key; it travels in the x-goog-api-key header,
//! never in the URL.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::GenConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  pub temperature: f32,
  pub max_output_tokens: u32,
}

impl Gemini {
  /// Construct the client if we find GEMINI_API_KEY; otherwise return None.
  /// Env variables override the TOML-provided endpoint and model.
  pub fn from_env(cfg: &GenConfig) -> Option<Self> {
    let api_key = std::env::var("GEMINI_API_KEY").ok()?;
    let base_url = std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| cfg.base_url.clone());
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| cfg.model.clone());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .ok()?;

    Some(Self {
      client,
      api_key,
      base_url,
      model,
      temperature: cfg.temperature,
      max_output_tokens: cfg.max_output_tokens,
    })
  }

  /// One generateContent call; returns the first candidate's text verbatim.
  /// Any transport, auth, or response-shape problem is a single error to the
  /// caller; we never retry.
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  pub async fn generate_content(&self, prompt: &str) -> Result<String, String> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let req = GenerateContentRequest {
      contents: vec![ContentReq { parts: vec![PartReq { text: prompt.to_string() }] }],
      generation_config: GenerationConfig {
        temperature: self.temperature,
        max_output_tokens: self.max_output_tokens,
      },
    };

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "quizgen-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(API_KEY_HEADER, &self.api_key)
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_gemini_error(&body).unwrap_or(body);
      error!(%status, elapsed = ?start.elapsed(), "Gemini call failed");
      return Err(format!("Gemini HTTP {}: {}", status, msg));
    }

    let body: GenerateContentResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage_metadata {
      info!(
        prompt_tokens = ?usage.prompt_token_count,
        candidate_tokens = ?usage.candidates_token_count,
        total_tokens = ?usage.total_token_count,
        "Gemini usage"
      );
    }

    let text = body
      .candidates
      .first()
      .and_then(|c| c.content.parts.first())
      .and_then(|p| p.text.clone())
      .ok_or_else(|| "Gemini reply contained no text part".to_string())?;

    info!(elapsed = ?start.elapsed(), reply_len = text.len(), "Gemini reply received");
    Ok(text)
  }
}

// --- generateContent DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
  contents: Vec<ContentReq>,
  #[serde(rename = "generationConfig")]
  generation_config: GenerationConfig,
}
#[derive(Serialize)]
struct ContentReq { parts: Vec<PartReq> }
#[derive(Serialize)]
struct PartReq { text: String }
#[derive(Serialize)]
struct GenerationConfig {
  temperature: f32,
  #[serde(rename = "maxOutputTokens")]
  max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<CandidateResp>,
  #[serde(default, rename = "usageMetadata")]
  usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct CandidateResp { content: ContentResp }
#[derive(Deserialize)]
struct ContentResp {
  #[serde(default)]
  parts: Vec<PartResp>,
}
// A part may be non-textual (e.g. inline data); `text` stays optional so we
// can reject that shape instead of failing the whole deserialization.
#[derive(Deserialize)]
struct PartResp {
  #[serde(default)]
  text: Option<String>,
}
#[derive(Deserialize)]
struct UsageMetadata {
  #[serde(default, rename = "promptTokenCount")]
  prompt_token_count: Option<u32>,
  #[serde(default, rename = "candidatesTokenCount")]
  candidates_token_count: Option<u32>,
  #[serde(default, rename = "totalTokenCount")]
  total_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn error_body_message_extracted() {
    let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
    assert_eq!(extract_gemini_error(body), Some("API key not valid".into()));
    assert_eq!(extract_gemini_error("not json"), None);
  }

  #[test]
  fn response_without_text_part_is_detectable() {
    let body = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png"}}]}}]}"#;
    let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
    let text = parsed
      .candidates
      .first()
      .and_then(|c| c.content.parts.first())
      .and_then(|p| p.text.clone());
    assert!(text.is_none());
  }

  #[test]
  fn response_with_no_candidates_is_detectable() {
    let parsed: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
    assert!(parsed.candidates.is_empty());
  }
}
