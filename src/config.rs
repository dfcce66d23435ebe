//! Loading upstream generation settings from TOML.
//!
//! Everything has a default, so the file is optional; set GEN_CONFIG_PATH to
//! tune the model, endpoint, or sampling without rebuilding.

use serde::Deserialize;
use tracing::{error, info};

fn default_model() -> String {
  "gemini-2.0-flash-001".into()
}

fn default_base_url() -> String {
  "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_timeout_secs() -> u64 {
  30
}

fn default_temperature() -> f32 {
  0.7
}

fn default_max_output_tokens() -> u32 {
  2048
}

/// Upstream client settings. GEMINI_BASE_URL / GEMINI_MODEL env variables
/// still take precedence over these (see `Gemini::from_env`).
#[derive(Clone, Debug, Deserialize)]
pub struct GenConfig {
  #[serde(default = "default_model")]
  pub model: String,
  #[serde(default = "default_base_url")]
  pub base_url: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  #[serde(default = "default_temperature")]
  pub temperature: f32,
  #[serde(default = "default_max_output_tokens")]
  pub max_output_tokens: u32,
}

impl Default for GenConfig {
  fn default() -> Self {
    Self {
      model: default_model(),
      base_url: default_base_url(),
      timeout_secs: default_timeout_secs(),
      temperature: default_temperature(),
      max_output_tokens: default_max_output_tokens(),
    }
  }
}

/// Attempt to load `GenConfig` from GEN_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_gen_config_from_env() -> Option<GenConfig> {
  let path = std::env::var("GEN_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<GenConfig>(&s) {
      Ok(cfg) => {
        info!(target: "quizgen_backend", %path, "Loaded generation config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quizgen_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quizgen_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_falls_back_to_defaults() {
    let cfg: GenConfig = toml::from_str("model = \"gemini-1.5-pro\"").unwrap();
    assert_eq!(cfg.model, "gemini-1.5-pro");
    assert_eq!(cfg.base_url, default_base_url());
    assert_eq!(cfg.timeout_secs, 30);
    assert_eq!(cfg.max_output_tokens, 2048);
  }

  #[test]
  fn empty_toml_is_all_defaults() {
    let cfg: GenConfig = toml::from_str("").unwrap();
    assert_eq!(cfg.model, "gemini-2.0-flash-001");
    assert!((cfg.temperature - 0.7).abs() < f32::EPSILON);
  }
}
