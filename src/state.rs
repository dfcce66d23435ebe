//! Application state: the optional Gemini client.
//!
//! The pipeline itself is stateless; nothing here is mutated after startup,
//! so concurrent requests share the state without coordination.

use tracing::{info, instrument, warn};

use crate::config::load_gen_config_from_env;
use crate::gemini::Gemini;

#[derive(Clone)]
pub struct AppState {
    pub gemini: Option<Gemini>,
}

impl AppState {
    /// Build state from env: load config, init the Gemini client if the
    /// API key is present. Without a key the server still starts, but every
    /// generation request fails with the generic 500.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_gen_config_from_env().unwrap_or_default();

        let gemini = Gemini::from_env(&cfg);
        match &gemini {
            Some(g) => {
                info!(target: "quizgen_backend", base_url = %g.base_url, model = %g.model, "Gemini enabled.");
            }
            None => {
                warn!(target: "quizgen_backend", "Gemini disabled (no GEMINI_API_KEY). Generation requests will fail.");
            }
        }

        Self { gemini }
    }
}
