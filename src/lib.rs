//! Quizgen backend library: validation, prompt templating, the Gemini
//! client, and the response-parsing pipeline behind the HTTP API.
//! The binary in `main.rs` only wires env/config into these pieces.

pub mod config;
pub mod domain;
pub mod gemini;
pub mod logic;
pub mod prompts;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod util;
