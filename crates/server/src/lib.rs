//! # Flowmap Server
//!
//! HTTP surface for the code-analysis pipeline.
//!
//! ## Routes
//!
//! - `GET /` - liveness marker
//! - `GET /health` - health probe
//! - `POST /analyze` - summary + flowchart for a submitted source string
//!
//! `/analyze` always answers HTTP 200; failures travel in the response
//! body's `error` field so the existing frontend contract is preserved.

pub mod config;
pub mod pipeline;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::build_router;
pub use state::AppState;
