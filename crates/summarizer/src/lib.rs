//! # Flowmap Summarizer
//!
//! Async client for an OpenAI-compatible chat-completions API, producing
//! natural-language summaries of submitted code. The [`Summarize`] trait is
//! the seam the server binds to, so tests run against a stub instead of the
//! network.

mod client;
mod error;

pub use client::{OpenAiSummarizer, SummarizerConfig};
pub use error::{Result, SummarizerError};

use async_trait::async_trait;

/// Summarization collaborator contract: source text in, summary out.
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, code: &str) -> Result<String>;
}
