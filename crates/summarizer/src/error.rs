use thiserror::Error;

pub type Result<T> = std::result::Result<T, SummarizerError>;

#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("Summarizer request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Summarizer returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Summarizer response had no content")]
    EmptyResponse,

    #[error("Summarizer API key is not configured")]
    MissingApiKey,
}
