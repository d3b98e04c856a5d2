use flowmap_summarizer::SummarizerConfig;
use std::env;
use std::time::Duration;

/// Origin always allowed for local frontend development.
pub const LOCAL_DEV_ORIGIN: &str = "http://localhost:5173";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Server configuration, collected from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployed frontend origin for the CORS allow-list; empty disables it.
    pub frontend_url: String,
    pub port: u16,
    /// Deadline for the summarizer call and the Graphviz invocation.
    pub request_timeout: Duration,
    pub summarizer: SummarizerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            frontend_url: String::new(),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            summarizer: SummarizerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// `FRONTEND_URL` defaults to empty (origin disabled), matching the
    /// deployed setup where only the local dev origin remains.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let summarizer_defaults = SummarizerConfig::default();

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map_or(defaults.request_timeout, Duration::from_secs);

        Self {
            frontend_url: env::var("FRONTEND_URL").unwrap_or_default(),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout,
            summarizer: SummarizerConfig {
                api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or(summarizer_defaults.api_base),
                model: env::var("OPENAI_MODEL").unwrap_or(summarizer_defaults.model),
                timeout: request_timeout,
            },
        }
    }

    /// CORS allow-list: the configured frontend plus the local dev origin.
    #[must_use]
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = Vec::new();
        if !self.frontend_url.is_empty() {
            origins.push(self.frontend_url.clone());
        }
        origins.push(LOCAL_DEV_ORIGIN.to_string());
        origins
    }
}
