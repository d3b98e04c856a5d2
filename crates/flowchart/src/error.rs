use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowchartError>;

#[derive(Error, Debug)]
pub enum FlowchartError {
    #[error("Graphviz is not available: {0}")]
    Spawn(std::io::Error),

    #[error("Graphviz failed with {status}: {stderr}")]
    Render { status: String, stderr: String },

    #[error("Graphviz timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
