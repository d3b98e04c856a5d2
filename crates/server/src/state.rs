use flowmap_flowchart::PngRenderer;
use flowmap_summarizer::Summarize;
use std::sync::Arc;

/// Shared handler state: the two injectable collaborators.
///
/// Both are trait objects so tests can bind stubs and run without network
/// access or a Graphviz installation. Nothing here is mutable; requests
/// share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<dyn Summarize>,
    pub renderer: Arc<dyn PngRenderer>,
}

impl AppState {
    pub fn new(summarizer: Arc<dyn Summarize>, renderer: Arc<dyn PngRenderer>) -> Self {
        Self {
            summarizer,
            renderer,
        }
    }
}
