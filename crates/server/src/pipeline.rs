use crate::state::AppState;
use flowmap_analyzer::{parse_source, AnalyzerError, CodeAnalyzer};
use flowmap_flowchart::{build_graph_model, create_logic_flowchart, FlowchartError};
use flowmap_summarizer::SummarizerError;
use thiserror::Error;

/// Failure points of the analyze pipeline, one variant per collaborator.
///
/// The HTTP boundary flattens these to a single `"Error: {message}"` string;
/// the two fixed domain messages below are part of the wire contract.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Summarizer(#[from] SummarizerError),

    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error("Flowchart generation failed.")]
    EmptyFlowchart,

    #[error("Graphviz returned empty output.")]
    EmptyRender,

    #[error(transparent)]
    Render(#[from] FlowchartError),
}

/// Successful pipeline output.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub summary: String,
    pub png: Vec<u8>,
}

/// Run the full pipeline: summarize, parse, analyze, build, render.
///
/// Strictly sequential and all-or-nothing: a render failure discards an
/// already-computed summary.
pub async fn analyze_code(state: &AppState, code: &str) -> Result<AnalysisOutcome, AnalyzeError> {
    let summary = state.summarizer.summarize(code).await?;

    let tree = parse_source(code)?;
    let structure = CodeAnalyzer::new().analyze(&tree);

    let model = build_graph_model(&structure);
    let chart = create_logic_flowchart(&model).ok_or(AnalyzeError::EmptyFlowchart)?;

    let png = state.renderer.render_png(chart.dot()).await?;
    if png.is_empty() {
        return Err(AnalyzeError::EmptyRender);
    }

    log::info!(
        "Analyzed {} bytes of source into {} nodes, {} byte PNG",
        code.len(),
        model.node_count(),
        png.len()
    );

    Ok(AnalysisOutcome { summary, png })
}
