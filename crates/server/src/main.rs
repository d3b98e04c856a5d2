//! Flowmap backend server.
//!
//! Accepts a source-code string on `POST /analyze` and answers with an AI
//! summary plus a Graphviz flowchart of the code's structure, base64-encoded.
//!
//! Configuration is environment-driven: `FRONTEND_URL`, `PORT`,
//! `OPENAI_API_KEY`, `OPENAI_API_BASE`, `OPENAI_MODEL`,
//! `REQUEST_TIMEOUT_SECS`.

use anyhow::{Context, Result};
use flowmap_flowchart::{graphviz_available, GraphvizRenderer};
use flowmap_server::{build_router, AppState, ServerConfig};
use flowmap_summarizer::OpenAiSummarizer;
use std::env;
use std::sync::Arc;

fn print_help() {
    println!("Flowmap backend server");
    println!();
    println!("Usage: flowmap-server [--version|--help]");
    println!();
    println!("Flags:");
    println!("  --version      Print version and exit");
    println!("  --help         Print this help and exit");
}

fn handle_cli_args() -> Option<i32> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return None;
    }

    if args.len() == 1 {
        match args[0].as_str() {
            "--version" | "-V" => {
                println!("flowmap-server {}", env!("CARGO_PKG_VERSION"));
                return Some(0);
            }
            "--help" | "-h" => {
                print_help();
                return Some(0);
            }
            _ => {}
        }
    }

    eprintln!("Unknown arguments: {}", args.join(" "));
    print_help();
    Some(2)
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Some(exit_code) = handle_cli_args() {
        std::process::exit(exit_code);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();

    if !graphviz_available() {
        log::warn!("Graphviz `dot` not found on PATH; /analyze will fail until installed");
    }

    let summarizer = OpenAiSummarizer::new(config.summarizer.clone())
        .context("summarizer configuration (is OPENAI_API_KEY set?)")?;
    let renderer = GraphvizRenderer::new(config.request_timeout);
    let state = AppState::new(Arc::new(summarizer), Arc::new(renderer));

    let app = build_router(state, &config.allowed_origins());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    log::info!("Flowmap server listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
