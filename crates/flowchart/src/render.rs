use crate::error::{FlowchartError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

/// Raster exporter seam. The server injects a stub in tests so the suite
/// does not require Graphviz on the machine.
#[async_trait]
pub trait PngRenderer: Send + Sync {
    /// Render DOT source to PNG bytes. Emptiness of the output is the
    /// caller's concern.
    async fn render_png(&self, dot: &str) -> Result<Vec<u8>>;
}

/// Renders by piping DOT through the external `dot` executable.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    deadline: Duration,
}

impl GraphvizRenderer {
    #[must_use]
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

#[async_trait]
impl PngRenderer for GraphvizRenderer {
    async fn render_png(&self, dot: &str) -> Result<Vec<u8>> {
        let mut child = Command::new("dot")
            .arg("-Tpng")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(FlowchartError::Spawn)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes()).await?;
            // Close stdin so dot sees EOF.
            drop(stdin);
        }

        // kill_on_drop reaps the child when the timeout drops the future.
        let output = match timeout(self.deadline, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => return Err(FlowchartError::Timeout(self.deadline)),
        };

        if !output.status.success() {
            return Err(FlowchartError::Render {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        log::debug!("Graphviz produced {} bytes", output.stdout.len());
        Ok(output.stdout)
    }
}

/// Whether the `dot` executable is on the PATH.
#[must_use]
pub fn graphviz_available() -> bool {
    std::process::Command::new("dot")
        .arg("-V")
        .output()
        .is_ok()
}
