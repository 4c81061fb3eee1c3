use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::export::{ExportError, Rasterizer};

/// Rasterizes by running an external HTML-to-image tool, for example
/// `wkhtmltoimage --format png`. The input HTML path and the output PNG path
/// are appended as the final two arguments.
#[derive(Debug, Clone)]
pub struct CommandRasterizer {
    program: String,
    args: Vec<String>,
}

impl CommandRasterizer {
    /// Splits a whitespace-separated command line. `None` if it is blank.
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Rasterizer for CommandRasterizer {
    async fn rasterize(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("cv-preview.html");
        let output = dir.path().join("cv-preview.png");
        tokio::fs::write(&input, html).await?;

        debug!(program = %self.program, "running rasterizer");
        let result = Command::new(&self.program)
            .args(&self.args)
            .arg(&input)
            .arg(&output)
            .output()
            .await?;

        if !result.status.success() {
            return Err(ExportError::RasterizerFailed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(tokio::fs::read(&output).await?)
    }
}
