//! Report rendering
//!
//! This module handles:
//! - The JSON envelopes returned by the HTTP surface and the CLI
//! - Human-readable markdown reports of a scan

mod json;
mod markdown;

pub use json::{render_json, ErrorEnvelope, ScanEnvelope};
pub use markdown::{format_markdown_report, generate_markdown_report};

use std::path::Path;
use thiserror::Error;

/// Errors that can occur while rendering or writing a report
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Report format selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Json,
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown format '{}' (expected json or markdown)", other)),
        }
    }
}

/// Renders a report in the requested format
pub fn render(report: &crate::ScanReport, format: ReportFormat) -> OutputResult<String> {
    match format {
        ReportFormat::Json => render_json(report),
        ReportFormat::Markdown => Ok(format_markdown_report(report)),
    }
}

/// Writes rendered output to `path`
pub fn write_report(rendered: &str, path: &Path) -> OutputResult<()> {
    std::fs::write(path, rendered)?;
    Ok(())
}
