use crate::output::OutputResult;
use crate::ScanReport;
use serde::Serialize;

/// Successful scan response: `{ "ok": true, ...report }`
#[derive(Debug, Serialize)]
pub struct ScanEnvelope<'a> {
    pub ok: bool,
    #[serde(flatten)]
    pub report: &'a ScanReport,
}

impl<'a> ScanEnvelope<'a> {
    pub fn new(report: &'a ScanReport) -> Self {
        Self { ok: true, report }
    }
}

/// Failed scan response: `{ "ok": false, "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub ok: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Pretty-printed JSON envelope of a report
pub fn render_json(report: &ScanReport) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(&ScanEnvelope::new(report))?)
}
