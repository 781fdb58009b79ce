//! PMD integration for normalize.
//!
//! Runs the external `pmd` tool as a subprocess, parses its CSV report,
//! and converts the results into normalized diagnostics (exportable as SARIF).
//! Also generates PMD ruleset files from the catalog of known rules.
//!
//! Pipeline:
//! - [`runner`]: spawn `pmd`, stream its output
//! - [`report`]: CSV report parsing with one-line truncation recovery
//! - [`diagnostics`]: records to [`Diagnostic`]s, then [`sarif`]
//! - [`ruleset`] and [`rules`]: read an existing ruleset, compute followed rules, write a new one

pub mod config;
pub mod diagnostics;
pub mod report;
pub mod rules;
pub mod ruleset;
pub mod runner;
pub mod sarif;

pub use config::PmdConfig;
pub use report::{CsvError, PmdRecord, ReportStream, parse_output, parse_records};
pub use rules::{Category, RuleInfo, RuleMap, RuleMapError};
pub use ruleset::{ConfigError, RuleReference, RulesetDocument, RulesetOptions};
pub use runner::PmdRunner;
pub use sarif::SarifReport;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Static description of the wrapped tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolInfo {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub check_cmd: &'static [&'static str],
    pub website: &'static str,
}

pub const PMD_INFO: ToolInfo = ToolInfo {
    name: "pmd",
    extensions: &["java"],
    check_cmd: &["pmd", "--version"],
    website: "https://pmd.github.io/",
};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Hint,
    Info,
    Warning,
    Error,
}

impl DiagnosticSeverity {
    /// SARIF `level` for this severity.
    pub fn to_sarif_level(self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info | DiagnosticSeverity::Hint => "note",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
            DiagnosticSeverity::Hint => "hint",
        }
    }
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source location (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_column: Option<usize>,
}

/// A normalized diagnostic produced by an external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub tool: String,
    pub rule_id: String,
    pub message: String,
    pub severity: DiagnosticSeverity,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub help_url: Option<String>,
}

/// Outcome of one tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool: String,
    pub diagnostics: Vec<Diagnostic>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(tool: &str, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            tool: tool.to_string(),
            diagnostics,
            success: true,
            error: None,
        }
    }

    pub fn failure(tool: &str, error: impl std::fmt::Display) -> Self {
        Self {
            tool: tool.to_string(),
            diagnostics: Vec::new(),
            success: false,
            error: Some(error.to_string()),
        }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count()
    }
}

/// Errors from running an external tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("tool not available: {0}")]
    NotAvailable(String),
    #[error("no PMD rule categories configured")]
    NoCategories,
    #[error("failed to run tool: {0}")]
    Io(#[from] std::io::Error),
}
