//! SARIF 2.1.0 export.
//!
//! SARIF (Static Analysis Results Interchange Format) is understood by GitHub
//! code scanning, VS Code, and most CI systems. Only generation is supported.

use crate::{Diagnostic, PMD_INFO};
use serde::Serialize;
use std::collections::BTreeMap;

const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

/// Top-level SARIF log.
#[derive(Debug, Clone, Serialize)]
pub struct SarifReport {
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Always `2.1.0`.
    pub version: String,
    pub runs: Vec<SarifRun>,
}

/// Results produced by one tool.
#[derive(Debug, Clone, Serialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

/// The tool that produced a run.
#[derive(Debug, Clone, Serialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

/// Tool name, version, and the rules its results reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifDriver {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Tool homepage.
    pub information_uri: Option<String>,
    /// Each rule seen in the run, once.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<SarifRule>,
}

/// Rule metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRule {
    /// Rule ID as reported by the tool (`UnusedPrivateField` for PMD).
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<SarifMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Rule documentation page.
    pub help_uri: Option<String>,
}

/// Plain-text message.
#[derive(Debug, Clone, Serialize)]
pub struct SarifMessage {
    pub text: String,
}

/// One diagnostic.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: String,
    /// `error`, `warning`, or `note`.
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

/// Where a result was found.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    pub physical_location: SarifPhysicalLocation,
}

/// File and region of a result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifPhysicalLocation {
    pub artifact_location: SarifArtifactLocation,
    pub region: SarifRegion,
}

/// File reference.
#[derive(Debug, Clone, Serialize)]
pub struct SarifArtifactLocation {
    /// Path as PMD reported it.
    pub uri: String,
}

/// Text range within a file. Lines and columns are 1-based.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRegion {
    pub start_line: usize,
    pub start_column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
}

impl SarifReport {
    /// Build a report with one run per tool, rules and runs sorted by name.
    ///
    /// `version` is attached to the PMD driver when known.
    pub fn from_diagnostics(diagnostics: &[Diagnostic], version: Option<&str>) -> Self {
        let mut by_tool: BTreeMap<&str, Vec<&Diagnostic>> = BTreeMap::new();
        for d in diagnostics {
            by_tool.entry(&d.tool).or_default().push(d);
        }

        let runs = by_tool
            .into_iter()
            .map(|(tool_name, diags)| {
                let mut rules: BTreeMap<&str, SarifRule> = BTreeMap::new();
                for d in &diags {
                    rules.entry(&d.rule_id).or_insert_with(|| SarifRule {
                        id: d.rule_id.clone(),
                        short_description: Some(SarifMessage {
                            text: d.message.clone(),
                        }),
                        help_uri: d.help_url.clone(),
                    });
                }

                let results = diags.iter().map(|d| to_result(d)).collect();
                let is_pmd = tool_name == PMD_INFO.name;

                SarifRun {
                    tool: SarifTool {
                        driver: SarifDriver {
                            name: tool_name.to_string(),
                            version: version.filter(|_| is_pmd).map(String::from),
                            information_uri: is_pmd.then(|| PMD_INFO.website.to_string()),
                            rules: rules.into_values().collect(),
                        },
                    },
                    results,
                }
            })
            .collect();

        SarifReport {
            schema: SARIF_SCHEMA.to_string(),
            version: SARIF_VERSION.to_string(),
            runs,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn to_result(d: &Diagnostic) -> SarifResult {
    SarifResult {
        rule_id: d.rule_id.clone(),
        level: d.severity.to_sarif_level().to_string(),
        message: SarifMessage {
            text: d.message.clone(),
        },
        locations: vec![SarifLocation {
            physical_location: SarifPhysicalLocation {
                artifact_location: SarifArtifactLocation {
                    uri: d.location.file.display().to_string(),
                },
                region: SarifRegion {
                    start_line: d.location.line,
                    start_column: d.location.column,
                    end_line: d.location.end_line,
                    end_column: d.location.end_column,
                },
            },
        }],
    }
}
