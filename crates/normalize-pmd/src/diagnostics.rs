//! PMD report records to normalized diagnostics.

use crate::report::PmdRecord;
use crate::{Diagnostic, DiagnosticSeverity, Location, PMD_INFO, rules};

/// Map PMD priority (1 = highest, 5 = lowest) to severity.
pub fn severity_for_priority(priority: Option<u32>) -> DiagnosticSeverity {
    match priority {
        Some(1) | Some(2) => DiagnosticSeverity::Error,
        Some(3) | None => DiagnosticSeverity::Warning,
        Some(4) => DiagnosticSeverity::Info,
        Some(_) => DiagnosticSeverity::Hint,
    }
}

pub fn to_diagnostic(record: &PmdRecord) -> Diagnostic {
    let rule = rules::find_by_short(&record.rule);
    Diagnostic {
        tool: PMD_INFO.name.to_string(),
        rule_id: record.rule.clone(),
        message: record.description.clone(),
        severity: severity_for_priority(record.priority),
        location: Location {
            file: record.file.clone().into(),
            line: record.line.unwrap_or(1).max(1),
            column: 1,
            end_line: None,
            end_column: None,
        },
        help_url: rule.map(|r| r.help_url()),
    }
}

pub fn to_diagnostics(records: &[PmdRecord]) -> Vec<Diagnostic> {
    records.iter().map(to_diagnostic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_priority_mapping() {
        assert_eq!(severity_for_priority(Some(1)), DiagnosticSeverity::Error);
        assert_eq!(severity_for_priority(Some(2)), DiagnosticSeverity::Error);
        assert_eq!(severity_for_priority(Some(3)), DiagnosticSeverity::Warning);
        assert_eq!(severity_for_priority(None), DiagnosticSeverity::Warning);
        assert_eq!(severity_for_priority(Some(4)), DiagnosticSeverity::Info);
        assert_eq!(severity_for_priority(Some(5)), DiagnosticSeverity::Hint);
    }

    #[test]
    fn test_record_to_diagnostic() {
        let record = PmdRecord {
            problem: "1".into(),
            package: "com.example".into(),
            file: "src/Foo.java".into(),
            priority: Some(1),
            line: Some(42),
            description: "Avoid empty catch blocks".into(),
            rule_set: "Error Prone".into(),
            rule: "EmptyCatchBlock".into(),
        };
        let d = to_diagnostic(&record);
        assert_eq!(d.tool, "pmd");
        assert_eq!(d.rule_id, "EmptyCatchBlock");
        assert_eq!(d.severity, DiagnosticSeverity::Error);
        assert_eq!(d.location.file, Path::new("src/Foo.java"));
        assert_eq!(d.location.line, 42);
        assert!(d.help_url.unwrap().ends_with("#emptycatchblock"));
    }

    #[test]
    fn test_missing_line_and_unknown_rule() {
        let record = PmdRecord {
            file: "A.java".into(),
            rule: "CustomRule".into(),
            ..Default::default()
        };
        let d = to_diagnostic(&record);
        assert_eq!(d.location.line, 1);
        assert_eq!(d.help_url, None);
    }
}
