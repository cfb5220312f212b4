use std::collections::HashMap;

use crate::domain::{AppliedFix, Category, Finding, FixSummary, Severity};
use crate::engine::FileFindings;

#[derive(Debug, Clone)]
pub struct Report {
    pub files: Vec<FileFindings>,
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
}

impl Report {
    #[must_use]
    pub fn total_findings(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }

    #[must_use]
    pub fn has_blocking_findings(&self) -> bool {
        self.critical_count > 0 || self.high_count > 0
    }
}

/// Group raw channel output into a stable per-file report. Files are ordered
/// by path and findings by line so repeated runs print identically.
#[must_use]
pub fn build_report(results: Vec<FileFindings>) -> Report {
    let mut by_path: HashMap<String, Vec<Finding>> = HashMap::new();
    for result in results {
        by_path
            .entry(result.path)
            .or_default()
            .extend(result.findings);
    }

    let mut critical_count = 0;
    let mut high_count = 0;
    let mut medium_count = 0;
    let mut low_count = 0;

    let mut files: Vec<FileFindings> = by_path
        .into_iter()
        .map(|(path, mut findings)| {
            findings.sort_by_key(|f| (f.line, f.column));
            for finding in &findings {
                match finding.severity {
                    Severity::Critical => critical_count += 1,
                    Severity::High => high_count += 1,
                    Severity::Medium => medium_count += 1,
                    Severity::Low => low_count += 1,
                    Severity::Info => {}
                }
            }
            FileFindings { path, findings }
        })
        .collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    Report {
        files,
        critical_count,
        high_count,
        medium_count,
        low_count,
    }
}

fn suggestion_for(category: Category) -> Option<&'static str> {
    match category {
        Category::Xss => Some("Added HTML escaping function for XSS protection"),
        Category::HardcodedSecret => {
            Some("Moved secret to environment variable - update your .env file")
        }
        Category::CommandInjection => {
            Some("Replaced exec() with execFile() for safer command execution")
        }
        _ => None,
    }
}

/// Summarize applied fixes for display. Categories and suggestions are
/// deduplicated; one suggestion per category no matter how many lines it hit.
#[must_use]
pub fn build_summary(applied: &[AppliedFix]) -> FixSummary {
    let mut fixed_categories: Vec<Category> = Vec::new();
    let mut suggestions: Vec<String> = Vec::new();
    let mut critical_fixed = 0;
    let mut high_fixed = 0;

    for fix in applied {
        if !fixed_categories.contains(&fix.category) {
            fixed_categories.push(fix.category);
            if let Some(s) = suggestion_for(fix.category) {
                suggestions.push(s.to_string());
            }
        }
        match fix.severity {
            Severity::Critical => critical_fixed += 1,
            Severity::High => high_fixed += 1,
            _ => {}
        }
    }

    FixSummary {
        total_fixes: applied.len(),
        fixed_categories,
        critical_fixed,
        high_fixed,
        suggestions,
        applied_fixes: applied.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(line: usize, severity: Severity) -> Finding {
        Finding {
            id: format!("unsafe-eval-{line}-1"),
            category: Category::UnsafeEval,
            severity,
            line,
            column: 1,
            description: String::new(),
            suggestion: String::new(),
            original_line: String::new(),
            fix: None,
            auto_fixable: true,
        }
    }

    #[test]
    fn test_report_sorted_and_counted() {
        let results = vec![
            FileFindings {
                path: "b.js".to_string(),
                findings: vec![finding(9, Severity::Critical), finding(2, Severity::Low)],
            },
            FileFindings {
                path: "a.js".to_string(),
                findings: vec![finding(4, Severity::High)],
            },
        ];
        let report = build_report(results);
        assert_eq!(report.files[0].path, "a.js");
        assert_eq!(report.files[1].findings[0].line, 2);
        assert_eq!(report.critical_count, 1);
        assert_eq!(report.high_count, 1);
        assert_eq!(report.low_count, 1);
        assert!(report.has_blocking_findings());
        assert_eq!(report.total_findings(), 3);
    }

    #[test]
    fn test_summary_dedupes_suggestions() {
        let applied = vec![
            AppliedFix {
                category: Category::HardcodedSecret,
                severity: Severity::Critical,
                line: 3,
                original: "a".to_string(),
                fixed: "b".to_string(),
            },
            AppliedFix {
                category: Category::HardcodedSecret,
                severity: Severity::Critical,
                line: 7,
                original: "c".to_string(),
                fixed: "d".to_string(),
            },
            AppliedFix {
                category: Category::UnsafeEval,
                severity: Severity::Critical,
                line: 9,
                original: "e".to_string(),
                fixed: "f".to_string(),
            },
        ];
        let summary = build_summary(&applied);
        assert_eq!(summary.total_fixes, 3);
        assert_eq!(summary.critical_fixed, 3);
        assert_eq!(summary.high_fixed, 0);
        assert_eq!(
            summary.fixed_categories,
            vec![Category::HardcodedSecret, Category::UnsafeEval]
        );
        assert_eq!(summary.suggestions.len(), 1);
    }
}
