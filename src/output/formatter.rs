use std::fmt::Write;

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::domain::{Finding, FixSummary, Severity};
use crate::output::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" | "term" | "tty" => Ok(Self::Terminal),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!(
                "Unknown format: {s}. Valid options: terminal, json, markdown"
            )),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<JsonFile<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a str,
    findings: &'a [Finding],
}

#[derive(Serialize)]
struct JsonSummary {
    critical: usize,
    high: usize,
    medium: usize,
    low: usize,
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Critical => "CRITICAL".red().bold(),
        Severity::High => "HIGH".yellow().bold(),
        Severity::Medium => "MEDIUM".cyan().bold(),
        Severity::Low => "LOW".bright_black().bold(),
        Severity::Info => "INFO".green().bold(),
    }
}

#[must_use]
pub fn format_report(report: &Report, format: OutputFormat) -> String {
    match format {
        OutputFormat::Terminal => format_terminal(report),
        OutputFormat::Json => format_json(report),
        OutputFormat::Markdown => format_markdown(report),
    }
}

fn format_terminal(report: &Report) -> String {
    let mut output = String::new();

    if report.files.is_empty() {
        let _ = writeln!(
            output,
            "{}",
            "No vulnerabilities detected with pattern matching.".green().bold()
        );
        return output;
    }

    for file in &report.files {
        let _ = writeln!(output, "\n▸ {}", file.path.bright_cyan().bold());
        for finding in &file.findings {
            let _ = writeln!(
                output,
                "  [LINE {}:{}] {} - {}",
                finding.line.to_string().bright_white(),
                finding.column,
                severity_label(finding.severity),
                finding.description.bright_white()
            );
            if !finding.original_line.is_empty() {
                let _ = writeln!(output, "    {}", finding.original_line.trim().dimmed());
            }
            let _ = writeln!(output, "    {} {}", "fix:".bright_black(), finding.suggestion);
        }
    }

    let _ = writeln!(
        output,
        "\n{}",
        "═══════════════════════════════════════════════════════════".bright_black()
    );

    let verdict = if report.has_blocking_findings() {
        format!(
            "VERDICT: {} critical, {} high, {} medium, {} low.",
            report.critical_count, report.high_count, report.medium_count, report.low_count
        )
        .red()
        .bold()
    } else if report.total_findings() > 0 {
        format!(
            "VERDICT: {} medium, {} low. Nothing blocking.",
            report.medium_count, report.low_count
        )
        .yellow()
    } else {
        "VERDICT: clean.".green().bold()
    };
    let _ = writeln!(output, "{verdict}");

    output
}

fn format_json(report: &Report) -> String {
    let json = JsonReport {
        files: report
            .files
            .iter()
            .map(|f| JsonFile {
                path: &f.path,
                findings: &f.findings,
            })
            .collect(),
        summary: JsonSummary {
            critical: report.critical_count,
            high: report.high_count,
            medium: report.medium_count,
            low: report.low_count,
        },
    };
    serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
}

fn format_markdown(report: &Report) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Scan Report\n");
    let _ = writeln!(
        output,
        "**{}** findings: {} critical, {} high, {} medium, {} low\n",
        report.total_findings(),
        report.critical_count,
        report.high_count,
        report.medium_count,
        report.low_count
    );

    for file in &report.files {
        let _ = writeln!(output, "## `{}`\n", file.path);
        let _ = writeln!(output, "| Line | Severity | Category | Description |");
        let _ = writeln!(output, "|------|----------|----------|-------------|");
        for finding in &file.findings {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} |",
                finding.line,
                finding.severity,
                finding.category.label(),
                finding.description
            );
        }
        output.push('\n');
    }

    output
}

#[must_use]
pub fn format_fix_summary(summary: &FixSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Terminal => format_summary_terminal(summary),
        OutputFormat::Json => {
            serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Markdown => format_summary_markdown(summary),
    }
}

fn format_summary_terminal(summary: &FixSummary) -> String {
    let mut output = String::new();

    if summary.total_fixes == 0 {
        let _ = writeln!(output, "{}", "No auto-fixable findings.".green());
        return output;
    }

    let _ = writeln!(
        output,
        "{}",
        format!(
            "Applied {} fix{} ({} critical, {} high)",
            summary.total_fixes,
            if summary.total_fixes == 1 { "" } else { "es" },
            summary.critical_fixed,
            summary.high_fixed
        )
        .green()
        .bold()
    );

    for fix in &summary.applied_fixes {
        let _ = writeln!(
            output,
            "  [LINE {}] {} {}",
            fix.line.to_string().bright_white(),
            severity_label(fix.severity),
            fix.category.label().bright_white()
        );
        let _ = writeln!(output, "    {} {}", "-".red(), fix.original.dimmed());
        let _ = writeln!(output, "    {} {}", "+".green(), fix.fixed);
    }

    if !summary.suggestions.is_empty() {
        let _ = writeln!(output, "\n{}", "Follow-up:".bold());
        for suggestion in &summary.suggestions {
            let _ = writeln!(output, "  • {suggestion}");
        }
    }

    output
}

fn format_summary_markdown(summary: &FixSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Fix Summary\n");
    let _ = writeln!(
        output,
        "**{}** fixes applied ({} critical, {} high)\n",
        summary.total_fixes, summary.critical_fixed, summary.high_fixed
    );
    for fix in &summary.applied_fixes {
        let _ = writeln!(output, "- line {}: **{}**", fix.line, fix.category.label());
        let _ = writeln!(output, "  - before: `{}`", fix.original);
        let _ = writeln!(output, "  - after: `{}`", fix.fixed);
    }
    if !summary.suggestions.is_empty() {
        let _ = writeln!(output, "\n## Follow-up\n");
        for suggestion in &summary.suggestions {
            let _ = writeln!(output, "- {suggestion}");
        }
    }
    output
}
