use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use crossbeam_channel::unbounded;

use remedian::config::RemedianConfig;
use remedian::domain::Severity;
use remedian::engine::{investigate, scan_content, FileFindings, RULES};
use remedian::output::{build_report, format_report, OutputFormat};

fn apply_min_severity(results: &mut Vec<FileFindings>, min_severity: Option<Severity>) {
    let Some(min) = min_severity else { return };
    for file in results.iter_mut() {
        file.findings.retain(|f| f.severity <= min);
    }
    results.retain(|file| !file.findings.is_empty());
}

pub fn run_scan(path: &Path, format: OutputFormat, min_severity: Option<Severity>) -> Result<()> {
    let config = RemedianConfig::load()?;

    let (sender, receiver) = unbounded::<FileFindings>();
    investigate(path, &config, &sender)
        .with_context(|| format!("Failed to scan {}", path.display()))?;
    drop(sender);

    let mut results: Vec<FileFindings> = receiver.iter().collect();
    apply_min_severity(&mut results, min_severity);

    let report = build_report(results);
    let blocking = report.has_blocking_findings();

    print!("{}", format_report(&report, format));

    if blocking {
        std::process::exit(1);
    }
    Ok(())
}

pub fn run_stdin(format: OutputFormat, min_severity: Option<Severity>) -> Result<()> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read stdin")?;

    let config = RemedianConfig::load()?;
    let findings = scan_content(&content, &config);

    let mut results = vec![FileFindings {
        path: "<stdin>".to_string(),
        findings,
    }];
    results.retain(|file| !file.findings.is_empty());
    apply_min_severity(&mut results, min_severity);

    let report = build_report(results);
    let blocking = report.has_blocking_findings();

    print!("{}", format_report(&report, format));

    if blocking {
        std::process::exit(1);
    }
    Ok(())
}

pub fn run_rules_list() -> Result<()> {
    println!("Built-in Rules ({}):", RULES.len());
    println!("{:<22} {:<10} Description", "ID", "Severity");
    println!("{}", "-".repeat(80));

    for rule in RULES {
        println!(
            "{:<22} {:<10} {}",
            rule.category.slug(),
            rule.severity.label(),
            rule.description
        );
    }

    Ok(())
}
