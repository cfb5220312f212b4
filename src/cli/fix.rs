use std::path::Path;

use anyhow::{bail, Context, Result};

use remedian::config::RemedianConfig;
use remedian::domain::Category;
use remedian::engine::{apply_fixes, scan_content};
use remedian::output::{build_summary, format_fix_summary, OutputFormat};

fn parse_selection(only: &[String]) -> Result<Option<Vec<Category>>> {
    if only.is_empty() {
        return Ok(None);
    }
    let mut categories = Vec::new();
    for raw in only {
        for part in raw.split(',') {
            let category: Category = part
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
    }
    Ok(Some(categories))
}

pub fn run_fix(
    path: &Path,
    only: &[String],
    write: bool,
    summary_only: bool,
    format: OutputFormat,
) -> Result<()> {
    if !path.is_file() {
        bail!("Not a file: {}", path.display());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = RemedianConfig::load()?;
    let selection = parse_selection(only)?;

    let mut findings = scan_content(&text, &config);
    findings.retain(|f| f.category != Category::AnalysisComplete);

    let outcome = apply_fixes(&text, &findings, selection.as_deref());
    let summary = build_summary(&outcome.applied);

    if write {
        if !outcome.applied.is_empty() {
            std::fs::write(path, &outcome.fixed_text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        print!("{}", format_fix_summary(&summary, format));
        return Ok(());
    }

    if summary_only {
        print!("{}", format_fix_summary(&summary, format));
        return Ok(());
    }

    print!("{}", outcome.fixed_text);
    Ok(())
}
