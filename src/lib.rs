pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod utils;

use std::path::Path;

use crossbeam_channel::unbounded;

pub use config::RemedianConfig;
pub use domain::{AppliedFix, Category, Finding, FixKind, FixSummary, Severity};
pub use engine::{apply_fixes, generate_fix, FileFindings, FixOutcome};
pub use error::{RemedianError, Result as RemedianResult};
pub use output::OutputFormat;

/// Scan a text buffer with the default configuration.
///
/// # Example
/// ```
/// use remedian::scan;
/// let findings = scan("db.query(`SELECT * FROM users WHERE id = ${userId}`);");
/// assert!(!findings.is_empty());
/// ```
#[must_use]
pub fn scan(text: &str) -> Vec<Finding> {
    engine::scan_content(text, &RemedianConfig::default())
}

/// Scan a file or directory tree with a custom configuration.
///
/// # Example
/// ```no_run
/// use remedian::{scan_path, RemedianConfig};
/// # fn main() -> remedian::RemedianResult<()> {
/// let config = RemedianConfig::default();
/// let results = scan_path(std::path::Path::new("."), &config)?;
/// # Ok(())
/// # }
/// ```
pub fn scan_path(path: &Path, config: &RemedianConfig) -> error::Result<Vec<FileFindings>> {
    let (sender, receiver) = unbounded();

    engine::investigate(path, config, &sender)?;
    drop(sender);

    Ok(receiver.iter().collect())
}

/// Scan a buffer and apply every eligible fix in one step.
///
/// # Example
/// ```
/// use remedian::remediate;
/// let outcome = remediate("const data = eval(userInput);");
/// assert_eq!(outcome.fixed_text, "const data = JSON.parse(userInput);");
/// ```
#[must_use]
pub fn remediate(text: &str) -> FixOutcome {
    let findings = scan(text);
    engine::apply_fixes(text, &findings, None)
}
