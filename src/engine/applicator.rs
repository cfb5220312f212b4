use crate::domain::{AppliedFix, Category, Finding, FixKind, Severity};
use crate::engine::fixer::generate_fix;

/// Result of applying fixes to one text buffer.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub fixed_text: String,
    pub applied: Vec<AppliedFix>,
}

const BANNER: &str = "// ============================================\n\
                      // AUTO-FIXED BY REMEDIAN SECURITY SCANNER\n\
                      // ============================================\n\n";

const ESCAPE_HTML_HELPER: &str = "// Added XSS protection function\n\
const escapeHtml = (str: string) => {\n\
  if (typeof str !== 'string') return str;\n\
  return str\n\
    .replace(/&/g, '&amp;')\n\
    .replace(/</g, '&lt;')\n\
    .replace(/>/g, '&gt;')\n\
    .replace(/\"/g, '&quot;')\n\
    .replace(/'/g, '&#039;');\n\
};\n\n";

const EXEC_FILE_NOTE: &str = "// Note: Replaced exec() with execFile() for security\n\
                              // const { execFile } = require('child_process');\n\n";

const ENV_GUIDANCE: &str = "// IMPORTANT: Update your environment variables\n\
                            // Create a .env file with the following:\n\
                            // API_KEY=your_actual_key_here\n\
                            // SECRET_TOKEN=your_actual_token_here\n\
                            // DB_PASSWORD=your_actual_password_here\n\n";

fn header_block(html_encode: bool, argv_exec: bool, env_variable: bool) -> String {
    let mut header = String::from(BANNER);
    if html_encode {
        header.push_str(ESCAPE_HTML_HELPER);
    }
    if argv_exec {
        header.push_str(EXEC_FILE_NOTE);
    }
    if env_variable {
        header.push_str(ENV_GUIDANCE);
    }
    header
}

fn eligible(finding: &Finding, selection: Option<&[Category]>) -> bool {
    finding.auto_fixable
        && finding.severity != Severity::Info
        && finding.fix.is_some()
        && selection.map_or(true, |cats| cats.contains(&finding.category))
}

/// Apply the fixes for the given findings to `text`.
///
/// Findings are processed in strictly descending line order so that earlier
/// edits cannot shift the line numbers of edits still to come. Fixes whose
/// output equals the current line text are skipped and never reported.
#[must_use]
pub fn apply_fixes(text: &str, findings: &[Finding], selection: Option<&[Category]>) -> FixOutcome {
    let had_trailing_newline = text.ends_with('\n');
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    if had_trailing_newline {
        lines.pop();
    }

    let mut targets: Vec<&Finding> = findings
        .iter()
        .filter(|f| eligible(f, selection))
        .collect();
    targets.sort_by(|a, b| b.line.cmp(&a.line));

    let mut applied = Vec::new();
    let mut saw_html_encode = false;
    let mut saw_argv_exec = false;
    let mut saw_env_variable = false;

    for finding in targets {
        let Some(kind) = finding.fix else { continue };
        let Some(current) = lines.get(finding.line - 1) else {
            continue;
        };
        let fixed = generate_fix(kind, current);
        if fixed == *current {
            continue;
        }
        applied.push(AppliedFix {
            category: finding.category,
            severity: finding.severity,
            line: finding.line,
            original: current.trim().to_string(),
            fixed: fixed.trim().to_string(),
        });
        lines[finding.line - 1] = fixed;

        match kind {
            FixKind::HtmlEncode => saw_html_encode = true,
            FixKind::ArgvExec => saw_argv_exec = true,
            FixKind::EnvVariable => saw_env_variable = true,
            _ => {}
        }
    }

    let mut fixed_text = lines.join("\n");
    if had_trailing_newline {
        fixed_text.push('\n');
    }

    if saw_html_encode || saw_argv_exec || saw_env_variable {
        let header = header_block(saw_html_encode, saw_argv_exec, saw_env_variable);
        fixed_text = format!("{header}{fixed_text}");
    }

    FixOutcome {
        fixed_text,
        applied,
    }
}
