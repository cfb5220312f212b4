//! End-to-end library tests for the scan and remediation pipeline.

use remedian::{remediate, scan, Category, RemedianConfig, Severity};

#[test]
fn test_sql_injection_demo_line_round_trip() {
    let text = "db.query(`SELECT * FROM users WHERE id = ${userId}`);";
    let findings = scan(text);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, Category::SqlInjection);
    assert_eq!(findings[0].severity, Severity::Critical);

    let outcome = remediate(text);
    assert_eq!(
        outcome.fixed_text,
        "db.query('SELECT * FROM users WHERE id = ?', [userId]);"
    );
}

#[test]
fn test_hello_world_is_below_sentinel_threshold() {
    assert!(scan("hello world").is_empty());
}

#[test]
fn test_long_clean_text_produces_sentinel_only() {
    let text = "this paragraph describes application behavior in plain prose form";
    let findings = scan(text);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, Category::AnalysisComplete);
    assert_eq!(findings[0].severity, Severity::Info);
    assert!(!findings[0].auto_fixable);
}

#[test]
fn test_multi_line_fix_application_order() {
    let text = "\
const user = req.params.id;
db.query(`SELECT * FROM users WHERE id = ${user}`);
const secretToken = 'abc123';
res.send('<p>' + comment + '</p>');
exec(\"ls \" + dir);
";
    let outcome = remediate(text);

    let lines: Vec<usize> = outcome.applied.iter().map(|f| f.line).collect();
    let mut sorted = lines.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(lines, sorted, "fixes must be applied bottom-up");

    assert!(outcome.fixed_text.contains("db.query('SELECT * FROM users WHERE id = ?', [userId]);"));
    assert!(outcome.fixed_text.contains("process.env.SECRET_TOKEN"));
    assert!(outcome.fixed_text.contains("res.send(escapeHtml("));
    assert!(outcome.fixed_text.contains("execFile('rm', ['-rf', filename])"));
}

#[test]
fn test_header_present_only_for_trigger_kinds() {
    let with_header = remediate("const password = 'hunter2';\n");
    assert!(with_header.fixed_text.starts_with("// ============"));

    let without_header = remediate("eval(x);\n");
    assert!(!without_header.fixed_text.contains("AUTO-FIXED"));
}

#[test]
fn test_remediation_is_deterministic() {
    let text = "res.send('<b>' + userInput + '</b>');\nconsole.log(debugValue);\n";
    let first = remediate(text);
    let second = remediate(text);
    assert_eq!(first.fixed_text, second.fixed_text);
    assert_eq!(first.applied.len(), second.applied.len());
}

#[test]
fn test_disabled_categories_respected_end_to_end() {
    let mut config = RemedianConfig::default();
    config.scan.disable = vec!["unsafe-eval".to_string(), "xss".to_string()];
    let findings = remedian::engine::scan_content("eval(userInput);", &config);
    assert!(findings.is_empty());
}

#[test]
fn test_fix_leaves_untouched_lines_alone() {
    let text = "const a = 1;\neval(x);\nconst b = 2;\n";
    let outcome = remediate(text);
    let lines: Vec<&str> = outcome.fixed_text.lines().collect();
    assert_eq!(lines[0], "const a = 1;");
    assert_eq!(lines[1], "JSON.parse(x);");
    assert_eq!(lines[2], "const b = 2;");
}
