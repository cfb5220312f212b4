use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Category, FixKind, Severity};

/// One per-line detection rule. Rules are independent of each other; the
/// table order only decides finding order when several rules hit one line.
pub struct ScanRule {
    pub category: Category,
    pub severity: Severity,
    pub description: &'static str,
    pub suggestion: &'static str,
    pub fix: FixKind,
    pub matches: fn(&str) -> bool,
    pub column: fn(&str) -> usize,
}

const SQL_CALLS: &[&str] = &[
    "db.query",
    "db.execute",
    "connection.query",
    "pool.query",
    "database.query",
];

const XSS_SINKS: &[&str] = &["res.send", "res.write", "innerHTML", "document.write", "eval("];

const SECRET_KEYWORDS: &[&str] = &[
    "apikey",
    "password",
    "secret",
    "token",
    "key",
    "credential",
    "auth",
];

const EXEC_CALLS: &[&str] = &["exec(", "spawn(", "system("];

static RE_WEAK_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(md5|sha1)\s*\(").expect("invalid regex pattern"));
static RE_MATH_RANDOM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Math\.random\s*\(").expect("invalid regex pattern"));
static RE_CONSOLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"console\.(log|debug|info)\s*\(").expect("invalid regex pattern"));
static RE_CORS_WILDCARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Access-Control-Allow-Origin.*\*").expect("invalid regex pattern"));

fn contains_any(line: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| line.contains(n))
}

fn has_concat_or_interpolation(line: &str) -> bool {
    line.contains('+') || line.contains("${")
}

fn sql_matches(line: &str) -> bool {
    let injectable = line.contains("${")
        || (line.contains('"') && line.contains('\'') && line.contains('+'));
    contains_any(line, SQL_CALLS) && injectable
}

fn sql_column(line: &str) -> usize {
    line.find("query")
        .or_else(|| line.find("execute"))
        .map_or(1, |i| i + 1)
}

fn xss_matches(line: &str) -> bool {
    let tainted = has_concat_or_interpolation(line) || line.contains("userInput");
    contains_any(line, XSS_SINKS) && tainted
}

fn xss_column(line: &str) -> usize {
    line.find("send")
        .or_else(|| line.find("innerHTML"))
        .map_or(1, |i| i + 1)
}

fn secret_matches(line: &str) -> bool {
    let lower = line.to_lowercase();
    contains_any(&lower, SECRET_KEYWORDS)
        && (line.contains('=') || line.contains(':'))
        && (line.contains('\'') || line.contains('"'))
}

fn secret_column(line: &str) -> usize {
    let quote = if line.contains('\'') { '\'' } else { '"' };
    line.find(quote).map_or(1, |i| i + 1)
}

fn exec_matches(line: &str) -> bool {
    contains_any(line, EXEC_CALLS) && has_concat_or_interpolation(line)
}

fn exec_column(line: &str) -> usize {
    EXEC_CALLS
        .iter()
        .filter_map(|call| line.find(call))
        .max()
        .map_or(1, |i| i + 1)
}

fn dependency_matches(line: &str) -> bool {
    line.contains("require(")
        && (line.contains("http:")
            || line.contains("ftp:")
            || line.to_lowercase().contains("insecure"))
}

fn dependency_column(line: &str) -> usize {
    line.find("require(").map_or(1, |i| i + 1)
}

fn eval_matches(line: &str) -> bool {
    line.contains("eval(") && !line.contains("//")
}

fn eval_column(line: &str) -> usize {
    line.find("eval(").map_or(1, |i| i + 1)
}

fn weak_hash_matches(line: &str) -> bool {
    RE_WEAK_HASH.is_match(line)
}

fn weak_hash_column(line: &str) -> usize {
    RE_WEAK_HASH.find(line).map_or(1, |m| m.start() + 1)
}

fn random_matches(line: &str) -> bool {
    RE_MATH_RANDOM.is_match(line)
}

fn random_column(line: &str) -> usize {
    RE_MATH_RANDOM.find(line).map_or(1, |m| m.start() + 1)
}

fn console_matches(line: &str) -> bool {
    RE_CONSOLE.is_match(line)
}

fn console_column(line: &str) -> usize {
    RE_CONSOLE.find(line).map_or(1, |m| m.start() + 1)
}

fn cors_matches(line: &str) -> bool {
    RE_CORS_WILDCARD.is_match(line)
}

fn cors_column(line: &str) -> usize {
    line.find("Access-Control-Allow-Origin").map_or(1, |i| i + 1)
}

pub static RULES: &[ScanRule] = &[
    ScanRule {
        category: Category::SqlInjection,
        severity: Severity::Critical,
        description: "User input directly concatenated into SQL query",
        suggestion: "Use parameterized queries or prepared statements",
        fix: FixKind::ParameterizedQuery,
        matches: sql_matches,
        column: sql_column,
    },
    ScanRule {
        category: Category::Xss,
        severity: Severity::High,
        description: "User input directly output without proper encoding",
        suggestion: "Use output encoding or safe alternatives",
        fix: FixKind::HtmlEncode,
        matches: xss_matches,
        column: xss_column,
    },
    ScanRule {
        category: Category::HardcodedSecret,
        severity: Severity::Critical,
        description: "Sensitive credential exposed in source code",
        suggestion: "Move to environment variables or secure vault",
        fix: FixKind::EnvVariable,
        matches: secret_matches,
        column: secret_column,
    },
    ScanRule {
        category: Category::CommandInjection,
        severity: Severity::Critical,
        description: "User input used in system commands",
        suggestion: "Use parameterized command execution",
        fix: FixKind::ArgvExec,
        matches: exec_matches,
        column: exec_column,
    },
    ScanRule {
        category: Category::InsecureDependency,
        severity: Severity::Medium,
        description: "Potential insecure or outdated dependency",
        suggestion: "Update to secure version or use HTTPS",
        fix: FixKind::SecureTransport,
        matches: dependency_matches,
        column: dependency_column,
    },
    ScanRule {
        category: Category::UnsafeEval,
        severity: Severity::Critical,
        description: "Dangerous eval() function used with dynamic input",
        suggestion: "Use JSON.parse() or safer alternatives",
        fix: FixKind::JsonParse,
        matches: eval_matches,
        column: eval_column,
    },
    ScanRule {
        category: Category::WeakCrypto,
        severity: Severity::Medium,
        description: "Using weak/deprecated hashing algorithm",
        suggestion: "Use bcrypt, Argon2, or SHA-256 for hashing",
        fix: FixKind::ModernHash,
        matches: weak_hash_matches,
        column: weak_hash_column,
    },
    ScanRule {
        category: Category::InsecureRandom,
        severity: Severity::Low,
        description: "Math.random() is not cryptographically secure",
        suggestion: "Use crypto.randomBytes() for security-sensitive operations",
        fix: FixKind::CryptoRandom,
        matches: random_matches,
        column: random_column,
    },
    ScanRule {
        category: Category::DebugStatement,
        severity: Severity::Low,
        description: "Console statements should be removed in production",
        suggestion: "Remove or use a proper logging library",
        fix: FixKind::StripDebug,
        matches: console_matches,
        column: console_column,
    },
    ScanRule {
        category: Category::CorsWildcard,
        severity: Severity::Medium,
        description: "Wildcard CORS allows any origin to access resources",
        suggestion: "Specify allowed origins explicitly",
        fix: FixKind::PinnedOrigin,
        matches: cors_matches,
        column: cors_column,
    },
];
