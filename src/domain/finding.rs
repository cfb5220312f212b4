use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Info => "Info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "info" => Ok(Self::Info),
            _ => Err(format!(
                "Unknown severity: {s}. Valid options: critical, high, medium, low, info"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "SQL Injection")]
    SqlInjection,
    #[serde(rename = "XSS (Cross-Site Scripting)")]
    Xss,
    #[serde(rename = "Hardcoded Secret")]
    HardcodedSecret,
    #[serde(rename = "Command Injection")]
    CommandInjection,
    #[serde(rename = "Insecure Dependency")]
    InsecureDependency,
    #[serde(rename = "Unsafe Eval")]
    UnsafeEval,
    #[serde(rename = "Weak Cryptography")]
    WeakCrypto,
    #[serde(rename = "Insecure Random")]
    InsecureRandom,
    #[serde(rename = "Debug Statement")]
    DebugStatement,
    #[serde(rename = "CORS Misconfiguration")]
    CorsWildcard,
    #[serde(rename = "Code Analysis Complete")]
    AnalysisComplete,
}

impl Category {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SqlInjection => "SQL Injection",
            Self::Xss => "XSS (Cross-Site Scripting)",
            Self::HardcodedSecret => "Hardcoded Secret",
            Self::CommandInjection => "Command Injection",
            Self::InsecureDependency => "Insecure Dependency",
            Self::UnsafeEval => "Unsafe Eval",
            Self::WeakCrypto => "Weak Cryptography",
            Self::InsecureRandom => "Insecure Random",
            Self::DebugStatement => "Debug Statement",
            Self::CorsWildcard => "CORS Misconfiguration",
            Self::AnalysisComplete => "Code Analysis Complete",
        }
    }

    /// Short identifier used in finding ids, the config `disable` list and the
    /// `fix --only` flag.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::SqlInjection => "sql-injection",
            Self::Xss => "xss",
            Self::HardcodedSecret => "hardcoded-secret",
            Self::CommandInjection => "command-injection",
            Self::InsecureDependency => "insecure-dependency",
            Self::UnsafeEval => "unsafe-eval",
            Self::WeakCrypto => "weak-crypto",
            Self::InsecureRandom => "insecure-random",
            Self::DebugStatement => "debug-statement",
            Self::CorsWildcard => "cors-wildcard",
            Self::AnalysisComplete => "analysis-complete",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        for category in [
            Self::SqlInjection,
            Self::Xss,
            Self::HardcodedSecret,
            Self::CommandInjection,
            Self::InsecureDependency,
            Self::UnsafeEval,
            Self::WeakCrypto,
            Self::InsecureRandom,
            Self::DebugStatement,
            Self::CorsWildcard,
            Self::AnalysisComplete,
        ] {
            if normalized == category.slug() || normalized == category.label().to_lowercase() {
                return Ok(category);
            }
        }
        Err(format!("Unknown category: {s}"))
    }
}

/// The textual substitution template that repairs a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    ParameterizedQuery,
    HtmlEncode,
    EnvVariable,
    ArgvExec,
    SecureTransport,
    JsonParse,
    ModernHash,
    CryptoRandom,
    StripDebug,
    PinnedOrigin,
}

/// One detected issue on one line.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub id: String,
    pub category: Category,
    pub severity: Severity,
    pub line: usize,
    /// 1-based byte offset of the trigger substring; best-effort display data.
    pub column: usize,
    pub description: String,
    pub suggestion: String,
    pub original_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<FixKind>,
    pub auto_fixable: bool,
}

/// Record of one successful substitution. `original` and `fixed` are trimmed
/// and never equal to each other.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedFix {
    pub category: Category,
    pub severity: Severity,
    pub line: usize,
    pub original: String,
    pub fixed: String,
}

/// Aggregate over one fix-application run.
#[derive(Debug, Clone, Serialize)]
pub struct FixSummary {
    pub total_fixes: usize,
    pub fixed_categories: Vec<Category>,
    pub critical_fixed: usize,
    pub high_fixed: usize,
    pub suggestions: Vec<String>,
    pub applied_fixes: Vec<AppliedFix>,
}
