use serde::Deserialize;

use crate::domain::Category;
use crate::error::{RemedianError, Result};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RemedianConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_ignore_paths")]
    pub ignore_paths: Vec<String>,
    /// Category slugs excluded from scanning (e.g. "debug-statement").
    #[serde(default)]
    pub disable: Vec<String>,
    /// When true, `//` comment lines that still contain a known trigger
    /// substring are scanned anyway. This reproduces the behavior the demo
    /// content relies on; set to false to skip all comment lines.
    #[serde(default = "default_true")]
    pub flag_commented_code: bool,
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_file_size() -> u64 {
    10
}

fn default_ignore_paths() -> Vec<String> {
    vec![
        "**/target/**".to_string(),
        "**/.git/**".to_string(),
        "**/node_modules/**".to_string(),
        "**/dist/**".to_string(),
        "**/*.lock".to_string(),
        "**/*.min.js".to_string(),
        "**/*.min.css".to_string(),
        "**/*.png".to_string(),
        "**/*.jpg".to_string(),
        "**/*.gif".to_string(),
        "**/*.ico".to_string(),
        "**/*.woff".to_string(),
        "**/*.woff2".to_string(),
        "**/*.zip".to_string(),
        "**/*.gz".to_string(),
        "**/*.pdf".to_string(),
    ]
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_paths: default_ignore_paths(),
            disable: Vec::new(),
            flag_commented_code: default_true(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
        }
    }
}

impl RemedianConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::path::Path::new("remedian.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(config_path)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)?;
        let config: RemedianConfig =
            toml::from_str(&content).map_err(|e| RemedianError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects `disable` entries that do not name a known category.
    pub fn validate(&self) -> Result<()> {
        for slug in &self.scan.disable {
            slug.parse::<Category>()
                .map_err(|_| RemedianError::UnknownCategory(slug.clone()))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn disabled_categories(&self) -> Vec<Category> {
        self.scan
            .disable
            .iter()
            .filter_map(|slug| slug.parse().ok())
            .collect()
    }
}
