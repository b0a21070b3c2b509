use crate::adapters::serpapi::{DEFAULT_ENDPOINT, DEFAULT_ENGINE};
use crate::config::{DEFAULT_CSV_FILENAME, DEFAULT_LIMIT, DEFAULT_QUERY, DEFAULT_XLSX_FILENAME};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Clone, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub engine: Option<String>,
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("endpoint", &self.endpoint)
            .field("engine", &self.engine)
            .field("api_key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    pub store_ids: Vec<u64>,
    pub query: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    pub csv_filename: Option<String>,
    pub xlsx_filename: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScoutError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.source.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn api_key(&self) -> &str {
        &self.source.api_key
    }

    fn engine(&self) -> &str {
        self.source.engine.as_deref().unwrap_or(DEFAULT_ENGINE)
    }

    fn store_ids(&self) -> &[u64] {
        &self.extract.store_ids
    }

    fn query(&self) -> &str {
        self.extract.query.as_deref().unwrap_or(DEFAULT_QUERY)
    }

    fn limit(&self) -> usize {
        self.extract.limit.unwrap_or(DEFAULT_LIMIT)
    }

    fn output_path(&self) -> &str {
        self.load.output_path.as_deref().unwrap_or(".")
    }

    fn csv_filename(&self) -> &str {
        self.load.csv_filename.as_deref().unwrap_or(DEFAULT_CSV_FILENAME)
    }

    fn xlsx_filename(&self) -> &str {
        self.load.xlsx_filename.as_deref().unwrap_or(DEFAULT_XLSX_FILENAME)
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if self.source.api_key.starts_with("${") {
            return Err(ScoutError::MissingConfigError {
                field: format!("source.api_key (unset variable {})", self.source.api_key),
            });
        }
        crate::config::validate_provider(self)
    }
}
