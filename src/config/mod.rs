pub mod cli;
pub mod toml_config;

use crate::adapters::serpapi::{DEFAULT_ENDPOINT, DEFAULT_ENGINE};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use clap::Parser;

pub const DEFAULT_CSV_FILENAME: &str = "clearance_items.csv";
pub const DEFAULT_XLSX_FILENAME: &str = "clearance_items.xlsx";
pub const DEFAULT_QUERY: &str = "clearance";
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Clone, Parser)]
#[command(name = "clearance-scout")]
#[command(about = "Search store clearance listings and export them to CSV and XLSX")]
pub struct CliConfig {
    #[arg(long, env = "SERPAPI_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, value_delimiter = ',', default_value = "625,1007,1017,635,627")]
    pub store_ids: Vec<u64>,

    #[arg(long, default_value = DEFAULT_QUERY)]
    pub query: String,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    #[arg(long, default_value = DEFAULT_ENGINE)]
    pub engine: String,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_CSV_FILENAME)]
    pub csv_filename: String,

    #[arg(long, default_value = DEFAULT_XLSX_FILENAME)]
    pub xlsx_filename: String,

    #[arg(long, help = "Per-request timeout; the HTTP client default applies when unset")]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Path to a TOML configuration file; replaces the search flags")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

// Hand-written so the API key never reaches a log line.
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("api_key", &"<redacted>")
            .field("store_ids", &self.store_ids)
            .field("query", &self.query)
            .field("limit", &self.limit)
            .field("engine", &self.engine)
            .field("api_endpoint", &self.api_endpoint)
            .field("output_path", &self.output_path)
            .field("csv_filename", &self.csv_filename)
            .field("xlsx_filename", &self.xlsx_filename)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn engine(&self) -> &str {
        &self.engine
    }

    fn store_ids(&self) -> &[u64] {
        &self.store_ids
    }

    fn query(&self) -> &str {
        &self.query
    }

    fn limit(&self) -> usize {
        self.limit
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn csv_filename(&self) -> &str {
        &self.csv_filename
    }

    fn xlsx_filename(&self) -> &str {
        &self.xlsx_filename
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_url("api_endpoint", config.api_endpoint())?;
    validation::validate_non_empty_string("api_key", config.api_key())?;
    validation::validate_non_empty_string("engine", config.engine())?;
    validation::validate_non_empty_string("query", config.query())?;
    validation::validate_store_ids("store_ids", config.store_ids())?;
    validation::validate_positive_number("limit", config.limit(), 1)?;
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_file_extension("csv_filename", config.csv_filename(), "csv")?;
    validation::validate_file_extension("xlsx_filename", config.xlsx_filename(), "xlsx")?;
    if config.timeout_seconds() == Some(0) {
        return Err(ScoutError::InvalidConfigValueError {
            field: "timeout_seconds".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        });
    }
    Ok(())
}
