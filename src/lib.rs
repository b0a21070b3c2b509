pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::serpapi::SerpApiClient;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::{etl::EtlEngine, pipeline::ClearancePipeline};
pub use domain::model::{ClearanceRecord, RawItem, RunReport, StoreOutcome};
pub use utils::error::{Result, ScoutError};
