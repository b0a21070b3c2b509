use anyhow::Context;
use clap::Parser;
use clearance_scout::core::ConfigProvider;
use clearance_scout::utils::{logger, validation::Validate};
use clearance_scout::{
    ClearancePipeline, CliConfig, EtlEngine, LocalStorage, ScoutError, SerpApiClient, TomlConfig,
};

const EXIT_CONFIG: i32 = 1;
const EXIT_RUN: i32 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting clearance-scout");
    tracing::debug!("CLI config: {:?}", cli);

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            run(config).await
        }
        None => run(cli).await,
    };

    if let Err(e) = outcome {
        tracing::error!("Run failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(if e.is_config_error() { EXIT_CONFIG } else { EXIT_RUN });
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<(), ScoutError> {
    config.validate()?;

    let search = SerpApiClient::from_config(&config)?;
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ClearancePipeline::new(search, storage, config);

    let report = EtlEngine::new(pipeline).run().await?;
    tracing::info!("Wrote {} records to {:?}", report.records.len(), report.outputs);
    Ok(())
}
