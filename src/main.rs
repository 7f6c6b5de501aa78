use clap::Parser;
use concept_studio::app::{router, serve};
use concept_studio::utils::{error::ErrorSeverity, logger, validation::Validate};
use concept_studio::{CliConfig, GenerationProxy, HttpAgentBackend};
use tokio::net::TcpListener;

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting Concept Studio server");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.load_studio_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(e.severity()));
        }
    };

    tracing::info!(
        "Strategy: {:?}, backend: {}",
        config.generation.strategy,
        config.backend.base_url
    );
    if config.credentials_missing() {
        tracing::warn!(
            "Backend credentials are missing, requests will be answered in {:?} mode",
            config.generation.missing_credentials
        );
    }

    let backend = HttpAgentBackend::from_config(&config)?;
    let app = router(GenerationProxy::new(config, backend));

    let listener = TcpListener::bind(&cli.bind).await?;
    serve(listener, app).await?;

    tracing::info!("✅ Server stopped");
    Ok(())
}
