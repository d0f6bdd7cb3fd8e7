use batch_geocode::utils::{logger, validation::Validate};
use batch_geocode::{
    lookup, CliConfig, Command, EtlEngine, EtlError, GeocodeClient, GeocodePipeline,
    GeocodeSettings, LocalStorage,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting batch-geocode");

    let settings = match cli.resolve_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => fail("Configuration validation failed", e),
    };
    tracing::debug!(
        "Using {} endpoint at {} (batch size {})",
        settings.endpoint,
        settings.base_url,
        settings.batch_size
    );

    let result = match &cli.command {
        Command::Batch(_) => run_batch(settings).await,
        Command::Search { text } | Command::Autocomplete { text } => {
            run_lookup(&settings, text).await
        }
    };

    if let Err(e) = result {
        fail("Geocoding failed", e);
    }
}

async fn run_batch(settings: GeocodeSettings) -> batch_geocode::Result<()> {
    let client = GeocodeClient::from_config(&settings);
    let storage = LocalStorage::new(".".to_string());
    let pipeline = GeocodePipeline::new(storage, settings, client);
    let engine = EtlEngine::new(pipeline);

    let output_path = engine.run().await?;
    println!("✅ Batch geocoding completed");
    println!("📁 Output saved to: {}", output_path);
    Ok(())
}

async fn run_lookup(settings: &GeocodeSettings, text: &str) -> batch_geocode::Result<()> {
    let client = GeocodeClient::from_config(settings);
    let candidates = lookup(&client, text).await?;

    if candidates.is_empty() {
        println!("No match for '{}'", text);
    }
    for candidate in &candidates {
        println!("{}", candidate.summary());
    }
    Ok(())
}

fn fail(context: &str, e: EtlError) -> ! {
    tracing::error!(
        "❌ {}: {} (Severity: {:?})",
        context,
        e,
        e.severity()
    );
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code());
}
