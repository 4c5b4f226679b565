use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};

use jarvis::features::{get_features, get_version, is_enabled};
use jarvis::{Assistant, Config};

async fn run() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Jarvis v{}...", get_version());
    for feature in get_features() {
        let status = if is_enabled(&feature, &config) { "on" } else { "off" };
        info!("  {} v{} [{status}]", feature.name, feature.version);
    }
    info!("Memory file: {}", config.memory_file.display());

    let assistant = Assistant::build(&config).await?;

    tokio::select! {
        result = assistant.run() => result,
        _ = tokio::signal::ctrl_c() => {
            println!("Exiting Jarvis.");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    match run().await {
        // A pending stdin read blocks runtime shutdown
        Ok(()) => std::process::exit(0),
        Err(e) => {
            error!("Jarvis crashed: {e:#}");
            eprintln!("Jarvis crashed: {e:#}");
            std::process::exit(1);
        }
    }
}
