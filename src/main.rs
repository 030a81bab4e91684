use anyhow::Result;
use clap::{Parser, Subcommand};
use cms_core::{config::Config, migration, server, telemetry};
use tracing::info;

#[derive(Parser)]
#[command(name = "cms-core")]
#[command(about = "CMS Core - account, group and access level service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare the store, seed the root account and serve HTTP (default)
    Serve,
    /// Prepare the store and seed the root account, then exit
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let prometheus_handle = telemetry::init(&config.telemetry);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!("Starting CMS Core Service");
            info!("HTTP server listening on {}", config.http_addr());
            server::run(config, prometheus_handle).await
        }
        Commands::Init => migration::init(&config).await,
    }
}
