use clap::Parser;
use decor_orders::{
    cli::{self, Cli},
    config::{self, Credentials},
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Parse arguments before touching the environment so --help works anywhere
    let cli = Cli::parse();

    // 3. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 4. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!("Successfully processed application configuration.");

    // 5. Backend credentials are read directly before use, never stored in AppConfig
    let credentials = Credentials::from_env();
    if credentials.is_none() {
        warn!("DECOR_API_USERNAME / DECOR_API_PASSWORD not set");
    }

    // 6. Run the command
    cli::run(cli, &app_config, credentials)
        .await
        .inspect_err(|e| error!("Command failed: {}", e))
}
