//! Athenaeum - Library Management System
//!
//! Interactive command-line front end over the in-memory library core.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use athenaeum::{cli, config::AppConfig, library::Library, seed, services::payment};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("athenaeum={}", config.logging.level).into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Athenaeum v{}", env!("CARGO_PKG_VERSION"));

    // Choose the payment rail and build the library around it
    let authorizer = payment::from_config(&config.payment);
    let mut library = Library::new(authorizer, &config.lending);

    // Pre-populate with demo data
    seed::seed(&mut library)?;

    // Hand control to the interactive menu
    cli::run(library)?;

    Ok(())
}
