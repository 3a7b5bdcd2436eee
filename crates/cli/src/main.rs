use std::path::PathBuf;

use anyhow::Context;
use bookstore_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Books and comments API
#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about)]
struct Cli {
    /// Configuration directory (overrides BOOKSTORE_CONFIG_DIR)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Environment overlay to load (overrides BOOKSTORE_ENV)
    #[arg(long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load_with(cli.config_dir.clone(), cli.env.clone())
        .with_context(|| "failed to load bookstore settings")?;
    bookstore_telemetry::init(&settings.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!(env = ?settings.environment, "serving bookstore API");
            bookstore_app::run(settings).await
        }
        Command::Migrate => {
            let store = bookstore_app::open_store(&settings.database)?;
            let version = store.schema_version()?;
            tracing::info!(db = %settings.database.path, version, "database migrated");
            println!("schema version {version}");
            Ok(())
        }
    }
}
