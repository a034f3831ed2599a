//! EMS API - HTTP server and migration CLI.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ems_api::api::{create_router, AppState};
use ems_api::config::Config;
use ems_api::infra::Database;

#[derive(Parser)]
#[command(name = "ems-api")]
#[command(about = "Employee management API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Serve => {
            let database = Arc::new(Database::connect(&config.database_url).await?);
            let addr = config.server_addr();
            let state = AppState::from_config(database, config);
            let app = create_router(state);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on {}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Migrate { action } => {
            let database = Database::connect_without_migrations(&config.database_url).await?;
            match action {
                MigrateCommands::Up => database.run_migrations().await?,
                MigrateCommands::Down => database.rollback_migration().await?,
                MigrateCommands::Fresh => database.fresh_migrations().await?,
            }
            tracing::info!("Migration command completed");
        }
    }

    Ok(())
}
