//! `flavors-api` binary: serve the HTTP API, create the table, or seed it.

use clap::{Parser, Subcommand};
use flavors_api::{build_router, ensure_schema, seed, AppState, PgFlavorStore, SeedOutcome, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flavors-api", version, about = "REST backend for the flavors table")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Create the flavors table if it does not exist
    Migrate,
    /// Insert the fixed seed rows into an empty table
    Seed {
        /// Drop and recreate the table first. Deletes every existing row.
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flavors_api=info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let pool = match PgFlavorStore::connect(&settings).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "cannot connect to database");
            return Err(e.into());
        }
    };
    tracing::info!("connected to database");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => ensure_schema(&pool).await?,
        Command::Seed { reset } => match seed(&pool, reset).await? {
            SeedOutcome::Seeded(rows) => tracing::info!(rows, "seed complete"),
            SeedOutcome::SkippedNotEmpty(rows) => {
                tracing::warn!(rows, "table already has rows; rerun with --reset to replace them")
            }
        },
        Command::Serve => {
            ensure_schema(&pool).await?;
            let state = AppState::new(PgFlavorStore::new(pool));
            let app = build_router(state);

            let listener = TcpListener::bind(settings.listen_addr()).await?;
            tracing::info!("listening on {}", listener.local_addr()?);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            tracing::info!("server stopped");
        }
    }
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }
    tracing::info!("shutdown signal received");
}
