//! Arogya CLI and REST API entry point.
//!
//! Binary name: `arogya`
//!
//! Parses CLI arguments, initializes tracing, the database and services,
//! then dispatches to the matching command handler or starts the REST API
//! server.

mod cli;
mod http;
mod state;

use clap::Parser;

use arogya_observe::tracing_setup::{
    TracingOptions, init_tracing, shutdown_tracing, verbosity_filter,
};

use cli::{Cli, Commands, DiseaseAction, SessionAction};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = TracingOptions {
        default_filter: verbosity_filter(cli.verbose, cli.quiet).to_string(),
        json: cli.log_json,
        otel: cli.otel,
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Initialize application state (DB, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, data_dir = %state.data_dir.display(), "arogya API listening");
            if !cli.quiet {
                println!(
                    "  {} Arogya API listening on {}",
                    console::style("+").green().bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Sessions { action } => match action {
            SessionAction::List { limit } => {
                cli::session::list_sessions(&state, limit, cli.json).await?;
            }
            SessionAction::Show { hid } => {
                cli::session::show_session(&state, &hid, cli.json).await?;
            }
            SessionAction::Delete { hid } => {
                cli::session::delete_session(&state, &hid, cli.json).await?;
            }
        },

        Commands::Diseases { action } => match action {
            DiseaseAction::List { limit } => {
                cli::diseases::list_diseases(&state, limit, cli.json).await?;
            }
        },
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
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
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
