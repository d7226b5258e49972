//! userdesk REST API entry point.
//!
//! Binary name: `userdesk`
//!
//! Parses CLI arguments, sets up tracing, connects to the database and
//! serves the user CRUD API until Ctrl+C/SIGTERM.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use utoipa::OpenApi;

use cli::{Cli, Commands, ServeArgs};
use state::AppState;
use userdesk_observe::tracing_setup::{
    LogFormat, TracingConfig, directive_for_verbosity, init_tracing, shutdown_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingConfig {
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
        otel: cli.otel,
        default_directive: directive_for_verbosity(cli.verbose).to_string(),
    })?;

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Openapi => print_openapi(),
        Commands::Serve => serve(&cli.serve).await,
    };

    if let Err(e) = &result {
        tracing::error!("fatal: {e:#}");
    }
    shutdown_tracing();
    result
}

fn print_openapi() -> anyhow::Result<()> {
    let json = http::doc::ApiDoc::openapi()
        .to_pretty_json()
        .context("failed to render OpenAPI document")?;
    println!("{json}");
    Ok(())
}

async fn serve(args: &ServeArgs) -> anyhow::Result<()> {
    let state = AppState::init(&args.database_url)
        .await
        .context("failed to connect to database")?;

    let addr = args.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "userdesk API listening");
    tracing::info!("Swagger UI at http://{addr}/swagger-ui/");

    let db_pool = state.db_pool.clone();
    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db_pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
