//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};

use userdesk_infra::sqlite::pool::DEFAULT_DATABASE_URL;

/// CRUD service for users, with Swagger documentation.
#[derive(Parser)]
#[command(name = "userdesk", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub serve: ServeArgs,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "USERDESK_LOG_JSON")]
    pub log_json: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "USERDESK_OTEL")]
    pub otel: bool,

    /// More log output (-v for debug, -vv for trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve,

    /// Print the OpenAPI document as JSON and exit.
    Openapi,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Database connection string.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL, global = true)]
    pub database_url: String,

    /// Host to bind to.
    #[arg(long, env = "USERDESK_HOST", default_value = "0.0.0.0", global = true)]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "USERDESK_PORT", default_value_t = 8000, global = true)]
    pub port: u16,
}

impl ServeArgs {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
