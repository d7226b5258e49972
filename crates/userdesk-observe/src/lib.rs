//! Observability setup for userdesk: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
