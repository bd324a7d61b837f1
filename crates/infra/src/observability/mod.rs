//! Observability infrastructure
//!
//! Structured logging through `tracing`. Metrics and exporters are left to the
//! host application.

pub mod logging;

pub use logging::init_tracing;
