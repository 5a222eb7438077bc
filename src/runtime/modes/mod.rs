//! Mode routing
//!
//! Unified entry points for the execution modes:
//! - Server mode (HTTP server, default)
//! - CLI mode (management commands)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
