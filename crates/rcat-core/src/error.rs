//! Error types for rcat
//!
//! Provides a unified error handling strategy using thiserror.
//!
//! Only setup (bind/dial/resolve) and configuration failures surface as
//! errors. The transfer engines report per-direction failures through the
//! log and always run to completion, so none of their entry points return
//! a `Result`.

use thiserror::Error;

/// Result type alias for rcat operations
pub type Result<T> = std::result::Result<T, RcatError>;

/// Unified error type for all rcat operations
#[derive(Error, Debug)]
pub enum RcatError {
    #[error("Failed to bind to port {port}: {reason}")]
    BindFailed { port: u16, reason: String },

    #[error("Failed to connect to {addr}: {reason}")]
    DialFailed { addr: String, reason: String },

    #[error("Connection to {addr} timed out after {secs} seconds")]
    DialTimeout { addr: String, secs: u64 },

    #[error("Could not resolve address: {0}")]
    AddressResolution(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
