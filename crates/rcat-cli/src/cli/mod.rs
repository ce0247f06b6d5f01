//! CLI Command Definitions
//!
//! Defines the command-line interface using clap.

pub mod connect;
pub mod listen;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rcat_core::RcatConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// rcat - relay between the standard streams and a remote peer
///
/// Pipe stdin/stdout over TCP or UDP, netcat style. One side listens,
/// the other connects; the session runs until both directions finish.
#[derive(Parser, Debug)]
#[command(name = "rcat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a configuration file (defaults to the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Listen for one incoming peer
    ///
    /// Accepts a single connection (TCP) or fixes the peer from the first
    /// datagram received (UDP), then relays until the session ends.
    #[command(visible_alias = "l")]
    Listen {
        /// Port to listen on (defaults from the configuration file)
        #[arg(value_name = "PORT")]
        port: Option<u16>,

        /// Use UDP instead of TCP
        #[arg(short, long)]
        udp: bool,
    },

    /// Connect to a listening peer
    ///
    /// Dials the remote host and relays until the session ends. In UDP
    /// mode, send `~.` on a line of its own to hang up.
    #[command(visible_alias = "c")]
    Connect {
        /// Remote host to connect to
        #[arg(value_name = "HOST")]
        host: String,

        /// Remote port (defaults from the configuration file)
        #[arg(value_name = "PORT")]
        port: Option<u16>,

        /// Use UDP instead of TCP
        #[arg(short, long)]
        udp: bool,
    },
}

/// Loads the configuration: an explicit path must exist, the default path
/// is optional.
pub fn load_config(path: Option<PathBuf>) -> Result<RcatConfig> {
    match path {
        Some(path) => Ok(RcatConfig::load(&path)?),
        None => {
            let path = RcatConfig::default_config_path();
            if path.exists() {
                Ok(RcatConfig::load(&path)?)
            } else {
                Ok(RcatConfig::default())
            }
        }
    }
}

/// Debug logging is on when either the `--verbose` flag or the
/// configuration asks for it.
pub fn log_filter(verbose: bool, config: &RcatConfig) -> EnvFilter {
    if verbose || config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        let config = RcatConfig::default();
        assert_eq!(log_filter(false, &config).to_string(), "info");
    }

    #[test]
    fn test_log_filter_honors_verbose_flag() {
        let config = RcatConfig::default();
        assert_eq!(log_filter(true, &config).to_string(), "debug");
    }

    #[test]
    fn test_log_filter_honors_config_debug() {
        let config = RcatConfig::new().with_debug(true);
        assert_eq!(log_filter(false, &config).to_string(), "debug");
    }
}
