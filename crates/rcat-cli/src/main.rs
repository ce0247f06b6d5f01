//! rcat CLI
//!
//! Command-line interface for the rcat TCP/UDP relay.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments and load defaults
    let cli = Cli::parse();
    let config = cli::load_config(cli.config)?;

    // Setup logging; status lines go to stderr so stdout stays a clean
    // data channel for the session.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(cli::log_filter(cli.verbose, &config))
        .init();

    // Execute command
    match cli.command {
        Commands::Listen { port, udp } => {
            cli::listen::run(port, udp, &config).await?;
        }
        Commands::Connect { host, port, udp } => {
            cli::connect::run(host, port, udp, &config).await?;
        }
    }

    Ok(())
}
