//! Listen Command Implementation

use anyhow::Result;
use tracing::info;

use rcat_core::{RcatConfig, net, run_datagram_session, run_stream_session};

/// Run the listen command
pub async fn run(port: Option<u16>, udp: bool, config: &RcatConfig) -> Result<()> {
    let port = port.unwrap_or(config.default_port);

    let summary = if udp {
        let endpoint = net::listen_datagram(port).await?;
        run_datagram_session(endpoint, tokio::io::stdin(), tokio::io::stdout()).await
    } else {
        let stream = net::listen_stream(port).await?;
        run_stream_session(stream, tokio::io::stdin(), tokio::io::stdout()).await
    };

    info!(
        "Session finished: {} bytes received, {} bytes sent",
        summary.bytes_received, summary.bytes_sent
    );
    Ok(())
}
