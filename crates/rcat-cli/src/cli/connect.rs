//! Connect Command Implementation

use anyhow::Result;
use std::time::Duration;
use tracing::info;

use rcat_core::{RcatConfig, net, run_datagram_session, run_stream_session};

/// Run the connect command
pub async fn run(host: String, port: Option<u16>, udp: bool, config: &RcatConfig) -> Result<()> {
    let port = port.unwrap_or(config.default_port);

    let summary = if udp {
        let endpoint = net::dial_datagram(&host, port).await?;
        run_datagram_session(endpoint, tokio::io::stdin(), tokio::io::stdout()).await
    } else {
        let dial_timeout = Duration::from_secs(config.dial_timeout_secs);
        let stream = net::dial_stream(&host, port, dial_timeout).await?;
        run_stream_session(stream, tokio::io::stdin(), tokio::io::stdout()).await
    };

    info!(
        "Session finished: {} bytes received, {} bytes sent",
        summary.bytes_received, summary.bytes_sent
    );
    Ok(())
}
