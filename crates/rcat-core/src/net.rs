//! Dial and listen helpers
//!
//! Establishes the single connection a session runs over. Failures here
//! are fatal setup errors, raised to the caller before any engine
//! activity; contrast with the engines themselves, which never fail.

use std::time::Duration;

use tokio::net::{TcpListener, TcpStream, UdpSocket, lookup_host};
use tokio::time::timeout;
use tracing::info;

use crate::endpoint::DatagramEndpoint;
use crate::error::{RcatError, Result};

/// Binds a TCP listener and accepts exactly one connection.
pub async fn listen_stream(port: u16) -> Result<TcpStream> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|e| RcatError::BindFailed {
            port,
            reason: e.to_string(),
        })?;

    info!("Listening on tcp:{}", port);

    let (stream, peer) = listener.accept().await?;
    info!("[{}] connection opened", peer);
    Ok(stream)
}

/// Connects to a remote TCP peer, bounded by a dial timeout.
pub async fn dial_stream(host: &str, port: u16, dial_timeout: Duration) -> Result<TcpStream> {
    let addr = format!("{}:{}", host, port);
    let stream = timeout(dial_timeout, TcpStream::connect(&addr))
        .await
        .map_err(|_| RcatError::DialTimeout {
            addr: addr.clone(),
            secs: dial_timeout.as_secs(),
        })?
        .map_err(|e| RcatError::DialFailed {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;

    info!("Connected to {}", addr);
    Ok(stream)
}

/// Binds a UDP socket with no fixed peer; the session learns the remote
/// address from the first datagram received.
pub async fn listen_datagram(port: u16) -> Result<DatagramEndpoint> {
    let socket = UdpSocket::bind(("0.0.0.0", port))
        .await
        .map_err(|e| RcatError::BindFailed {
            port,
            reason: e.to_string(),
        })?;

    info!("Listening on udp:{}", port);
    Ok(DatagramEndpoint::unbound(socket))
}

/// Binds an ephemeral UDP socket and connects it to the remote peer.
pub async fn dial_datagram(host: &str, port: u16) -> Result<DatagramEndpoint> {
    let addr = format!("{}:{}", host, port);
    let peer = lookup_host(&addr)
        .await
        .map_err(|e| RcatError::AddressResolution(e.to_string()))?
        .next()
        .ok_or_else(|| RcatError::AddressResolution(addr.clone()))?;

    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket
        .connect(peer)
        .await
        .map_err(|e| RcatError::DialFailed {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;

    info!("Sending datagrams to {}", addr);
    Ok(DatagramEndpoint::connected(socket, peer))
}
