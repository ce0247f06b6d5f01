//! Datagram transfer engine
//!
//! Full-duplex copy between a UDP endpoint and the local standard streams.
//! Unlike the stream engine this works unit by unit (one read is one
//! send), learns the remote address from the first datagram when the
//! endpoint is unbound, and recognizes the `~.` disconnect sequence.

use std::net::SocketAddr;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{error, info};

use super::{
    Direction, SessionEvent, SessionSummary, UNIT_LIMIT, is_disconnect_unit, log_direction_done,
    peer_label,
};
use crate::endpoint::DatagramEndpoint;

/// Relays datagrams between `endpoint` and the local standard streams
/// until both directions have finished, then returns the byte totals.
///
/// With an unbound endpoint (listen mode) the receive loop starts alone;
/// the send loop is held back until the remote address has been learned
/// from the first datagram, so no outbound send can ever precede it.
pub async fn run_datagram_session<I, O>(
    endpoint: DatagramEndpoint,
    local_in: I,
    local_out: O,
) -> SessionSummary
where
    I: AsyncRead + Unpin + Send + 'static,
    O: AsyncWrite + Unpin + Send + 'static,
{
    let (report_tx, mut report_rx) = mpsc::channel(2);

    tokio::spawn(pump_inbound(
        endpoint.clone(),
        local_out,
        report_tx.clone(),
    ));

    let mut summary = SessionSummary::default();

    let peer = match endpoint.peer_addr() {
        Some(addr) => addr,
        None => match report_rx.recv().await {
            Some(SessionEvent::PeerLearned(addr)) => {
                info!("[{}] datagram received", addr);
                addr
            }
            // The receive loop died before any datagram arrived, so there
            // is no address to send to; wind down without a send loop.
            Some(SessionEvent::DirectionDone { direction, bytes }) => {
                log_direction_done(None, direction, bytes);
                summary.record(direction, bytes);
                return summary;
            }
            None => return summary,
        },
    };
    summary.peer = Some(peer);

    tokio::spawn(pump_outbound(endpoint, local_in, peer, report_tx));

    let mut remaining = 2;
    while remaining > 0 {
        match report_rx.recv().await {
            Some(SessionEvent::DirectionDone { direction, bytes }) => {
                log_direction_done(Some(peer), direction, bytes);
                summary.record(direction, bytes);
                remaining -= 1;
            }
            Some(SessionEvent::PeerLearned(_)) => {}
            None => break,
        }
    }

    summary
}

/// Receive loop: one datagram in, one write to local output.
///
/// On an unbound endpoint the first datagram's sender becomes the session
/// peer, reported exactly once and never revised; datagrams arriving
/// later from other senders are still forwarded but do not change it.
async fn pump_inbound<O>(
    endpoint: DatagramEndpoint,
    mut local_out: O,
    reports: mpsc::Sender<SessionEvent>,
) where
    O: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; UNIT_LIMIT];
    let mut bytes = 0u64;
    let mut peer = endpoint.peer_addr();
    let endpoint_bound = peer.is_some();

    loop {
        let (n, from) = match endpoint.recv_unit(&mut buf).await {
            Ok(unit) => unit,
            Err(e) => {
                error!("[{}] inbound read error: {}", peer_label(peer), e);
                break;
            }
        };

        if !endpoint_bound && peer.is_none() {
            peer = Some(from);
            if reports.send(SessionEvent::PeerLearned(from)).await.is_err() {
                break;
            }
        }

        if is_disconnect_unit(&buf[..n]) {
            break;
        }

        if let Err(e) = local_out.write_all(&buf[..n]).await {
            error!("[{}] inbound write error: {}", peer_label(peer), e);
            break;
        }
        bytes += n as u64;
    }

    let _ = local_out.shutdown().await;
    let _ = reports
        .send(SessionEvent::DirectionDone {
            direction: Direction::Inbound,
            bytes,
        })
        .await;
}

/// Send loop: one chunk from local input, one datagram out.
///
/// The disconnect check is content-based, so typing `~.` locally ends this
/// direction too, without the sequence ever reaching the wire.
async fn pump_outbound<I>(
    endpoint: DatagramEndpoint,
    mut local_in: I,
    peer: SocketAddr,
    reports: mpsc::Sender<SessionEvent>,
) where
    I: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; UNIT_LIMIT];
    let mut bytes = 0u64;

    loop {
        let n = match local_in.read(&mut buf).await {
            // End-of-input, expected.
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                error!("[{}] outbound read error: {}", peer, e);
                break;
            }
        };

        if is_disconnect_unit(&buf[..n]) {
            break;
        }

        match endpoint.send_unit(&buf[..n], peer).await {
            Ok(sent) => bytes += sent as u64,
            Err(e) => {
                error!("[{}] outbound send error: {}", peer, e);
                break;
            }
        }
    }

    let _ = reports
        .send(SessionEvent::DirectionDone {
            direction: Direction::Outbound,
            bytes,
        })
        .await;
}
