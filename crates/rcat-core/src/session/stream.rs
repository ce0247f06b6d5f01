//! Stream transfer engine
//!
//! Full-duplex copy between a connected TCP stream and the local standard
//! streams. Each direction terminates independently on end-of-stream or
//! error; the session returns once both have reported.

use std::net::SocketAddr;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::error;

use super::{Direction, SessionEvent, SessionSummary, UNIT_LIMIT, log_direction_done, peer_label};

/// Relays bytes between `stream` and the local standard streams until both
/// directions have finished, then returns the byte totals.
///
/// Direction-level failures are logged, never returned: a transport error
/// on one direction leaves the other running until it independently
/// completes.
pub async fn run_stream_session<I, O>(stream: TcpStream, local_in: I, local_out: O) -> SessionSummary
where
    I: AsyncRead + Unpin + Send + 'static,
    O: AsyncWrite + Unpin + Send + 'static,
{
    let peer = stream.peer_addr().ok();
    let (remote_in, remote_out) = stream.into_split();

    let (report_tx, mut report_rx) = mpsc::channel(2);

    tokio::spawn(pump(
        Direction::Inbound,
        remote_in,
        local_out,
        peer,
        report_tx.clone(),
    ));
    tokio::spawn(pump(
        Direction::Outbound,
        local_in,
        remote_out,
        peer,
        report_tx,
    ));

    let mut summary = SessionSummary {
        peer,
        ..Default::default()
    };

    let mut remaining = 2;
    while remaining > 0 {
        match report_rx.recv().await {
            Some(SessionEvent::DirectionDone { direction, bytes }) => {
                log_direction_done(peer, direction, bytes);
                summary.record(direction, bytes);
                remaining -= 1;
            }
            Some(SessionEvent::PeerLearned(_)) => {}
            None => break,
        }
    }

    summary
}

/// One copy loop: read a chunk, write it verbatim, until end-of-stream or
/// error. Closes the write side on exit so the far end of that resource
/// observes end-of-data, then reports the bytes forwarded.
async fn pump<R, W>(
    direction: Direction,
    mut reader: R,
    mut writer: W,
    peer: Option<SocketAddr>,
    reports: mpsc::Sender<SessionEvent>,
) where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; UNIT_LIMIT];
    let mut bytes = 0u64;

    loop {
        let n = match reader.read(&mut buf).await {
            // End-of-stream is the expected way out, not an error.
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                error!("[{}] {} read error: {}", peer_label(peer), direction, e);
                break;
            }
        };

        if let Err(e) = writer.write_all(&buf[..n]).await {
            error!("[{}] {} write error: {}", peer_label(peer), direction, e);
            break;
        }
        bytes += n as u64;
    }

    // Shutting down the writer is what unblocks whoever is reading the far
    // side of this resource; the reader closes when it is dropped.
    let _ = writer.shutdown().await;
    let _ = reports
        .send(SessionEvent::DirectionDone { direction, bytes })
        .await;
}
