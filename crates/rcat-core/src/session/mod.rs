//! Transfer sessions
//!
//! A session relays data between a network endpoint and the local standard
//! streams until both directions have finished. Each session spawns one
//! task per direction; the tasks report back over an mpsc channel and the
//! orchestrator returns once it has seen both final reports.

mod datagram;
mod stream;

pub use datagram::run_datagram_session;
pub use stream::run_stream_session;

use std::fmt;
use std::net::SocketAddr;

use tracing::info;

/// Maximum size of one network unit (a full UDP datagram or TCP segment);
/// also the size of the reusable chunk buffer in every copy loop.
pub const UNIT_LIMIT: usize = 65535;

/// Reserved payload that ends a datagram session from the sending side.
pub const DISCONNECT_SEQUENCE: &[u8] = b"~.";

/// One of the two data-movement tasks comprising a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Peer to local output
    Inbound,
    /// Local input to peer
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => write!(f, "inbound"),
            Direction::Outbound => write!(f, "outbound"),
        }
    }
}

/// Progress report sent from a direction task to the orchestrator.
#[derive(Debug)]
pub(crate) enum SessionEvent {
    /// Listen-mode datagram session learned the remote address from the
    /// first datagram received. Sent at most once, before any byte totals.
    PeerLearned(SocketAddr),
    /// A direction terminated, carrying the bytes it actually forwarded.
    DirectionDone { direction: Direction, bytes: u64 },
}

/// Final outcome of a session: the remote peer (learned or known up front)
/// and how many bytes each direction forwarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSummary {
    pub peer: Option<SocketAddr>,
    pub bytes_received: u64,
    pub bytes_sent: u64,
}

impl SessionSummary {
    pub(crate) fn record(&mut self, direction: Direction, bytes: u64) {
        match direction {
            Direction::Inbound => self.bytes_received = bytes,
            Direction::Outbound => self.bytes_sent = bytes,
        }
    }
}

/// Whether a just-read unit is the disconnect sequence.
///
/// Matches the two-byte sequence either bare or followed by exactly one
/// trailing byte (interactive input arrives as `~.` plus a line ending).
/// Anything shorter than the sequence never matches, so empty and one-byte
/// reads are safe no-ops.
pub(crate) fn is_disconnect_unit(payload: &[u8]) -> bool {
    match payload.len() {
        2 => payload == DISCONNECT_SEQUENCE,
        3 => &payload[..2] == DISCONNECT_SEQUENCE,
        _ => false,
    }
}

/// Peer-address label used in every log line.
pub(crate) fn peer_label(peer: Option<SocketAddr>) -> String {
    match peer {
        Some(addr) => addr.to_string(),
        None => "unknown".to_string(),
    }
}

/// Logs a direction's final report. Completion order drives log order; the
/// label depends on which direction finished.
pub(crate) fn log_direction_done(peer: Option<SocketAddr>, direction: Direction, bytes: u64) {
    match direction {
        Direction::Inbound => info!(
            "[{}] connection closed by remote peer, {} bytes received",
            peer_label(peer),
            bytes
        ),
        Direction::Outbound => info!(
            "[{}] local peer stopped, {} bytes sent",
            peer_label(peer),
            bytes
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnect_bare_sequence() {
        assert!(is_disconnect_unit(b"~."));
    }

    #[test]
    fn test_disconnect_with_trailing_byte() {
        assert!(is_disconnect_unit(b"~.\n"));
        assert!(is_disconnect_unit(b"~.x"));
    }

    #[test]
    fn test_short_payloads_never_match() {
        assert!(!is_disconnect_unit(b""));
        assert!(!is_disconnect_unit(b"~"));
    }

    #[test]
    fn test_longer_payloads_never_match() {
        assert!(!is_disconnect_unit(b"~.ab"));
        assert!(!is_disconnect_unit(b"data ~.\n"));
    }

    #[test]
    fn test_near_miss_payloads() {
        assert!(!is_disconnect_unit(b".~"));
        assert!(!is_disconnect_unit(b"a.\n"));
    }
}
