//! Datagram endpoint abstraction
//!
//! Wraps a UDP socket together with what is known about its remote peer.
//! In dial mode the socket is connected and the peer address is fixed at
//! creation; in listen mode the socket is unconnected and the peer is
//! unknown until the session learns it from the first datagram received.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;

/// A UDP socket plus its (possibly unknown) fixed remote peer.
///
/// Cloneable so that each direction of a session can hold its own handle;
/// the socket closes when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct DatagramEndpoint {
    socket: Arc<UdpSocket>,
    peer: Option<SocketAddr>,
}

impl DatagramEndpoint {
    /// Wraps a connected socket whose remote peer is fixed (dial mode).
    pub fn connected(socket: UdpSocket, peer: SocketAddr) -> Self {
        Self {
            socket: Arc::new(socket),
            peer: Some(peer),
        }
    }

    /// Wraps an unconnected socket with no remote peer yet (listen mode).
    pub fn unbound(socket: UdpSocket) -> Self {
        Self {
            socket: Arc::new(socket),
            peer: None,
        }
    }

    /// The remote peer fixed at creation, `None` in listen mode.
    ///
    /// Immutable for the lifetime of the endpoint: an address learned
    /// mid-session belongs to the session, not the socket.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// The local address the socket is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receives one datagram, reporting the sender's address.
    pub async fn recv_unit(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.socket.recv_from(buf).await
    }

    /// Sends one datagram.
    ///
    /// A connected endpoint must use its pre-bound addressing (sending to
    /// an explicit address on a connected socket is an error); an unbound
    /// endpoint sends explicitly to `peer`.
    pub async fn send_unit(&self, buf: &[u8], peer: SocketAddr) -> io::Result<usize> {
        match self.peer {
            Some(_) => self.socket.send(buf).await,
            None => self.socket.send_to(buf, peer).await,
        }
    }
}
