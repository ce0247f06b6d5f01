//! Rcat Core Library
//!
//! This crate provides the transfer engines and connection plumbing for
//! rcat, a netcat-style relay between the local standard streams and a
//! remote peer. It includes:
//! - Full-duplex stream sessions over TCP
//! - Datagram sessions over UDP with peer-address learning and the `~.`
//!   disconnect sequence
//! - Dial/listen helpers for both transports
//! - TOML configuration

pub mod config;
pub mod endpoint;
pub mod error;
pub mod net;
pub mod session;

pub use config::RcatConfig;
pub use endpoint::DatagramEndpoint;
pub use error::{RcatError, Result};
pub use session::{
    DISCONNECT_SEQUENCE, Direction, SessionSummary, UNIT_LIMIT, run_datagram_session,
    run_stream_session,
};
