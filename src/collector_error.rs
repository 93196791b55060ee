//! Operational errors for the standalone collector binary.
//!
//! [`crate::NetflowError`] covers wire-format problems in a single packet;
//! this type covers the collector process failing to do its job at all --
//! it can't bind its socket, or it can't write what it already decoded.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Errors raised by the collector's receive/sink loop, as opposed to the
/// packet decoder itself.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// The UDP socket could not be bound to the configured address.
    #[error("failed to bind UDP socket on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The output sink file could not be opened for appending.
    #[error("failed to open output file {path}: {source}")]
    SinkOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A write to the output sink failed after the socket was already
    /// receiving traffic. Per-line writes are not retried; the line is lost.
    #[error("failed to write to output file {path}: {source}")]
    SinkWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured host/port could not be parsed into a bindable address.
    #[error("invalid bind address {host}:{port}: {source}")]
    InvalidBindAddress {
        host: String,
        port: u16,
        #[source]
        source: std::net::AddrParseError,
    },
}
