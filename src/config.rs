//! Command-line configuration for the standalone collector binary.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::collector_error::CollectorError;

/// NetFlow v1/v5/v9/IPFIX collector: listens on a UDP socket, reconciles
/// out-of-order templates and data, and appends decoded flow records to a
/// gzip-compressed NDJSON file.
#[derive(Debug, Parser)]
#[command(name = "netflow-collector", version, about)]
pub struct Config {
    /// Address to bind the UDP listener to.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the UDP listener to.
    #[arg(long, default_value_t = 2055)]
    pub port: u16,

    /// Output file for decoded flow records. Defaults to `<unix_ts>.gz` in
    /// the current directory, named at process start.
    #[arg(long)]
    pub output_file: Option<String>,

    /// How long a decoded packet may wait for a missing template before
    /// it's dropped.
    #[arg(long, default_value_t = 3600)]
    pub packet_timeout_secs: u64,

    /// Soft cap on the number of packets held in the pending-template
    /// buffer at once, independent of age. Not part of the wire protocol;
    /// bounds memory for an exporter that never sends its templates.
    #[arg(long, default_value_t = 100_000)]
    pub max_pending_packets: usize,

    /// Raise the log filter from `info` to `debug`.
    #[arg(long)]
    pub debug: bool,
}

impl Config {
    /// Parses the bind address, handling both IPv4 and bracketed/bare IPv6
    /// literals.
    pub fn bind_addr(&self) -> Result<SocketAddr, CollectorError> {
        let ip: IpAddr =
            self.host
                .parse()
                .map_err(|source| CollectorError::InvalidBindAddress {
                    host: self.host.clone(),
                    port: self.port,
                    source,
                })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// The output file path, falling back to `<unix_ts>.gz` computed once
    /// at process start if the user didn't supply one.
    pub fn resolved_output_file(&self) -> String {
        self.output_file.clone().unwrap_or_else(|| {
            let unix_ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            format!("{unix_ts}.gz")
        })
    }

    pub fn packet_timeout(&self) -> Duration {
        Duration::from_secs(self.packet_timeout_secs)
    }
}
