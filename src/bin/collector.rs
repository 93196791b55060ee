//! Standalone NetFlow/IPFIX collector: binds a UDP socket, reconciles
//! out-of-order templates and data per exporter, and appends decoded flow
//! records to a gzip NDJSON file.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;

use netflow_collector::NetflowParser;
use netflow_collector::collector_error::CollectorError;
use netflow_collector::config::Config;
use netflow_collector::reconciler::{ParsedPacket, Reconciler};
use netflow_collector::sink::Sink;

/// A raw datagram tagged with when it was actually read off the socket.
struct RawPacket {
    receive_ts: f64,
    data: Vec<u8>,
}

fn now_unix() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// One task per exporter, each owning exactly one `Reconciler`. No locks on
/// the decode path: every exporter's template cache and pending buffer are
/// private to its task, and decoded packets leave via `writer_tx`.
fn spawn_exporter_task(
    client: SocketAddr,
    packet_timeout: std::time::Duration,
    max_pending_packets: usize,
    writer_tx: mpsc::Sender<ParsedPacket>,
) -> mpsc::Sender<RawPacket> {
    let (tx, mut rx) = mpsc::channel::<RawPacket>(1024);

    tokio::spawn(async move {
        let mut reconciler = Reconciler::new(NetflowParser::default())
            .with_packet_timeout(packet_timeout)
            .with_max_pending_packets(max_pending_packets);

        while let Some(raw) = rx.recv().await {
            let outcome = reconciler.ingest(client, raw.receive_ts, &raw.data);
            for packet in outcome.forwarded {
                if writer_tx.send(packet).await.is_err() {
                    log::warn!("sink writer gone, dropping decoded packet from {client}");
                }
            }
        }

        let pending = reconciler.pending_count();
        if pending > 0 {
            log::info!("shutting down exporter task for {client}, dropping {pending} pending packets");
        }
    });

    tx
}

/// Owns the sink and serializes every write to it behind a channel, so
/// exporter tasks never contend on file access.
fn spawn_writer_task(mut sink: Sink) -> (mpsc::Sender<ParsedPacket>, tokio::task::JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<ParsedPacket>(4096);

    let handle = tokio::spawn(async move {
        while let Some(packet) = rx.recv().await {
            if let Err(error) = sink.write_packet(&packet) {
                log::error!("sink write failed: {error}");
            }
        }
    });

    (tx, handle)
}

async fn run(config: Config) -> Result<(), CollectorError> {
    let bind_addr = config.bind_addr()?;
    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|source| CollectorError::BindFailed {
            addr: bind_addr,
            source,
        })?;
    log::info!("listening on {bind_addr}");

    let output_path = config.resolved_output_file();
    let sink = Sink::open(&output_path)?;
    log::info!("writing decoded flows to {output_path}");

    let (writer_tx, writer_handle) = spawn_writer_task(sink);
    let mut exporter_tasks: HashMap<SocketAddr, mpsc::Sender<RawPacket>> = HashMap::new();
    let packet_timeout = config.packet_timeout();
    let max_pending_packets = config.max_pending_packets;

    let mut buf = vec![0u8; 65535];

    loop {
        tokio::select! {
            recv = socket.recv_from(&mut buf) => {
                let (len, client) = match recv {
                    Ok(pair) => pair,
                    Err(error) => {
                        log::warn!("recv_from failed: {error}");
                        continue;
                    }
                };
                let raw = RawPacket {
                    receive_ts: now_unix(),
                    data: buf[..len].to_vec(),
                };

                let sender = exporter_tasks.entry(client).or_insert_with(|| {
                    spawn_exporter_task(client, packet_timeout, max_pending_packets, writer_tx.clone())
                });

                if sender.send(raw).await.is_err() {
                    log::warn!("exporter task for {client} died, respawning");
                    let sender = spawn_exporter_task(client, packet_timeout, max_pending_packets, writer_tx.clone());
                    exporter_tasks.insert(client, sender);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("shutdown signal received, draining {} exporter(s)", exporter_tasks.len());
                break;
            }
        }
    }

    // Dropping every exporter sender closes its channel, so each task drains
    // whatever it already queued and exits on its own.
    drop(exporter_tasks);
    drop(writer_tx);
    let _ = writer_handle.await;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if config.debug {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("fatal: {error}");
            ExitCode::FAILURE
        }
    }
}
