//! Persists decoded flow records as gzip-compressed, newline-delimited JSON.
//!
//! One JSON object per received packet, one line per object, flushed
//! through the gzip stream as soon as it's written. No batching: a crash
//! should lose at most the write that was in flight, not a buffer's worth
//! of already-decoded packets.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::{Value, json};

use crate::collector_error::CollectorError;
use crate::reconciler::ParsedPacket;
#[cfg(test)]
use crate::reconciler::TemplateSnapshot;

/// Appends decoded packets to a gzip NDJSON file.
pub struct Sink {
    path: PathBuf,
    encoder: GzEncoder<File>,
}

impl Sink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CollectorError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| CollectorError::SinkOpenFailed {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            encoder: GzEncoder::new(file, Compression::default()),
            path,
        })
    }

    /// Writes one packet and flushes the gzip stream immediately.
    pub fn write_packet(&mut self, packet: &ParsedPacket) -> Result<(), CollectorError> {
        let line = serde_json::to_string(&record(packet)).unwrap_or_else(|_| "{}".to_string());
        self.encoder
            .write_all(line.as_bytes())
            .and_then(|()| self.encoder.write_all(b"\n"))
            .and_then(|()| self.encoder.flush())
            .map_err(|source| CollectorError::SinkWriteFailed {
                path: self.path.clone(),
                source,
            })
    }
}

/// Builds the `{"<receive_ts>": {"client": [...], "header": ..., "flows": [...]}}`
/// record for one packet.
fn record(packet: &ParsedPacket) -> Value {
    let full = serde_json::to_value(&packet.packet).unwrap_or(Value::Null);
    let inner = full
        .as_object()
        .and_then(|tagged| tagged.values().next())
        .cloned()
        .unwrap_or(Value::Null);

    let header = inner.get("header").cloned().unwrap_or(Value::Null);
    let flows = inner
        .get("sets")
        .and_then(Value::as_array)
        .map(|sets| flatten_flows(sets))
        .unwrap_or_default();

    let body = json!({
        "client": [packet.client.ip().to_string(), packet.client.port()],
        "header": header,
        "flows": flows,
    });

    json!({ format!("{:.6}", packet.receive_ts): body })
}

/// Fixed-layout packets (v1/v5) carry flow records directly in `sets`;
/// template-driven packets (v9/IPFIX) carry them nested under each set's
/// `data`. Either way the sink wants one flat array of flow records.
fn flatten_flows(sets: &[Value]) -> Vec<Value> {
    let mut flows = Vec::new();
    for set in sets {
        match set.get("data").and_then(Value::as_array) {
            Some(data) => flows.extend(data.iter().cloned()),
            None => flows.push(set.clone()),
        }
    }
    flows
}
