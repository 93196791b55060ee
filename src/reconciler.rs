//! Reconciliation engine: per-exporter template state plus a pending buffer
//! for data records that outran their template.
//!
//! NetFlow v9 and IPFIX exporters are free to send a Data Set before the
//! Template Set that describes it, sometimes in the same packet, sometimes
//! a packet later. The decoder reports that case as
//! [`NetflowError::MissingTemplate`]; reconciling it against everything
//! already buffered, and deciding when to give up, is this module's job.
//!
//! A [`Reconciler`] owns one [`NetflowParser`] and is meant to be driven by
//! a single task -- there's no internal locking. Callers that need to
//! isolate templates per exporter should keep one `Reconciler` per
//! exporter key (see [`crate::scoped_parser::extract_scoping_info`]).

use std::collections::{BTreeMap, VecDeque};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::variable_versions::{ipfix, v9};
use crate::{NetflowError, NetflowPacket, NetflowParser};

/// Default time a packet may sit in the pending buffer waiting for its
/// template before it's dropped.
pub const PACKET_TIMEOUT: Duration = Duration::from_secs(3600);

/// Default cap on the number of pending packets held at once, independent
/// of age. Not part of the wire protocol; a defensive bound so an exporter
/// that never sends its templates can't grow the buffer without limit.
pub const DEFAULT_MAX_PENDING_PACKETS: usize = 100_000;

/// The post-packet state of an exporter's template store: every template and
/// options template currently cached for it, across both protocol families.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateSnapshot {
    pub v9_templates: BTreeMap<u16, v9::Template>,
    pub v9_options_templates: BTreeMap<u16, v9::OptionsTemplate>,
    pub ipfix_templates: BTreeMap<u16, ipfix::Template>,
    pub ipfix_options_templates: BTreeMap<u16, ipfix::OptionsTemplate>,
}

impl TemplateSnapshot {
    fn capture(parser: &NetflowParser) -> Self {
        Self {
            v9_templates: parser
                .v9_parser
                .templates
                .iter()
                .map(|(id, cached)| (*id, cached.template.clone()))
                .collect(),
            v9_options_templates: parser
                .v9_parser
                .options_templates
                .iter()
                .map(|(id, cached)| (*id, cached.template.clone()))
                .collect(),
            ipfix_templates: parser
                .ipfix_parser
                .templates
                .iter()
                .map(|(id, cached)| (*id, cached.template.clone()))
                .collect(),
            ipfix_options_templates: parser
                .ipfix_parser
                .ipfix_options_templates
                .iter()
                .map(|(id, cached)| (*id, cached.template.clone()))
                .collect(),
        }
    }
}

/// A decoded packet tagged with when it actually arrived, for the sink and
/// for downstream ordering.
#[derive(Debug, Clone)]
pub struct ParsedPacket {
    /// Seconds since the Unix epoch when the raw datagram was received.
    /// Preserved even for packets that were deferred and replayed later,
    /// so the sink's timestamp reflects true arrival order, not decode
    /// order.
    pub receive_ts: f64,
    pub client: SocketAddr,
    pub packet: NetflowPacket,
    /// This exporter's template store immediately after the packet that
    /// produced `packet` was decoded.
    pub templates: TemplateSnapshot,
    /// Whether decoding this packet registered a template that was either
    /// new or whose field layout changed from what was previously cached.
    pub contains_new_templates: bool,
}

struct Pending {
    queued_at: Instant,
    receive_ts: f64,
    client: SocketAddr,
    data: Vec<u8>,
}

/// What happened to one pending packet during a retry pass.
enum RetryOutcome {
    StillMissing(Pending),
    Dropped,
}

/// Result of a single [`Reconciler::ingest`] call, including anything
/// replayed out of the pending buffer as a side effect.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    /// Packets ready to forward downstream, in the order they were
    /// resolved (newly-decoded packets first, then any replays).
    pub forwarded: Vec<ParsedPacket>,
    /// Packets dropped this call, with the reason.
    pub dropped: Vec<(SocketAddr, NetflowError)>,
}

impl IngestOutcome {
    fn drop(&mut self, client: SocketAddr, error: NetflowError) {
        log::warn!("dropping packet from {client}: {error}");
        self.dropped.push((client, error));
    }
}

/// Owns one exporter's (or one shard's) template cache and pending buffer.
pub struct Reconciler {
    parser: NetflowParser,
    pending: VecDeque<Pending>,
    packet_timeout: Duration,
    max_pending_packets: usize,
}

impl Reconciler {
    pub fn new(parser: NetflowParser) -> Self {
        Self {
            parser,
            pending: VecDeque::new(),
            packet_timeout: PACKET_TIMEOUT,
            max_pending_packets: DEFAULT_MAX_PENDING_PACKETS,
        }
    }

    pub fn with_packet_timeout(mut self, timeout: Duration) -> Self {
        self.packet_timeout = timeout;
        self
    }

    pub fn with_max_pending_packets(mut self, max: usize) -> Self {
        self.max_pending_packets = max;
        self
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Feeds one freshly-received datagram through the engine: decodes it,
    /// buffers it if it's waiting on a template, and replays anything
    /// already buffered if this call taught the parser something new.
    pub fn ingest(&mut self, client: SocketAddr, receive_ts: f64, data: &[u8]) -> IngestOutcome {
        let mut outcome = IngestOutcome::default();

        if self.decode(client, receive_ts, data, &mut outcome) {
            self.retry_pending(&mut outcome);
        }

        outcome
    }

    /// Drops every packet still waiting past `packet_timeout`, without
    /// requiring new traffic to trigger the check. Intended to be called
    /// periodically (e.g. on a timer) so a quiet exporter's stale buffer
    /// still gets reclaimed.
    pub fn sweep_expired(&mut self) -> Vec<(SocketAddr, Duration)> {
        let now = Instant::now();
        let mut expired = Vec::new();
        self.pending.retain(|pending| {
            let age = now.duration_since(pending.queued_at);
            if age > self.packet_timeout {
                expired.push((pending.client, age));
                false
            } else {
                true
            }
        });
        for (client, age) in &expired {
            log::warn!("dropping pending packet from {client} after {age:?} waiting for template");
        }
        expired
    }

    /// Decodes one datagram, pushing any resulting packets onto `outcome`.
    /// Returns whether this decode taught the parser a template that was
    /// either new or changed, which is both this packet's
    /// `contains_new_templates` value and the signal the caller uses to
    /// decide whether the pending buffer is worth replaying.
    fn decode(
        &mut self,
        client: SocketAddr,
        receive_ts: f64,
        data: &[u8],
        outcome: &mut IngestOutcome,
    ) -> bool {
        let before = TemplateSnapshot::capture(&self.parser);
        let result = self.parser.parse_bytes(data);
        let after = TemplateSnapshot::capture(&self.parser);
        let contains_new_templates = after != before;

        for packet in result.packets {
            outcome.forwarded.push(ParsedPacket {
                receive_ts,
                client,
                packet,
                templates: after.clone(),
                contains_new_templates,
            });
        }
        match result.error {
            None => {}
            Some(NetflowError::MissingTemplate {
                template_id,
                protocol,
                ..
            }) => {
                log::debug!(
                    "deferring packet from {client} waiting on {protocol:?} template {template_id}"
                );
                self.buffer(client, receive_ts, data);
            }
            Some(other) => outcome.drop(client, other),
        }
        contains_new_templates
    }

    fn buffer(&mut self, client: SocketAddr, receive_ts: f64, data: &[u8]) {
        if self.pending.len() >= self.max_pending_packets {
            if let Some(oldest) = self.pending.pop_front() {
                log::warn!(
                    "pending buffer full ({} packets), dropping oldest packet from {}",
                    self.max_pending_packets,
                    oldest.client
                );
            }
        }
        self.pending.push_back(Pending {
            queued_at: Instant::now(),
            receive_ts,
            client,
            data: data.to_vec(),
        });
    }

    /// Replays every currently-buffered packet once, in FIFO order. Packets
    /// still missing their template go back on the queue unless they've
    /// aged out; any other decode failure is dropped rather than requeued.
    fn retry_pending(&mut self, outcome: &mut IngestOutcome) {
        let queued = std::mem::take(&mut self.pending);
        for pending in queued {
            match self.retry_one(pending, outcome) {
                RetryOutcome::StillMissing(pending) => self.pending.push_back(pending),
                RetryOutcome::Dropped => {}
            }
        }
    }

    fn retry_one(&mut self, pending: Pending, outcome: &mut IngestOutcome) -> RetryOutcome {
        if pending.queued_at.elapsed() > self.packet_timeout {
            log::warn!(
                "dropping pending packet from {} after {:?} waiting for template",
                pending.client,
                self.packet_timeout
            );
            return RetryOutcome::Dropped;
        }

        let before = TemplateSnapshot::capture(&self.parser);
        let result = self.parser.parse_bytes(&pending.data);
        let after = TemplateSnapshot::capture(&self.parser);
        let contains_new_templates = after != before;

        for packet in result.packets {
            outcome.forwarded.push(ParsedPacket {
                receive_ts: pending.receive_ts,
                client: pending.client,
                packet,
                templates: after.clone(),
                contains_new_templates,
            });
        }
        match result.error {
            None => RetryOutcome::Dropped,
            Some(NetflowError::MissingTemplate { .. }) => RetryOutcome::StillMissing(pending),
            Some(other) => {
                outcome.drop(pending.client, other);
                RetryOutcome::Dropped
            }
        }
    }
}
