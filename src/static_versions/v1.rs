//! # Netflow V1
//!
//! The original NetFlow export format. No templates, no autonomous system or
//! mask fields - just a fixed 48-byte flow record following a 16-byte header.
//!
//! Reference: <https://www.cisco.com/c/en/us/td/docs/net_mgmt/netflow_collection_engine/3-6/user/guide/format.html>

use crate::protocol::ProtocolTypes;
use crate::{NetflowError, NetflowPacket, ParsedNetflow};

use nom::number::complete::be_u32;
use nom_derive::*;
use serde::Serialize;

use std::net::Ipv4Addr;
use std::time::Duration;

#[derive(Nom, Debug, Clone, Serialize)]
pub struct V1 {
    /// V1 Header
    pub header: Header,
    /// V1 flow records
    #[nom(Count = "header.count")]
    pub sets: Vec<FlowSet>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Nom)]
pub struct Header {
    /// NetFlow export format version number
    #[nom(Value = "1")]
    pub version: u16,
    /// Number of flows exported in this packet
    pub count: u16,
    /// Current time in milliseconds since the export device booted
    #[nom(Map = "|i| Duration::from_millis(i.into())", Parse = "be_u32")]
    pub sys_up_time: Duration,
    /// Current count of seconds since 0000 UTC 1970
    pub unix_secs: u32,
    /// Residual nanoseconds since 0000 UTC 1970
    pub unix_nsecs: u32,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Nom)]
pub struct FlowSet {
    /// Source IP address
    #[nom(Map = "Ipv4Addr::from", Parse = "be_u32")]
    #[serde(rename = "IPV4_SRC_ADDR")]
    pub src_addr: Ipv4Addr,
    /// Destination IP address
    #[nom(Map = "Ipv4Addr::from", Parse = "be_u32")]
    #[serde(rename = "IPV4_DST_ADDR")]
    pub dst_addr: Ipv4Addr,
    /// IP address of next hop router
    #[nom(Map = "Ipv4Addr::from", Parse = "be_u32")]
    #[serde(rename = "NEXT_HOP")]
    pub next_hop: Ipv4Addr,
    /// SNMP index of input interface
    #[serde(rename = "INPUT")]
    pub input: u16,
    /// SNMP index of output interface
    #[serde(rename = "OUTPUT")]
    pub output: u16,
    /// Packets in the flow
    #[serde(rename = "IN_PACKETS")]
    pub d_pkts: u32,
    /// Total number of Layer 3 bytes in the packets of the flow
    #[serde(rename = "IN_OCTETS")]
    pub d_octets: u32,
    /// SysUptime at start of flow
    #[nom(Map = "|i| Duration::from_millis(i.into())", Parse = "be_u32")]
    #[serde(rename = "FIRST_SWITCHED")]
    pub first: Duration,
    /// SysUptime at the time the last packet of the flow was received
    #[nom(Map = "|i| Duration::from_millis(i.into())", Parse = "be_u32")]
    #[serde(rename = "LAST_SWITCHED")]
    pub last: Duration,
    /// TCP/UDP source port number or equivalent
    #[serde(rename = "SRC_PORT")]
    pub src_port: u16,
    /// TCP/UDP destination port number or equivalent
    #[serde(rename = "DST_PORT")]
    pub dst_port: u16,
    /// Unused (zero) bytes
    #[serde(skip_serializing)]
    pub pad1: u16,
    /// IP protocol type (for example, TCP = 6; UDP = 17)
    #[serde(rename = "PROTO")]
    pub protocol_number: u8,
    #[nom(Value(ProtocolTypes::from(protocol_number)))]
    pub protocol_type: ProtocolTypes,
    /// IP type of service (ToS)
    #[serde(rename = "TOS")]
    pub tos: u8,
    /// Cumulative OR of TCP flags
    #[serde(rename = "TCP_FLAGS")]
    pub tcp_flags: u8,
    /// Unused (zero) bytes
    #[nom(Map = "|i: &[u8]| i.to_vec()", Take = "7usize")]
    #[serde(skip_serializing)]
    pub pad2: Vec<u8>,
}

impl V1 {
    /// Convert the V1 struct to a Vec<u8> of bytes in big-endian order for exporting
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut result = vec![];
        result.extend_from_slice(&self.header.version.to_be_bytes());
        result.extend_from_slice(&self.header.count.to_be_bytes());
        result.extend_from_slice(&(self.header.sys_up_time.as_millis() as u32).to_be_bytes());
        result.extend_from_slice(&self.header.unix_secs.to_be_bytes());
        result.extend_from_slice(&self.header.unix_nsecs.to_be_bytes());

        for set in &self.sets {
            result.extend_from_slice(&set.src_addr.octets());
            result.extend_from_slice(&set.dst_addr.octets());
            result.extend_from_slice(&set.next_hop.octets());
            result.extend_from_slice(&set.input.to_be_bytes());
            result.extend_from_slice(&set.output.to_be_bytes());
            result.extend_from_slice(&set.d_pkts.to_be_bytes());
            result.extend_from_slice(&set.d_octets.to_be_bytes());
            result.extend_from_slice(&(set.first.as_millis() as u32).to_be_bytes());
            result.extend_from_slice(&(set.last.as_millis() as u32).to_be_bytes());
            result.extend_from_slice(&set.src_port.to_be_bytes());
            result.extend_from_slice(&set.dst_port.to_be_bytes());
            result.extend_from_slice(&set.pad1.to_be_bytes());
            result.extend_from_slice(&set.protocol_number.to_be_bytes());
            result.extend_from_slice(&set.tos.to_be_bytes());
            result.extend_from_slice(&set.tcp_flags.to_be_bytes());
            result.extend_from_slice(&set.pad2);
        }

        result
    }
}

/// Stateless entry point for V1, which carries no templates.
pub struct V1Parser;

impl V1Parser {
    pub fn parse(packet: &[u8]) -> ParsedNetflow<'_> {
        match V1::parse(packet) {
            Ok((remaining, v1)) => ParsedNetflow::Success {
                packet: NetflowPacket::V1(v1),
                remaining,
            },
            Err(e) => ParsedNetflow::Error {
                error: NetflowError::Incomplete {
                    available: packet.len(),
                    context: format!("V1 packet: {}", e),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_packet() -> Vec<u8> {
        let mut data = vec![];
        data.extend_from_slice(&1u16.to_be_bytes()); // version
        data.extend_from_slice(&1u16.to_be_bytes()); // count
        data.extend_from_slice(&1000u32.to_be_bytes()); // sys_up_time
        data.extend_from_slice(&1_700_000_000u32.to_be_bytes()); // unix_secs
        data.extend_from_slice(&0u32.to_be_bytes()); // unix_nsecs

        data.extend_from_slice(&Ipv4Addr::new(10, 0, 0, 1).octets());
        data.extend_from_slice(&Ipv4Addr::new(10, 0, 0, 2).octets());
        data.extend_from_slice(&Ipv4Addr::new(10, 0, 0, 254).octets());
        data.extend_from_slice(&1u16.to_be_bytes()); // input
        data.extend_from_slice(&2u16.to_be_bytes()); // output
        data.extend_from_slice(&10u32.to_be_bytes()); // d_pkts
        data.extend_from_slice(&1500u32.to_be_bytes()); // d_octets
        data.extend_from_slice(&100u32.to_be_bytes()); // first
        data.extend_from_slice(&900u32.to_be_bytes()); // last
        data.extend_from_slice(&443u16.to_be_bytes()); // src_port
        data.extend_from_slice(&51234u16.to_be_bytes()); // dst_port
        data.extend_from_slice(&0u16.to_be_bytes()); // pad1
        data.push(6); // protocol_number (TCP)
        data.push(0); // tos
        data.push(0x18); // tcp_flags
        data.extend_from_slice(&[0u8; 7]); // pad2

        data
    }

    #[test]
    fn it_parses_a_v1_packet() {
        let data = sample_packet();
        match V1Parser::parse(&data) {
            ParsedNetflow::Success { packet, remaining } => {
                assert!(remaining.is_empty());
                match packet {
                    NetflowPacket::V1(v1) => {
                        assert_eq!(v1.header.count, 1);
                        assert_eq!(v1.sets.len(), 1);
                        assert_eq!(v1.sets[0].protocol_type, ProtocolTypes::TCP);
                        assert_eq!(v1.sets[0].src_port, 443);
                    }
                    _ => panic!("expected V1 packet"),
                }
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn it_round_trips_to_be_bytes() {
        let data = sample_packet();
        if let ParsedNetflow::Success {
            packet: NetflowPacket::V1(v1),
            ..
        } = V1Parser::parse(&data)
        {
            assert_eq!(v1.to_be_bytes(), data);
        } else {
            panic!("expected parse success");
        }
    }
}
