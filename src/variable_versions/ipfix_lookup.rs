//! IPFIX Information Element identifiers (IANA registry, abridged).
//!
//! Only the elements actually useful for flow accounting are enumerated.
//! Anything else decodes to `IPFixField::Unknown(id)` and is still emitted
//! (as raw bytes or a best-guess number) rather than dropped.
//!
//! Reference: <https://www.iana.org/assignments/ipfix/ipfix.xhtml>

use crate::variable_versions::data_number::FieldDataType;
use serde::Serialize;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize)]
pub enum IPFixField {
    OctetDeltaCount,
    PacketDeltaCount,
    ProtocolIdentifier,
    IpClassOfService,
    TcpControlBits,
    SourceTransportPort,
    SourceIPv4Address,
    SourceIPv4PrefixLength,
    IngressInterface,
    DestinationTransportPort,
    DestinationIPv4Address,
    DestinationIPv4PrefixLength,
    EgressInterface,
    IpNextHopIPv4Address,
    BgpSourceAsNumber,
    BgpDestinationAsNumber,
    FlowEndSysUpTime,
    FlowStartSysUpTime,
    SourceIPv6Address,
    DestinationIPv6Address,
    SourceIPv6PrefixLength,
    DestinationIPv6PrefixLength,
    IcmpTypeCodeIPv4,
    ExportedOctetTotalCount,
    ExportedMessageTotalCount,
    ExportedFlowRecordTotalCount,
    MinimumTTL,
    MaximumTTL,
    SourceMacAddress,
    PostDestinationMacAddress,
    IpVersion,
    FlowDirection,
    IpNextHopIPv6Address,
    DestinationMacAddress,
    PostSourceMacAddress,
    InterfaceName,
    InterfaceDescription,
    FragmentOffset,
    FlowEndReason,
    FlowStartSeconds,
    FlowEndSeconds,
    FlowStartMilliseconds,
    FlowEndMilliseconds,
    FlowStartMicroseconds,
    FlowEndMicroseconds,
    FlowStartNanoseconds,
    FlowEndNanoseconds,
    IcmpTypeIPv4,
    IcmpCodeIPv4,
    IcmpTypeIPv6,
    IcmpCodeIPv6,
    PostNATSourceIPv4Address,
    PostNATDestinationIPv4Address,
    PostNAPTSourceTransportPort,
    PostNAPTDestinationTransportPort,
    ApplicationId,
    /// A vendor-scoped field (high bit of the field id set). The numeric id
    /// has had the enterprise marker bit cleared; the enterprise number
    /// itself is carried alongside, on `TemplateField`/`OptionsTemplateField`.
    Enterprise,
    Unknown(u16),
}

impl From<u16> for IPFixField {
    fn from(item: u16) -> Self {
        match item {
            1 => IPFixField::OctetDeltaCount,
            2 => IPFixField::PacketDeltaCount,
            4 => IPFixField::ProtocolIdentifier,
            5 => IPFixField::IpClassOfService,
            6 => IPFixField::TcpControlBits,
            7 => IPFixField::SourceTransportPort,
            8 => IPFixField::SourceIPv4Address,
            9 => IPFixField::SourceIPv4PrefixLength,
            10 => IPFixField::IngressInterface,
            11 => IPFixField::DestinationTransportPort,
            12 => IPFixField::DestinationIPv4Address,
            13 => IPFixField::DestinationIPv4PrefixLength,
            14 => IPFixField::EgressInterface,
            15 => IPFixField::IpNextHopIPv4Address,
            16 => IPFixField::BgpSourceAsNumber,
            17 => IPFixField::BgpDestinationAsNumber,
            21 => IPFixField::FlowEndSysUpTime,
            22 => IPFixField::FlowStartSysUpTime,
            27 => IPFixField::SourceIPv6Address,
            28 => IPFixField::DestinationIPv6Address,
            29 => IPFixField::SourceIPv6PrefixLength,
            30 => IPFixField::DestinationIPv6PrefixLength,
            32 => IPFixField::IcmpTypeCodeIPv4,
            40 => IPFixField::ExportedOctetTotalCount,
            41 => IPFixField::ExportedMessageTotalCount,
            42 => IPFixField::ExportedFlowRecordTotalCount,
            52 => IPFixField::MinimumTTL,
            53 => IPFixField::MaximumTTL,
            56 => IPFixField::SourceMacAddress,
            57 => IPFixField::PostDestinationMacAddress,
            60 => IPFixField::IpVersion,
            61 => IPFixField::FlowDirection,
            62 => IPFixField::IpNextHopIPv6Address,
            80 => IPFixField::DestinationMacAddress,
            81 => IPFixField::PostSourceMacAddress,
            82 => IPFixField::InterfaceName,
            83 => IPFixField::InterfaceDescription,
            88 => IPFixField::FragmentOffset,
            95 => IPFixField::ApplicationId,
            136 => IPFixField::FlowEndReason,
            150 => IPFixField::FlowStartSeconds,
            151 => IPFixField::FlowEndSeconds,
            152 => IPFixField::FlowStartMilliseconds,
            153 => IPFixField::FlowEndMilliseconds,
            154 => IPFixField::FlowStartMicroseconds,
            155 => IPFixField::FlowEndMicroseconds,
            156 => IPFixField::FlowStartNanoseconds,
            157 => IPFixField::FlowEndNanoseconds,
            176 => IPFixField::IcmpTypeIPv4,
            177 => IPFixField::IcmpCodeIPv4,
            178 => IPFixField::IcmpTypeIPv6,
            179 => IPFixField::IcmpCodeIPv6,
            225 => IPFixField::PostNATSourceIPv4Address,
            226 => IPFixField::PostNATDestinationIPv4Address,
            227 => IPFixField::PostNAPTSourceTransportPort,
            228 => IPFixField::PostNAPTDestinationTransportPort,
            other => IPFixField::Unknown(other),
        }
    }
}

impl From<IPFixField> for FieldDataType {
    fn from(item: IPFixField) -> Self {
        use IPFixField::*;
        match item {
            ProtocolIdentifier => FieldDataType::ProtocolType,
            SourceIPv4Address | DestinationIPv4Address | IpNextHopIPv4Address
            | PostNATSourceIPv4Address | PostNATDestinationIPv4Address => FieldDataType::Ip4Addr,
            SourceIPv6Address | DestinationIPv6Address | IpNextHopIPv6Address => {
                FieldDataType::Ip6Addr
            }
            SourceMacAddress | DestinationMacAddress | PostSourceMacAddress
            | PostDestinationMacAddress => FieldDataType::MacAddr,
            InterfaceName | InterfaceDescription => FieldDataType::String,
            FlowStartSeconds | FlowEndSeconds => FieldDataType::DurationSeconds,
            FlowStartMilliseconds | FlowEndMilliseconds | FlowStartSysUpTime
            | FlowEndSysUpTime => FieldDataType::DurationMillis,
            FlowStartMicroseconds | FlowEndMicroseconds => FieldDataType::DurationMicros,
            FlowStartNanoseconds | FlowEndNanoseconds => FieldDataType::DurationNanos,
            ApplicationId => FieldDataType::ApplicationId,
            Enterprise => FieldDataType::Unknown,
            Unknown(_) => FieldDataType::Unknown,
            _ => FieldDataType::UnsignedDataNumber,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_known_ids() {
        assert_eq!(IPFixField::from(8), IPFixField::SourceIPv4Address);
        assert_eq!(IPFixField::from(27), IPFixField::SourceIPv6Address);
        assert_eq!(IPFixField::from(4), IPFixField::ProtocolIdentifier);
    }

    #[test]
    fn it_falls_back_to_unknown() {
        assert_eq!(IPFixField::from(65000), IPFixField::Unknown(65000));
    }

    #[test]
    fn it_categorizes_field_data_types() {
        assert_eq!(
            FieldDataType::from(IPFixField::SourceIPv4Address),
            FieldDataType::Ip4Addr
        );
        assert_eq!(
            FieldDataType::from(IPFixField::ProtocolIdentifier),
            FieldDataType::ProtocolType
        );
    }
}
