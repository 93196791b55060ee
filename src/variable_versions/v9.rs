//! NetFlow V9 - template-driven flow export (RFC 3954).
//!
//! Unlike V1/V5, the field layout of a data record is not fixed: an
//! exporter first sends a Template FlowSet describing field order and
//! lengths, then Data FlowSets that must be decoded against the matching
//! cached template. Templates are scoped per exporter by the caller
//! (see `scoped_parser`); this type only tracks an LRU cache of whatever
//! templates it has been shown.

use crate::template_events::{TemplateEvent, TemplateHooks, TemplateProtocol};
use crate::variable_versions::data_number::{FieldDataType, FieldValue};
use crate::variable_versions::enterprise_registry::EnterpriseFieldRegistry;
use crate::variable_versions::metrics::CacheMetrics;
use crate::variable_versions::ttl::{TemplateWithTtl, TtlConfig};
use crate::variable_versions::v9_lookup::{DataFieldType, ScopeFieldType};
use crate::variable_versions::{Config, ConfigError, ParserConfig};
use crate::{NetflowError, NetflowPacket, ParsedNetflow};

use lru::LruCache;
use nom::Err as NomErr;
use nom::bytes::complete::take;
use nom::error::Error as NomError;
use nom::number::complete::be_u16;
use nom_derive::*;
use serde::Serialize;

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

const TEMPLATE_ID: u16 = 0;
const OPTIONS_TEMPLATE_ID: u16 = 1;
const SET_MIN_RANGE: u16 = 255;

type TemplateId = u16;

#[derive(Debug, Clone, Serialize)]
pub struct V9 {
    pub header: Header,
    pub flowsets: Vec<FlowSet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Nom)]
pub struct Header {
    #[nom(Value = "9")]
    pub version: u16,
    pub count: u16,
    pub sys_up_time: u32,
    pub unix_secs: u32,
    pub sequence_number: u32,
    pub source_id: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowSet {
    pub flow_set_id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<Template>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options_template: Option<OptionsTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<BTreeMap<String, FieldValue>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub template_id: u16,
    pub field_count: u16,
    pub fields: Vec<TemplateField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateField {
    pub field_type_number: u16,
    pub field_type: DataFieldType,
    pub field_length: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionsTemplate {
    pub template_id: u16,
    pub scope_fields: Vec<OptionsTemplateScopeField>,
    pub option_fields: Vec<TemplateField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionsTemplateScopeField {
    pub field_type_number: u16,
    pub field_type: ScopeFieldType,
    pub field_length: u16,
}

/// A resolved field spec: wire id, decode category and declared length.
struct FieldSpec {
    name: String,
    data_type: FieldDataType,
    field_length: u16,
}

impl Template {
    fn record_length(&self) -> usize {
        self.fields.iter().map(|f| usize::from(f.field_length)).sum()
    }

    fn field_specs(&self) -> Vec<FieldSpec> {
        self.fields
            .iter()
            .map(|f| FieldSpec {
                name: field_name(f.field_type_number, f.field_type),
                data_type: f.field_type.into(),
                field_length: f.field_length,
            })
            .collect()
    }
}

impl OptionsTemplate {
    fn record_length(&self) -> usize {
        let scope: usize = self
            .scope_fields
            .iter()
            .map(|f| usize::from(f.field_length))
            .sum();
        let options: usize = self
            .option_fields
            .iter()
            .map(|f| usize::from(f.field_length))
            .sum();
        scope + options
    }

    fn field_specs(&self) -> Vec<FieldSpec> {
        let mut specs: Vec<FieldSpec> = self
            .scope_fields
            .iter()
            .map(|f| FieldSpec {
                name: format!("SCOPE_{:?}", f.field_type),
                data_type: FieldDataType::UnsignedDataNumber,
                field_length: f.field_length,
            })
            .collect();
        specs.extend(self.option_fields.iter().map(|f| FieldSpec {
            name: field_name(f.field_type_number, f.field_type),
            data_type: f.field_type.into(),
            field_length: f.field_length,
        }));
        specs
    }
}

/// Canonical mnemonic for the fields the v1/v5/v9 data model names
/// explicitly. Every other field type keeps its raw `DataFieldType` debug
/// name -- the spec only mandates a shared vocabulary for the fields v1/v5
/// also produce.
fn canonical_mnemonic(field_type: DataFieldType) -> Option<&'static str> {
    use DataFieldType::*;
    Some(match field_type {
        IPV4SRCADDR => "IPV4_SRC_ADDR",
        IPV4DSTADDR => "IPV4_DST_ADDR",
        IPV4NEXTHOP => "NEXT_HOP",
        INPUTSNMP => "INPUT",
        OUTPUTSNMP => "OUTPUT",
        INPKTS => "IN_PACKETS",
        INBYTES => "IN_OCTETS",
        FIRSTSWITCHED => "FIRST_SWITCHED",
        LASTSWITCHED => "LAST_SWITCHED",
        L4SRCPORT => "SRC_PORT",
        L4DSTPORT => "DST_PORT",
        TCPFLAGS => "TCP_FLAGS",
        PROTOCOL => "PROTO",
        SRCTOS => "TOS",
        SRCAS => "SRC_AS",
        DSTAS => "DST_AS",
        SRCMASK => "SRC_MASK",
        DSTMASK => "DST_MASK",
        _ => return None,
    })
}

fn field_name(field_type_number: u16, field_type: DataFieldType) -> String {
    match field_type {
        DataFieldType::Unknown => format!("UNKNOWN_{}", field_type_number),
        other => canonical_mnemonic(other)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{:?}", other)),
    }
}

type CachedTemplate = TemplateWithTtl<Template>;
type CachedOptionsTemplate = TemplateWithTtl<OptionsTemplate>;

#[derive(Debug)]
pub struct V9Parser {
    pub templates: LruCache<TemplateId, CachedTemplate>,
    pub options_templates: LruCache<TemplateId, CachedOptionsTemplate>,
    pub max_template_cache_size: usize,
    pub max_field_count: usize,
    pub ttl_config: Option<TtlConfig>,
    pub metrics: CacheMetrics,
    #[allow(dead_code)]
    enterprise_registry: EnterpriseFieldRegistry,
    template_hooks: TemplateHooks,
}

impl Default for V9Parser {
    fn default() -> Self {
        Self::try_new(Config::new(1000, None)).expect("default cache size is non-zero")
    }
}

impl V9Parser {
    pub fn try_new(config: Config) -> Result<Self, ConfigError> {
        let size = NonZeroUsize::new(config.max_template_cache_size)
            .ok_or(ConfigError::InvalidCacheSize(config.max_template_cache_size))?;
        Ok(Self {
            templates: LruCache::new(size),
            options_templates: LruCache::new(size),
            max_template_cache_size: config.max_template_cache_size,
            max_field_count: config.max_field_count,
            ttl_config: config.ttl_config,
            metrics: CacheMetrics::new(),
            enterprise_registry: config.enterprise_registry,
            template_hooks: TemplateHooks::new(),
        })
    }

    pub fn set_template_hooks(&mut self, hooks: TemplateHooks) {
        self.template_hooks = hooks;
    }

    fn lookup_template(&mut self, id: TemplateId) -> Option<Template> {
        let ttl_config = self.ttl_config.clone();
        if let Some(entry) = self.templates.get(&id) {
            if let Some(ttl) = &ttl_config {
                if entry.is_expired(ttl) {
                    self.templates.pop(&id);
                    self.metrics.record_expiration();
                    self.template_hooks.trigger(&TemplateEvent::Expired {
                        template_id: id,
                        protocol: TemplateProtocol::V9,
                    });
                    self.metrics.record_miss();
                    return None;
                }
            }
            self.metrics.record_hit();
            return Some(entry.template.clone());
        }
        self.metrics.record_miss();
        None
    }

    fn lookup_options_template(&mut self, id: TemplateId) -> Option<OptionsTemplate> {
        let ttl_config = self.ttl_config.clone();
        if let Some(entry) = self.options_templates.get(&id) {
            if let Some(ttl) = &ttl_config {
                if entry.is_expired(ttl) {
                    self.options_templates.pop(&id);
                    self.metrics.record_expiration();
                    self.template_hooks.trigger(&TemplateEvent::Expired {
                        template_id: id,
                        protocol: TemplateProtocol::V9,
                    });
                    self.metrics.record_miss();
                    return None;
                }
            }
            self.metrics.record_hit();
            return Some(entry.template.clone());
        }
        self.metrics.record_miss();
        None
    }

    fn insert_template(&mut self, template: Template) {
        let id = template.template_id;
        let collided = self
            .templates
            .peek(&id)
            .is_some_and(|existing| existing.template != template);
        if let Some((evicted_id, _)) = self.templates.push(id, TemplateWithTtl::new(template)) {
            if evicted_id != id {
                self.metrics.record_eviction();
                self.template_hooks.trigger(&TemplateEvent::Evicted {
                    template_id: evicted_id,
                    protocol: TemplateProtocol::V9,
                });
            }
        }
        self.metrics.record_insertion();
        let event = if collided {
            self.metrics.record_collision();
            TemplateEvent::Collision {
                template_id: id,
                protocol: TemplateProtocol::V9,
            }
        } else {
            TemplateEvent::Learned {
                template_id: id,
                protocol: TemplateProtocol::V9,
            }
        };
        self.template_hooks.trigger(&event);
    }

    fn insert_options_template(&mut self, template: OptionsTemplate) {
        let id = template.template_id;
        let collided = self
            .options_templates
            .peek(&id)
            .is_some_and(|existing| existing.template != template);
        if let Some((evicted_id, _)) = self
            .options_templates
            .push(id, TemplateWithTtl::new(template))
        {
            if evicted_id != id {
                self.metrics.record_eviction();
                self.template_hooks.trigger(&TemplateEvent::Evicted {
                    template_id: evicted_id,
                    protocol: TemplateProtocol::V9,
                });
            }
        }
        self.metrics.record_insertion();
        let event = if collided {
            self.metrics.record_collision();
            TemplateEvent::Collision {
                template_id: id,
                protocol: TemplateProtocol::V9,
            }
        } else {
            TemplateEvent::Learned {
                template_id: id,
                protocol: TemplateProtocol::V9,
            }
        };
        self.template_hooks.trigger(&event);
    }

    fn known_template_ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self.templates.iter().map(|(id, _)| *id).collect();
        ids.extend(self.options_templates.iter().map(|(id, _)| *id));
        ids.sort_unstable();
        ids
    }

    pub fn parse<'a>(&mut self, packet: &'a [u8]) -> ParsedNetflow<'a> {
        let (mut remaining, header) = match Header::parse(packet) {
            Ok(ok) => ok,
            Err(e) => {
                return ParsedNetflow::Error {
                    error: NetflowError::Incomplete {
                        available: packet.len(),
                        context: format!("V9 header: {}", e),
                    },
                };
            }
        };

        let mut raw_sets = Vec::with_capacity(header.count as usize);
        for _ in 0..header.count {
            if remaining.is_empty() {
                break;
            }
            match split_set(remaining) {
                Ok((new_remaining, flow_set_id, body)) => {
                    remaining = new_remaining;
                    raw_sets.push((flow_set_id, body));
                }
                Err(error) => return ParsedNetflow::Error { error },
            }
        }

        // Template and options-template flowsets are applied to the store
        // before any data flowset is decoded, regardless of wire order, so a
        // data flowset that happens to precede its own template in the same
        // packet still resolves.
        let mut flowsets: Vec<Option<FlowSet>> = vec![None; raw_sets.len()];
        for (idx, &(flow_set_id, body)) in raw_sets.iter().enumerate() {
            if flow_set_id == TEMPLATE_ID || flow_set_id == OPTIONS_TEMPLATE_ID {
                match self.build_flowset(flow_set_id, body) {
                    Ok(flowset) => flowsets[idx] = Some(flowset),
                    Err(error) => return ParsedNetflow::Error { error },
                }
            }
        }
        for (idx, (flow_set_id, body)) in raw_sets.into_iter().enumerate() {
            if flowsets[idx].is_none() {
                match self.build_flowset(flow_set_id, body) {
                    Ok(flowset) => flowsets[idx] = Some(flowset),
                    Err(error) => return ParsedNetflow::Error { error },
                }
            }
        }
        let flowsets = flowsets
            .into_iter()
            .map(|flowset| flowset.expect("every raw flowset is resolved in one of the two passes"))
            .collect();

        ParsedNetflow::Success {
            packet: NetflowPacket::V9(V9 { header, flowsets }),
            remaining,
        }
    }

    fn build_flowset(&mut self, flow_set_id: u16, body: &[u8]) -> Result<FlowSet, NetflowError> {
        match flow_set_id {
            TEMPLATE_ID => {
                let templates = self.parse_templates(body)?;
                for template in templates.clone() {
                    self.insert_template(template);
                }
                Ok(FlowSet {
                    flow_set_id,
                    templates: Some(templates),
                    options_template: None,
                    data: None,
                })
            }
            OPTIONS_TEMPLATE_ID => {
                let options_template = self.parse_options_template(body)?;
                self.insert_options_template(options_template.clone());
                Ok(FlowSet {
                    flow_set_id,
                    templates: None,
                    options_template: Some(options_template),
                    data: None,
                })
            }
            id if id > SET_MIN_RANGE => {
                if let Some(template) = self.lookup_template(id) {
                    let records =
                        decode_records(body, &template.field_specs(), template.record_length())?;
                    Ok(FlowSet {
                        flow_set_id: id,
                        templates: None,
                        options_template: None,
                        data: Some(records),
                    })
                } else if let Some(options_template) = self.lookup_options_template(id) {
                    let records = decode_records(
                        body,
                        &options_template.field_specs(),
                        options_template.record_length(),
                    )?;
                    Ok(FlowSet {
                        flow_set_id: id,
                        templates: None,
                        options_template: None,
                        data: Some(records),
                    })
                } else {
                    self.template_hooks.trigger(&TemplateEvent::MissingTemplate {
                        template_id: id,
                        protocol: TemplateProtocol::V9,
                    });
                    Err(NetflowError::MissingTemplate {
                        template_id: id,
                        protocol: TemplateProtocol::V9,
                        available_templates: self.known_template_ids(),
                        raw_data: body.to_vec(),
                    })
                }
            }
            _ => Err(NetflowError::ParseError {
                offset: 0,
                context: format!("reserved V9 flow set id {}", flow_set_id),
                kind: "UnknownFlowSetId".to_string(),
                remaining: body.to_vec(),
            }),
        }
    }

    fn parse_templates(&self, mut body: &[u8]) -> Result<Vec<Template>, NetflowError> {
        let mut templates = Vec::new();
        while body.len() >= 4 {
            let (rest, template_id) = be_u16::<_, NomError<&[u8]>>(body)
                .map_err(|e| parse_err(body, "template id", &e))?;
            let (rest, field_count) = be_u16::<_, NomError<&[u8]>>(rest)
                .map_err(|e| parse_err(body, "template field count", &e))?;
            if usize::from(field_count) > self.max_field_count {
                return Err(NetflowError::ParseError {
                    offset: 0,
                    context: format!(
                        "template {} field count {} exceeds limit",
                        template_id, field_count
                    ),
                    kind: "TemplateError".to_string(),
                    remaining: rest.to_vec(),
                });
            }
            let mut fields = Vec::with_capacity(field_count as usize);
            let mut rest = rest;
            for _ in 0..field_count {
                let (next, field_type_number) = be_u16::<_, NomError<&[u8]>>(rest)
                    .map_err(|e| parse_err(rest, "template field type", &e))?;
                let (next, field_length) = be_u16::<_, NomError<&[u8]>>(next)
                    .map_err(|e| parse_err(next, "template field length", &e))?;
                fields.push(TemplateField {
                    field_type_number,
                    field_type: DataFieldType::from(field_type_number),
                    field_length,
                });
                rest = next;
            }
            templates.push(Template {
                template_id,
                field_count,
                fields,
            });
            body = rest;
        }
        Ok(templates)
    }

    fn parse_options_template(&self, body: &[u8]) -> Result<OptionsTemplate, NetflowError> {
        let (rest, template_id) = be_u16::<_, NomError<&[u8]>>(body)
            .map_err(|e| parse_err(body, "options template id", &e))?;
        let (rest, scope_length) = be_u16::<_, NomError<&[u8]>>(rest)
            .map_err(|e| parse_err(rest, "options scope length", &e))?;
        let (mut rest, option_length) = be_u16::<_, NomError<&[u8]>>(rest)
            .map_err(|e| parse_err(rest, "options field length", &e))?;

        let mut scope_fields = Vec::with_capacity(usize::from(scope_length / 4));
        for _ in 0..(scope_length / 4) {
            let (next, field_type_number) = be_u16::<_, NomError<&[u8]>>(rest)
                .map_err(|e| parse_err(rest, "scope field type", &e))?;
            let (next, field_length) = be_u16::<_, NomError<&[u8]>>(next)
                .map_err(|e| parse_err(next, "scope field length", &e))?;
            scope_fields.push(OptionsTemplateScopeField {
                field_type_number,
                field_type: ScopeFieldType::from(field_type_number),
                field_length,
            });
            rest = next;
        }

        let mut option_fields = Vec::with_capacity(usize::from(option_length / 4));
        for _ in 0..(option_length / 4) {
            let (next, field_type_number) = be_u16::<_, NomError<&[u8]>>(rest)
                .map_err(|e| parse_err(rest, "option field type", &e))?;
            let (next, field_length) = be_u16::<_, NomError<&[u8]>>(next)
                .map_err(|e| parse_err(next, "option field length", &e))?;
            option_fields.push(TemplateField {
                field_type_number,
                field_type: DataFieldType::from(field_type_number),
                field_length,
            });
            rest = next;
        }

        Ok(OptionsTemplate {
            template_id,
            scope_fields,
            option_fields,
        })
    }
}

/// Splits one flowset header + body off the front of `i`, without
/// interpreting the body. Used to collect every flowset's bounds up front so
/// templates can be applied ahead of data regardless of wire order.
fn split_set(i: &[u8]) -> Result<(&[u8], u16, &[u8]), NetflowError> {
    let (i, flow_set_id) =
        be_u16::<_, NomError<&[u8]>>(i).map_err(|e| parse_err(i, "V9 flowset id", &e))?;
    let (i, length) =
        be_u16::<_, NomError<&[u8]>>(i).map_err(|e| parse_err(i, "V9 flowset length", &e))?;
    let body_len = length.checked_sub(4).ok_or_else(|| NetflowError::ParseError {
        offset: 0,
        context: "V9 flowset length shorter than header".to_string(),
        kind: "PaddingCalculationError".to_string(),
        remaining: i.to_vec(),
    })?;
    let (after, body) = take::<_, _, NomError<&[u8]>>(body_len)(i)
        .map_err(|e| parse_err(i, "V9 flowset body", &e))?;
    Ok((after, flow_set_id, body))
}

/// Trailing bytes left over once no further full record fits. Up to 3
/// zero octets are legitimate padding; anything else is corruption.
const MAX_PADDING_OCTETS: usize = 3;

fn check_padding(trailing: &[u8]) -> Result<(), NetflowError> {
    if trailing.is_empty() {
        return Ok(());
    }
    if trailing.len() <= MAX_PADDING_OCTETS && trailing.iter().all(|&b| b == 0) {
        return Ok(());
    }
    Err(NetflowError::ParseError {
        offset: 0,
        context: format!(
            "{} trailing byte(s) in data flowset are not valid padding",
            trailing.len()
        ),
        kind: "PaddingCalculationError".to_string(),
        remaining: trailing.to_vec(),
    })
}

fn decode_records(
    mut body: &[u8],
    specs: &[FieldSpec],
    record_length: usize,
) -> Result<Vec<BTreeMap<String, FieldValue>>, NetflowError> {
    let mut records = Vec::new();
    if record_length == 0 {
        return Ok(records);
    }
    while body.len() >= record_length {
        let mut record = BTreeMap::new();
        let mut remaining = body;
        let mut failed = false;
        for spec in specs {
            match FieldValue::from_field_type(remaining, spec.data_type.clone(), spec.field_length)
            {
                Ok((rest, value)) => {
                    record.insert(spec.name.clone(), value);
                    remaining = rest;
                }
                Err(_) => {
                    failed = true;
                    break;
                }
            }
        }
        if failed {
            break;
        }
        records.push(record);
        body = remaining;
    }
    check_padding(body)?;
    Ok(records)
}

fn parse_err(i: &[u8], context: &str, e: &NomErr<NomError<&[u8]>>) -> NetflowError {
    NetflowError::ParseError {
        offset: 0,
        context: context.to_string(),
        kind: format!("{:?}", e),
        remaining: i[..i.len().min(256)].to_vec(),
    }
}

impl ParserConfig for V9Parser {
    fn add_config(&mut self, config: Config) -> Result<(), ConfigError> {
        self.set_max_template_cache_size(config.max_template_cache_size)?;
        self.max_field_count = config.max_field_count;
        self.set_ttl_config(config.ttl_config)?;
        Ok(())
    }

    fn set_max_template_cache_size(&mut self, size: usize) -> Result<(), ConfigError> {
        let size = NonZeroUsize::new(size).ok_or(ConfigError::InvalidCacheSize(size))?;
        self.max_template_cache_size = size.get();
        self.resize_template_caches(size);
        Ok(())
    }

    fn set_ttl_config(&mut self, ttl_config: Option<TtlConfig>) -> Result<(), ConfigError> {
        self.ttl_config = ttl_config;
        Ok(())
    }

    fn resize_template_caches(&mut self, cache_size: NonZeroUsize) {
        self.templates.resize(cache_size);
        self.options_templates.resize(cache_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_bytes(template_id: u16, fields: &[(u16, u16)]) -> Vec<u8> {
        let mut body = vec![];
        body.extend_from_slice(&template_id.to_be_bytes());
        body.extend_from_slice(&(fields.len() as u16).to_be_bytes());
        for (t, l) in fields {
            body.extend_from_slice(&t.to_be_bytes());
            body.extend_from_slice(&l.to_be_bytes());
        }
        body
    }

    fn flowset_bytes(flow_set_id: u16, body: &[u8]) -> Vec<u8> {
        let mut out = vec![];
        out.extend_from_slice(&flow_set_id.to_be_bytes());
        out.extend_from_slice(&((body.len() + 4) as u16).to_be_bytes());
        out.extend_from_slice(body);
        out
    }

    fn header_bytes(count: u16) -> Vec<u8> {
        let mut h = vec![];
        h.extend_from_slice(&9u16.to_be_bytes());
        h.extend_from_slice(&count.to_be_bytes());
        h.extend_from_slice(&0u32.to_be_bytes());
        h.extend_from_slice(&1_700_000_000u32.to_be_bytes());
        h.extend_from_slice(&1u32.to_be_bytes());
        h.extend_from_slice(&42u32.to_be_bytes());
        h
    }

    #[test]
    fn it_learns_a_template_then_decodes_data() {
        let mut parser = V9Parser::default();

        // IPV4SRCADDR (8, len 4), L4SRCPORT (7, len 2)
        let template_body = template_bytes(256, &[(8, 4), (7, 2)]);
        let template_packet = [header_bytes(1), flowset_bytes(TEMPLATE_ID, &template_body)].concat();
        // Skip the 2-byte version prefix, as the dispatcher would.
        let result = parser.parse(&template_packet[2..]);
        match result {
            ParsedNetflow::Success { remaining, .. } => assert!(remaining.is_empty()),
            other => panic!("expected success, got {:?}", other),
        }
        assert!(parser.templates.peek(&256).is_some());

        let mut data_body = vec![];
        data_body.extend_from_slice(&[10, 0, 0, 1]);
        data_body.extend_from_slice(&443u16.to_be_bytes());
        let data_packet = [header_bytes(1), flowset_bytes(256, &data_body)].concat();
        match parser.parse(&data_packet[2..]) {
            ParsedNetflow::Success { packet, remaining } => {
                assert!(remaining.is_empty());
                if let NetflowPacket::V9(v9) = packet {
                    let records = v9.flowsets[0].data.clone().unwrap();
                    assert_eq!(records.len(), 1);
                    assert_eq!(
                        records[0].get("IPV4_SRC_ADDR"),
                        Some(&FieldValue::Ip4Addr(std::net::Ipv4Addr::new(10, 0, 0, 1)))
                    );
                } else {
                    panic!("expected V9 packet");
                }
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn it_reports_missing_template() {
        let mut parser = V9Parser::default();
        let data_packet = [header_bytes(1), flowset_bytes(512, &[1, 2, 3, 4])].concat();
        match parser.parse(&data_packet[2..]) {
            ParsedNetflow::Error {
                error: NetflowError::MissingTemplate { template_id, .. },
            } => assert_eq!(template_id, 512),
            other => panic!("expected missing template error, got {:?}", other),
        }
    }
}
