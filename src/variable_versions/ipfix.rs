//! # IPFIX
//!
//! References:
//! - <https://datatracker.ietf.org/doc/html/rfc7011>
//! - <https://www.iana.org/assignments/ipfix/ipfix.xhtml>
//!
//! Structurally similar to V9 (template-driven, same 4-byte Set header
//! layout) but standardized, with enterprise-scoped fields and variable
//! length encoding (a field length of 0xFFFF means the actual length is
//! carried in the record itself).

use crate::template_events::{TemplateEvent, TemplateHooks, TemplateProtocol};
use crate::variable_versions::data_number::{FieldDataType, FieldValue};
use crate::variable_versions::enterprise_registry::EnterpriseFieldRegistry;
use crate::variable_versions::ipfix_lookup::IPFixField;
use crate::variable_versions::metrics::CacheMetrics;
use crate::variable_versions::ttl::{TemplateWithTtl, TtlConfig};
use crate::variable_versions::{Config, ConfigError, ParserConfig};
use crate::{NetflowError, NetflowPacket, ParsedNetflow};

use lru::LruCache;
use nom::Err as NomErr;
use nom::bytes::complete::take;
use nom::error::Error as NomError;
use nom::number::complete::{be_u8, be_u16, be_u32};
use nom_derive::*;
use serde::Serialize;

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::time::Duration;

const TEMPLATE_ID: u16 = 2;
const OPTIONS_TEMPLATE_ID: u16 = 3;
const SET_MIN_RANGE: u16 = 255;
const VARIABLE_LENGTH: u16 = 65535;
const ENTERPRISE_BIT: u16 = 0x8000;

/// Upper bound on fields accepted in a single template, to bound memory use
/// when an exporter (or attacker) sends a pathological template.
pub const MAX_FIELD_COUNT: u16 = 512;

type TemplateId = u16;

#[derive(Debug, Clone, Serialize)]
pub struct IPFix {
    pub header: Header,
    pub sets: Vec<Set>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Nom)]
pub struct Header {
    #[nom(Value = "10")]
    pub version: u16,
    pub length: u16,
    #[nom(Map = "|i| Duration::from_secs(u64::from(i))", Parse = "be_u32")]
    pub export_time: Duration,
    pub sequence_number: u32,
    pub observation_domain_id: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Set {
    pub id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<Template>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options_template: Option<OptionsTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<BTreeMap<String, FieldValue>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub field_type_number: u16,
    pub field_type: IPFixField,
    pub field_length: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enterprise_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub template_id: u16,
    pub field_count: u16,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionsTemplate {
    pub template_id: u16,
    pub scope_field_count: u16,
    pub scope_fields: Vec<Field>,
    pub option_fields: Vec<Field>,
}

impl Template {
    fn all_fields(&self) -> &[Field] {
        &self.fields
    }
}

impl OptionsTemplate {
    fn all_fields(&self) -> Vec<Field> {
        let mut fields = self.scope_fields.clone();
        fields.extend(self.option_fields.clone());
        fields
    }
}

fn field_name(field: &Field) -> String {
    if let Some(enterprise_number) = field.enterprise_number {
        return format!("ENTERPRISE_{}_{}", enterprise_number, field.field_type_number);
    }
    match field.field_type {
        IPFixField::Unknown(id) => format!("UNKNOWN_{}", id),
        other => format!("{:?}", other),
    }
}

type CachedTemplate = TemplateWithTtl<Template>;
type CachedOptionsTemplate = TemplateWithTtl<OptionsTemplate>;

#[derive(Debug)]
pub struct IPFixParser {
    pub templates: LruCache<TemplateId, CachedTemplate>,
    pub ipfix_options_templates: LruCache<TemplateId, CachedOptionsTemplate>,
    /// V9-flavored flowset ids (0/1) are never valid inside an IPFIX message;
    /// these stay empty, kept only so cache-stat accounting has a single shape
    /// across both parsers.
    pub v9_templates: LruCache<TemplateId, CachedTemplate>,
    pub v9_options_templates: LruCache<TemplateId, CachedOptionsTemplate>,
    pub max_template_cache_size: usize,
    pub max_field_count: usize,
    pub ttl_config: Option<TtlConfig>,
    pub metrics: CacheMetrics,
    enterprise_registry: EnterpriseFieldRegistry,
    template_hooks: TemplateHooks,
}

impl Default for IPFixParser {
    fn default() -> Self {
        Self::try_new(Config::new(1000, None)).expect("default cache size is non-zero")
    }
}

impl IPFixParser {
    pub fn try_new(config: Config) -> Result<Self, ConfigError> {
        let size = NonZeroUsize::new(config.max_template_cache_size)
            .ok_or(ConfigError::InvalidCacheSize(config.max_template_cache_size))?;
        Ok(Self {
            templates: LruCache::new(size),
            ipfix_options_templates: LruCache::new(size),
            v9_templates: LruCache::new(size),
            v9_options_templates: LruCache::new(size),
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
                        protocol: TemplateProtocol::Ipfix,
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
        if let Some(entry) = self.ipfix_options_templates.get(&id) {
            if let Some(ttl) = &ttl_config {
                if entry.is_expired(ttl) {
                    self.ipfix_options_templates.pop(&id);
                    self.metrics.record_expiration();
                    self.template_hooks.trigger(&TemplateEvent::Expired {
                        template_id: id,
                        protocol: TemplateProtocol::Ipfix,
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
                    protocol: TemplateProtocol::Ipfix,
                });
            }
        }
        self.metrics.record_insertion();
        let event = if collided {
            self.metrics.record_collision();
            TemplateEvent::Collision {
                template_id: id,
                protocol: TemplateProtocol::Ipfix,
            }
        } else {
            TemplateEvent::Learned {
                template_id: id,
                protocol: TemplateProtocol::Ipfix,
            }
        };
        self.template_hooks.trigger(&event);
    }

    fn insert_options_template(&mut self, template: OptionsTemplate) {
        let id = template.template_id;
        let collided = self
            .ipfix_options_templates
            .peek(&id)
            .is_some_and(|existing| existing.template != template);
        if let Some((evicted_id, _)) = self
            .ipfix_options_templates
            .push(id, TemplateWithTtl::new(template))
        {
            if evicted_id != id {
                self.metrics.record_eviction();
                self.template_hooks.trigger(&TemplateEvent::Evicted {
                    template_id: evicted_id,
                    protocol: TemplateProtocol::Ipfix,
                });
            }
        }
        self.metrics.record_insertion();
        let event = if collided {
            self.metrics.record_collision();
            TemplateEvent::Collision {
                template_id: id,
                protocol: TemplateProtocol::Ipfix,
            }
        } else {
            TemplateEvent::Learned {
                template_id: id,
                protocol: TemplateProtocol::Ipfix,
            }
        };
        self.template_hooks.trigger(&event);
    }

    fn known_template_ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self.templates.iter().map(|(id, _)| *id).collect();
        ids.extend(self.ipfix_options_templates.iter().map(|(id, _)| *id));
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
                        context: format!("IPFIX header: {}", e),
                    },
                };
            }
        };

        let total_len = usize::from(header.length);
        let mut consumed = packet.len() - remaining.len();
        let mut raw_sets = Vec::new();

        while consumed < total_len && !remaining.is_empty() {
            match split_set(remaining) {
                Ok((next_remaining, id, body)) => {
                    consumed += remaining.len() - next_remaining.len();
                    remaining = next_remaining;
                    raw_sets.push((id, body));
                }
                Err(error) => return ParsedNetflow::Error { error },
            }
        }

        // Template and options-template sets are applied to the store before
        // any data set is decoded, regardless of wire order, so a data set
        // that happens to precede its own template in the same packet still
        // resolves.
        let mut sets: Vec<Option<Set>> = vec![None; raw_sets.len()];
        for (idx, &(id, body)) in raw_sets.iter().enumerate() {
            if id == TEMPLATE_ID || id == OPTIONS_TEMPLATE_ID {
                match self.build_set(id, body) {
                    Ok(set) => sets[idx] = Some(set),
                    Err(error) => return ParsedNetflow::Error { error },
                }
            }
        }
        for (idx, (id, body)) in raw_sets.into_iter().enumerate() {
            if sets[idx].is_none() {
                match self.build_set(id, body) {
                    Ok(set) => sets[idx] = Some(set),
                    Err(error) => return ParsedNetflow::Error { error },
                }
            }
        }
        let sets = sets
            .into_iter()
            .map(|set| set.expect("every raw set is resolved in one of the two passes"))
            .collect();

        ParsedNetflow::Success {
            packet: NetflowPacket::IPFix(IPFix { header, sets }),
            remaining,
        }
    }

    fn build_set(&mut self, id: u16, body: &[u8]) -> Result<Set, NetflowError> {
        match id {
            TEMPLATE_ID => {
                let templates = self.parse_templates(body)?;
                for template in &templates {
                    self.insert_template(template.clone());
                }
                Ok(Set {
                    id,
                    templates: Some(templates),
                    options_template: None,
                    data: None,
                })
            }
            OPTIONS_TEMPLATE_ID => {
                let options_template = self.parse_options_template(body)?;
                self.insert_options_template(options_template.clone());
                Ok(Set {
                    id,
                    templates: None,
                    options_template: Some(options_template),
                    data: None,
                })
            }
            id if id > SET_MIN_RANGE => {
                if let Some(template) = self.lookup_template(id) {
                    let records =
                        decode_records(body, template.all_fields(), &self.enterprise_registry)?;
                    Ok(Set {
                        id,
                        templates: None,
                        options_template: None,
                        data: Some(records),
                    })
                } else if let Some(options_template) = self.lookup_options_template(id) {
                    let fields = options_template.all_fields();
                    let records = decode_records(body, &fields, &self.enterprise_registry)?;
                    Ok(Set {
                        id,
                        templates: None,
                        options_template: None,
                        data: Some(records),
                    })
                } else {
                    self.template_hooks.trigger(&TemplateEvent::MissingTemplate {
                        template_id: id,
                        protocol: TemplateProtocol::Ipfix,
                    });
                    Err(NetflowError::MissingTemplate {
                        template_id: id,
                        protocol: TemplateProtocol::Ipfix,
                        available_templates: self.known_template_ids(),
                        raw_data: body.to_vec(),
                    })
                }
            }
            _ => Err(NetflowError::ParseError {
                offset: 0,
                context: format!("reserved IPFIX set id {}", id),
                kind: "UnknownSetId".to_string(),
                remaining: body.to_vec(),
            }),
        }
    }

    fn parse_field_spec<'a>(&self, i: &'a [u8]) -> Result<(&'a [u8], Field), NetflowError> {
        let (i, raw_id) =
            be_u16::<_, NomError<&[u8]>>(i).map_err(|e| parse_err(i, "field id", &e))?;
        let (i, field_length) =
            be_u16::<_, NomError<&[u8]>>(i).map_err(|e| parse_err(i, "field length", &e))?;
        let enterprise_bit = raw_id & ENTERPRISE_BIT != 0;
        let field_type_number = raw_id & !ENTERPRISE_BIT;
        let (i, enterprise_number) = if enterprise_bit {
            let (i, num) =
                be_u32::<_, NomError<&[u8]>>(i).map_err(|e| parse_err(i, "enterprise number", &e))?;
            (i, Some(num))
        } else {
            (i, None)
        };
        Ok((
            i,
            Field {
                field_type_number,
                field_type: IPFixField::from(field_type_number),
                field_length,
                enterprise_number,
            },
        ))
    }

    fn parse_templates(&self, mut body: &[u8]) -> Result<Vec<Template>, NetflowError> {
        let mut templates = Vec::new();
        while body.len() >= 4 {
            let (rest, template_id) = be_u16::<_, NomError<&[u8]>>(body)
                .map_err(|e| parse_err(body, "template id", &e))?;
            let (rest, field_count) = be_u16::<_, NomError<&[u8]>>(rest)
                .map_err(|e| parse_err(body, "template field count", &e))?;
            if field_count > MAX_FIELD_COUNT || usize::from(field_count) > self.max_field_count {
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
                let (next, field) = self.parse_field_spec(rest)?;
                fields.push(field);
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
        let (rest, field_count) = be_u16::<_, NomError<&[u8]>>(rest)
            .map_err(|e| parse_err(rest, "options field count", &e))?;
        let (mut rest, scope_field_count) = be_u16::<_, NomError<&[u8]>>(rest)
            .map_err(|e| parse_err(rest, "options scope field count", &e))?;

        let mut scope_fields = Vec::with_capacity(usize::from(scope_field_count));
        for _ in 0..scope_field_count {
            let (next, field) = self.parse_field_spec(rest)?;
            scope_fields.push(field);
            rest = next;
        }

        let option_field_count = field_count.saturating_sub(scope_field_count);
        let mut option_fields = Vec::with_capacity(usize::from(option_field_count));
        for _ in 0..option_field_count {
            let (next, field) = self.parse_field_spec(rest)?;
            option_fields.push(field);
            rest = next;
        }

        Ok(OptionsTemplate {
            template_id,
            scope_field_count,
            scope_fields,
            option_fields,
        })
    }
}

/// Splits one set header + body off the front of `i`, without interpreting
/// the body. Used to collect every set's bounds up front so templates can be
/// applied ahead of data regardless of wire order.
fn split_set(i: &[u8]) -> Result<(&[u8], u16, &[u8]), NetflowError> {
    let (i, id) = be_u16::<_, NomError<&[u8]>>(i).map_err(|e| parse_err(i, "IPFIX set id", &e))?;
    let (i, length) =
        be_u16::<_, NomError<&[u8]>>(i).map_err(|e| parse_err(i, "IPFIX set length", &e))?;
    let body_len = length.checked_sub(4).ok_or_else(|| NetflowError::ParseError {
        offset: 0,
        context: "IPFIX set length shorter than header".to_string(),
        kind: "PaddingCalculationError".to_string(),
        remaining: i.to_vec(),
    })?;
    let (after, body) = take::<_, _, NomError<&[u8]>>(body_len)(i)
        .map_err(|e| parse_err(i, "IPFIX set body", &e))?;
    Ok((after, id, body))
}

/// Trailing bytes left over once no further full record fits. Up to 15
/// zero octets are legitimate padding; anything else is corruption.
const MAX_PADDING_OCTETS: usize = 15;

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
            "{} trailing byte(s) in data set are not valid padding",
            trailing.len()
        ),
        kind: "PaddingCalculationError".to_string(),
        remaining: trailing.to_vec(),
    })
}

fn read_variable_length(i: &[u8]) -> Result<(&[u8], u16), NetflowError> {
    let (i, first) =
        be_u8::<_, NomError<&[u8]>>(i).map_err(|e| parse_err(i, "variable length prefix", &e))?;
    if first == 255 {
        let (i, len) =
            be_u16::<_, NomError<&[u8]>>(i).map_err(|e| parse_err(i, "variable length value", &e))?;
        Ok((i, len))
    } else {
        Ok((i, u16::from(first)))
    }
}

fn decode_records(
    mut body: &[u8],
    specs: &[Field],
    enterprise_registry: &EnterpriseFieldRegistry,
) -> Result<Vec<BTreeMap<String, FieldValue>>, NetflowError> {
    let mut records = Vec::new();
    if specs.is_empty() {
        return Ok(records);
    }
    'records: while !body.is_empty() {
        let mut record = BTreeMap::new();
        let mut remaining = body;
        for spec in specs {
            let (after_length, field_length) = if spec.field_length == VARIABLE_LENGTH {
                match read_variable_length(remaining) {
                    Ok(ok) => ok,
                    Err(_) => break 'records,
                }
            } else {
                (remaining, spec.field_length)
            };

            let data_type = match spec.enterprise_number {
                Some(number) => enterprise_registry
                    .get(number, spec.field_type_number)
                    .map(|def| def.data_type.clone())
                    .unwrap_or(FieldDataType::Vec),
                None => spec.field_type.into(),
            };

            match FieldValue::from_field_type(after_length, data_type, field_length) {
                Ok((rest, value)) => {
                    record.insert(field_name(spec), value);
                    remaining = rest;
                }
                Err(_) => break 'records,
            }
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

impl ParserConfig for IPFixParser {
    fn add_config(&mut self, config: Config) -> Result<(), ConfigError> {
        self.set_max_template_cache_size(config.max_template_cache_size)?;
        self.max_field_count = config.max_field_count;
        self.set_ttl_config(config.ttl_config)?;
        self.enterprise_registry = config.enterprise_registry;
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
        self.ipfix_options_templates.resize(cache_size);
        self.v9_templates.resize(cache_size);
        self.v9_options_templates.resize(cache_size);
    }
}
