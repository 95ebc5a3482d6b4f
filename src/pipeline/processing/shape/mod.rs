//! Element shaper: turns one raw OSM element into a document-store record.
//!
//! Each element goes through four passes in a fixed order:
//!
//! ```text
//! attributes ──► nested tags ──► node refs ──► lat/lon merge
//! ```
//!
//! Later passes may overwrite fields set by earlier ones (a nested `lat` tag
//! replaces the attribute before the merge sees it).

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use crate::constants::{
    field_name_for, is_created_attr, is_recognized_kind, ADDRESS_PREFIX, LAT_ATTR, LON_ATTR,
    NETWORK_KEY, NODE_REF_ATTR, NODE_REF_CHILD, POSTCODE_AREA_FIELD, POSTCODE_FIELD,
    POSTCODE_SENTINEL, POSTCODE_UNIT_FIELD, PROBLEM_CHARS, TAG_CHILD, TAG_KEY_ATTR,
    TAG_VALUE_ATTR,
};
use crate::error::ShapeError;
use crate::observability::metrics;
use crate::pipeline::processing::normalize::{
    normalize_network_with, EmptySegments, PostcodeNormalizer,
};
use crate::types::{FieldValue, RawElement, ShapedRecord};

/// How a nested tag key is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey<'a> {
    /// Contains a character that cannot appear in a field name; dropped
    ProblemChars,
    /// `addr:<field>` with `<field>` made of `[a-z_]`
    Address(&'a str),
    /// `addr:` followed by anything else, e.g. `addr:street:name`; dropped
    MalformedAddress,
    /// Stored at the top level
    General(&'a str),
}

pub fn has_problem_chars(key: &str) -> bool {
    key.contains(PROBLEM_CHARS)
}

fn is_address_field(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

pub fn classify_tag_key(key: &str) -> TagKey<'_> {
    if has_problem_chars(key) {
        return TagKey::ProblemChars;
    }
    match key.strip_prefix(ADDRESS_PREFIX) {
        Some(field) if is_address_field(field) => TagKey::Address(field),
        Some(_) => TagKey::MalformedAddress,
        None => TagKey::General(key),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShaperOptions {
    pub network_empty_segments: EmptySegments,
}

pub struct Shaper {
    postcodes: PostcodeNormalizer,
    options: ShaperOptions,
}

impl Default for Shaper {
    fn default() -> Self {
        Self::new()
    }
}

impl Shaper {
    pub fn new() -> Self {
        Self::with_options(ShaperOptions::default())
    }

    pub fn with_options(options: ShaperOptions) -> Self {
        Self {
            postcodes: PostcodeNormalizer::new(),
            options,
        }
    }

    pub fn options(&self) -> ShaperOptions {
        self.options
    }

    /// Shape one element. `Ok(None)` means the element kind is not a node or
    /// way and produces no record.
    pub fn shape(&self, element: &RawElement) -> Result<Option<ShapedRecord>, ShapeError> {
        if !is_recognized_kind(&element.kind) {
            trace!(kind = %element.kind, "Rejecting element kind");
            return Ok(None);
        }

        let mut record = ShapedRecord::new(element.kind.clone());
        self.apply_attributes(element, &mut record)?;
        self.apply_tags(element, &mut record);
        self.apply_node_refs(element, &mut record);
        merge_position(element, &mut record)?;

        Ok(Some(record))
    }

    fn apply_attributes(
        &self,
        element: &RawElement,
        record: &mut ShapedRecord,
    ) -> Result<(), ShapeError> {
        let mut seen = HashSet::new();
        for (name, value) in &element.attributes {
            if !seen.insert(name.as_str()) {
                return Err(ShapeError::DuplicateAttribute {
                    kind: element.kind.clone(),
                    id: element.id().map(str::to_string),
                    name: name.clone(),
                });
            }

            if is_created_attr(name) {
                record
                    .created
                    .get_or_insert_with(BTreeMap::new)
                    .insert(name.clone(), value.clone());
            } else {
                record
                    .fields
                    .insert(field_name_for(name).to_string(), value.as_str().into());
            }
        }
        Ok(())
    }

    fn apply_tags(&self, element: &RawElement, record: &mut ShapedRecord) {
        for tag in element.children_of_kind(TAG_CHILD) {
            let (Some(key), Some(value)) = (tag.attr(TAG_KEY_ATTR), tag.attr(TAG_VALUE_ATTR))
            else {
                trace!(id = ?element.id(), "Tag without k/v, skipping");
                continue;
            };

            match classify_tag_key(key) {
                TagKey::ProblemChars => {
                    trace!(key, "Skipping tag with problem characters");
                    metrics::shaper::tag_skipped("problem_chars");
                }
                TagKey::MalformedAddress => {
                    trace!(key, "Skipping malformed address tag");
                    metrics::shaper::tag_skipped("address_key");
                }
                TagKey::Address(field) => self.set_address_field(record, field, value),
                TagKey::General(key) => {
                    let stored = if key == NETWORK_KEY {
                        FieldValue::List(normalize_network_with(
                            value,
                            self.options.network_empty_segments,
                        ))
                    } else {
                        value.into()
                    };
                    record.fields.insert(field_name_for(key).to_string(), stored);
                }
            }
        }
    }

    fn set_address_field(&self, record: &mut ShapedRecord, field: &str, value: &str) {
        let address = record.address.get_or_insert_with(BTreeMap::new);
        address.insert(field.to_string(), value.to_string());

        if field == POSTCODE_FIELD {
            let (area, unit) = self.postcodes.normalize(value);
            if area == POSTCODE_SENTINEL {
                metrics::shaper::postcode_rejected();
            }
            address.insert(POSTCODE_AREA_FIELD.to_string(), area);
            address.insert(POSTCODE_UNIT_FIELD.to_string(), unit);
        }
    }

    fn apply_node_refs(&self, element: &RawElement, record: &mut ShapedRecord) {
        for nd in element.children_of_kind(NODE_REF_CHILD) {
            match nd.attr(NODE_REF_ATTR) {
                Some(node_ref) => record
                    .node_refs
                    .get_or_insert_with(Vec::new)
                    .push(node_ref.to_string()),
                None => trace!(id = ?element.id(), "Node reference without ref, skipping"),
            }
        }
    }
}

/// Replace top-level `lat`/`lon` with a numeric `pos` pair when both exist
fn merge_position(element: &RawElement, record: &mut ShapedRecord) -> Result<(), ShapeError> {
    let (Some(lat), Some(lon)) = (record.fields.get(LAT_ATTR), record.fields.get(LON_ATTR)) else {
        return Ok(());
    };

    let lat = parse_coordinate(element, LAT_ATTR, lat)?;
    let lon = parse_coordinate(element, LON_ATTR, lon)?;

    record.pos = Some([lat, lon]);
    record.fields.remove(LAT_ATTR);
    record.fields.remove(LON_ATTR);
    Ok(())
}

fn parse_coordinate(
    element: &RawElement,
    field: &'static str,
    value: &FieldValue,
) -> Result<f64, ShapeError> {
    let invalid = || ShapeError::InvalidCoordinate {
        kind: element.kind.clone(),
        id: element.id().map(str::to_string),
        field,
        value: match value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(";"),
        },
    };

    value
        .as_text()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(invalid)
}
