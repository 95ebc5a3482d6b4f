//! Element and field name constants shared by the shaper and its collaborators.

// Top-level element kinds that produce a record
pub const NODE_KIND: &str = "node";
pub const WAY_KIND: &str = "way";

// Child entry kinds
pub const TAG_CHILD: &str = "tag";
pub const NODE_REF_CHILD: &str = "nd";

// Keys on child entries
pub const TAG_KEY_ATTR: &str = "k";
pub const TAG_VALUE_ATTR: &str = "v";
pub const NODE_REF_ATTR: &str = "ref";

// Element attributes with special handling
pub const ID_ATTR: &str = "id";
pub const LAT_ATTR: &str = "lat";
pub const LON_ATTR: &str = "lon";

/// Attributes grouped under `created` instead of the top level
pub const CREATED_ATTRS: [&str; 5] = ["version", "changeset", "timestamp", "user", "uid"];

/// Nested tag prefix for address fields
pub const ADDRESS_PREFIX: &str = "addr:";
pub const POSTCODE_FIELD: &str = "postcode";
pub const POSTCODE_AREA_FIELD: &str = "postcode_area";
pub const POSTCODE_UNIT_FIELD: &str = "postcode_unit";

/// Nested tag whose value is a `;`-separated list
pub const NETWORK_KEY: &str = "network";

/// Characters that make a nested tag key unusable as a document field name
pub const PROBLEM_CHARS: &[char] = &[
    '=', '+', '/', '&', '<', '>', ';', '\'', '"', '?', '%', '#', '$', '@', ',', '.', ' ', '\t',
    '\r', '\n',
];

/// Record-owned field names. A nested tag or attribute with one of these names
/// is stored under the mapped name instead.
pub const RESERVED_FIELD_NAMES: [(&str, &str); 5] = [
    ("type", "type_tag"),
    ("address", "address_tag"),
    ("created", "created_tag"),
    ("pos", "pos_tag"),
    ("node_refs", "node_refs_tag"),
];

/// Returned by the postcode normalizer for either part when validation fails
pub const POSTCODE_SENTINEL: &str = "NA";

pub fn is_recognized_kind(kind: &str) -> bool {
    kind == NODE_KIND || kind == WAY_KIND
}

pub fn is_created_attr(name: &str) -> bool {
    CREATED_ATTRS.contains(&name)
}

/// Map a field name onto its stored name, renaming reserved names
pub fn field_name_for(name: &str) -> &str {
    RESERVED_FIELD_NAMES
        .iter()
        .find(|(reserved, _)| *reserved == name)
        .map(|(_, renamed)| *renamed)
        .unwrap_or(name)
}
