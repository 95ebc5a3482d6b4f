use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::{
    ID_ATTR, NODE_REF_ATTR, NODE_REF_CHILD, TAG_CHILD, TAG_KEY_ATTR, TAG_VALUE_ATTR,
};

/// One element as handed over by the traversal layer.
///
/// Attributes keep document order so that duplicate names stay visible to the
/// shaper instead of being collapsed by a map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawElement {
    pub kind: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<ChildEntry>,
}

/// A direct child of a [`RawElement`], e.g. `<tag k=".." v=".."/>` or `<nd ref=".."/>`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildEntry {
    pub kind: String,
    pub attributes: Vec<(String, String)>,
}

impl ChildEntry {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// First value of the named attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl RawElement {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Append a `<tag k v/>` child
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.children.push(
            ChildEntry::new(TAG_CHILD)
                .with_attr(TAG_KEY_ATTR, key)
                .with_attr(TAG_VALUE_ATTR, value),
        );
        self
    }

    /// Append a `<nd ref/>` child
    pub fn with_node_ref(mut self, node_ref: impl Into<String>) -> Self {
        self.children
            .push(ChildEntry::new(NODE_REF_CHILD).with_attr(NODE_REF_ATTR, node_ref));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr(ID_ATTR)
    }

    pub fn children_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ChildEntry> {
        self.children.iter().filter(move |c| c.kind == kind)
    }
}

/// A top-level field value: plain text, or the list produced by a value
/// normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Document-store shaped form of a node or way
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapedRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<BTreeMap<String, String>>,
    /// `[latitude, longitude]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_refs: Option<Vec<String>>,
    /// Every other attribute and nested tag, keyed by its stored name
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl ShapedRecord {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            created: None,
            pos: None,
            address: None,
            node_refs: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn user(&self) -> Option<&str> {
        self.created
            .as_ref()
            .and_then(|c| c.get("user"))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_optional_parts_are_not_serialized() {
        let mut record = ShapedRecord::new("node");
        record.fields.insert("id".to_string(), "1".into());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({ "type": "node", "id": "1" }));
    }

    #[test]
    fn list_fields_serialize_as_arrays() {
        let mut record = ShapedRecord::new("way");
        record.fields.insert(
            "network".to_string(),
            vec!["A".to_string(), "B".to_string()].into(),
        );
        record.node_refs = Some(vec!["1".to_string(), "1".to_string()]);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({ "type": "way", "network": ["A", "B"], "node_refs": ["1", "1"] })
        );
    }

    #[test]
    fn builder_keeps_child_order() {
        let element = RawElement::new("way")
            .with_node_ref("2")
            .with_tag("highway", "service")
            .with_node_ref("1");

        let refs: Vec<_> = element
            .children_of_kind(NODE_REF_CHILD)
            .filter_map(|c| c.attr(NODE_REF_ATTR))
            .collect();
        assert_eq!(refs, vec!["2", "1"]);
    }
}
