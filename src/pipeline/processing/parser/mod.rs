use tracing::{debug, info};

use crate::error::Result;
use crate::observability::metrics;
use crate::types::{ChildEntry, RawElement};

pub trait Parser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<RawElement>>;
}

/// A wrapper that adds metrics to any parser implementation
pub struct MetricsParser<P: Parser> {
    inner: P,
}

impl<P: Parser> MetricsParser<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Parser> Parser for MetricsParser<P> {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<RawElement>> {
        let elements = self.inner.parse(bytes)?;
        metrics::reader::elements_read(elements.len() as u64);
        Ok(elements)
    }
}

/// Reads an OSM XML export.
///
/// Every child element of the root `<osm>` element (`bounds`, `node`, `way`,
/// `relation`, ...) becomes a [`RawElement`], in document order, carrying its
/// own attributes and its direct child elements. Kinds are not filtered here:
/// deciding which kinds matter is the shaper's job. Grandchildren such as
/// `tag` and `nd` only appear as child entries, never as elements of their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsmXmlParser;

impl OsmXmlParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_str(&self, xml: &str) -> Result<Vec<RawElement>> {
        debug!("OsmXmlParser: start bytes_len={}", xml.len());
        let doc = roxmltree::Document::parse(xml)?;

        let elements: Vec<RawElement> = doc
            .root_element()
            .children()
            .filter(|n| n.is_element())
            .map(|n| RawElement {
                kind: n.tag_name().name().to_string(),
                attributes: attributes_of(&n),
                children: n
                    .children()
                    .filter(|c| c.is_element())
                    .map(|c| ChildEntry {
                        kind: c.tag_name().name().to_string(),
                        attributes: attributes_of(&c),
                    })
                    .collect(),
            })
            .collect();

        info!("OsmXmlParser: read {} elements", elements.len());
        Ok(elements)
    }
}

fn attributes_of(node: &roxmltree::Node<'_, '_>) -> Vec<(String, String)> {
    node.attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect()
}

impl Parser for OsmXmlParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<RawElement>> {
        let xml = std::str::from_utf8(bytes)?;
        self.parse_str(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WranglerError;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="CGImap 0.0.2">
  <bounds minlat="41.9704" minlon="-87.6928" maxlat="41.9758" maxlon="-87.6803"/>
  <node id="261114295" visible="true" version="7" lat="41.9730791" lon="-87.6866303"/>
  <way id="209809850" visible="true" version="1">
    <nd ref="2199822281"/>
    <tag k="highway" v="service"/>
    <nd ref="2199822390"/>
  </way>
</osm>"#;

    #[test]
    fn test_reads_top_level_elements_in_document_order() {
        let elements = OsmXmlParser::new().parse_str(SAMPLE).unwrap();
        let kinds: Vec<_> = elements.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["bounds", "node", "way"]);
    }

    #[test]
    fn test_tags_and_refs_are_not_repeated_as_elements() {
        let elements = OsmXmlParser::new().parse_str(SAMPLE).unwrap();
        assert!(elements.iter().all(|e| e.kind != "tag" && e.kind != "nd"));
        assert_eq!(elements[2].children.len(), 3);
    }

    #[test]
    fn test_keeps_attribute_and_child_order() {
        let elements = OsmXmlParser::new().parse_str(SAMPLE).unwrap();

        let node = &elements[1];
        assert_eq!(node.attributes[0], ("id".to_string(), "261114295".to_string()));
        assert_eq!(node.attr("lon"), Some("-87.6866303"));

        let way = &elements[2];
        let child_kinds: Vec<_> = way.children.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(child_kinds, vec!["nd", "tag", "nd"]);
        assert_eq!(way.children[2].attr("ref"), Some("2199822390"));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let result = OsmXmlParser::new().parse_str("<osm><node></osm>");
        assert!(matches!(result, Err(WranglerError::Xml(_))));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let result = OsmXmlParser::new().parse(&[0x3c, 0xff, 0x3e]);
        assert!(matches!(result, Err(WranglerError::Utf8(_))));
    }
}
