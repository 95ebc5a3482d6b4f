use serde::Deserialize;

const SEPARATOR: char = ';';

/// What to do with blank segments, e.g. the one after a trailing `;`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySegments {
    #[default]
    Keep,
    Drop,
}

/// Split a `network` tag value into its individual network names.
///
/// `"London Underground;London Overground"` becomes
/// `["London Underground", "London Overground"]`.
pub fn normalize_network(raw: &str) -> Vec<String> {
    normalize_network_with(raw, EmptySegments::Keep)
}

pub fn normalize_network_with(raw: &str, empty: EmptySegments) -> Vec<String> {
    raw.split(SEPARATOR)
        .map(str::trim)
        .filter(|segment| empty == EmptySegments::Keep || !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_network() {
        assert_eq!(
            normalize_network("London Underground"),
            vec!["London Underground"]
        );
    }

    #[test]
    fn test_segments_are_trimmed_in_order() {
        assert_eq!(
            normalize_network("London Underground; British Rail"),
            vec!["London Underground", "British Rail"]
        );
    }

    #[test]
    fn test_empty_segments_kept_by_default() {
        assert_eq!(normalize_network("A;;A; "), vec!["A", "", "A", ""]);
    }

    #[test]
    fn test_empty_segments_can_be_dropped() {
        assert_eq!(
            normalize_network_with("A;;A; ", EmptySegments::Drop),
            vec!["A", "A"]
        );
    }
}
