use regex::Regex;

use crate::constants::POSTCODE_SENTINEL;

// AA9A: WC postcode area, EC1-EC4, NW1W, SE1P, SW1
const AA9A_PATTERN: &str = "(WC[0-9][A-Z])|(EC[1234][A-Z])|(NW1W)|(SE1P)|(SW1[A-Z])";
// A9A: W1, E1W, N1C, N1P
const A9A_PATTERN: &str = "(W1[ABCDEFGHJKPSTUW])|(E1W)|(N1C)|(N1P)";
// A9 / A99: B, E, G, L, M, N, S, W
const A9_PATTERN: &str = "([BEGLMNSW][0-9][0-9]*)";
// AA9 / AA99: everything else. QVX never first, IJZ never second.
const AA9_PATTERN: &str = "([ABCDEFGHIJKLMNOPRSTUWYZ][ABCDEFGHKLMNOPQRSTUVWXY][0-9][0-9]*)";

const UNIT_PATTERN: &str = "[0-9][A-Z][A-Z]";

const UNIT_LEN: usize = 3;

/// Validates UK postcodes and splits them into area and unit codes.
///
/// The compiled patterns live here rather than in a process-wide static, so
/// whoever needs postcodes checked owns one of these (the shaper keeps one for
/// its whole lifetime).
#[derive(Debug, Clone)]
pub struct PostcodeNormalizer {
    area: Regex,
    unit: Regex,
}

impl Default for PostcodeNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PostcodeNormalizer {
    pub fn new() -> Self {
        let area = format!("^(?:{AA9A_PATTERN}|{A9A_PATTERN}|{A9_PATTERN}|{AA9_PATTERN})$");
        Self {
            area: Regex::new(&area).expect("postcode area pattern is a valid regex"),
            unit: Regex::new(&format!("^(?:{UNIT_PATTERN})$"))
                .expect("postcode unit pattern is a valid regex"),
        }
    }

    /// Outward part, e.g. `KT3`, `WC2N`
    pub fn is_valid_area_code(&self, area: &str) -> bool {
        self.area.is_match(area)
    }

    /// Inward part, e.g. `2GZ`
    pub fn is_valid_unit_code(&self, unit: &str) -> bool {
        self.unit.is_match(unit)
    }

    /// Returns `(area, unit)`, or `("NA", "NA")` when the input is not a valid
    /// UK postcode.
    pub fn normalize(&self, raw: &str) -> (String, String) {
        let cleaned = raw.trim().to_uppercase();

        let split = cleaned
            .char_indices()
            .rev()
            .nth(UNIT_LEN - 1)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let (area, unit) = cleaned.split_at(split);
        let area = area.trim_end();

        if self.is_valid_area_code(area) && self.is_valid_unit_code(unit) {
            (area.to_string(), unit.to_string())
        } else {
            (POSTCODE_SENTINEL.to_string(), POSTCODE_SENTINEL.to_string())
        }
    }
}

/// One-off convenience wrapper. Compiles the patterns on every call; hold a
/// [`PostcodeNormalizer`] when checking many values.
pub fn normalize_postcode(raw: &str) -> (String, String) {
    PostcodeNormalizer::new().normalize(raw)
}
