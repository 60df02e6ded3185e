//! Date normalization for Polish historical date shorthand
//!
//! Source records write dates the way printed registers of officials do:
//!
//! | Input          | Value        | Precision | Qualifier |
//! |----------------|--------------|-----------|-----------|
//! | `1450`         | `1450`       | year      | none      |
//! | `15.06.1450`   | `1450-06-15` | day       | none      |
//! | `XV w.`        | `15`         | century   | none      |
//! | `ok. 1450`     | `1450`       | year      | circa     |
//! | `po 1450`      | `1450`       | year      | after     |
//! | `przed 1450`   | `1450`       | year      | before    |

use std::fmt;
use thiserror::Error;

/// Suffix marking a century ("wiek")
const CENTURY_SUFFIX: &str = " w.";

/// Prefixes that turn a year into an uncertain or bounded date
const MODIFIER_PREFIXES: [(&str, QualifierKind); 3] = [
    ("ok. ", QualifierKind::Circa),
    ("po ", QualifierKind::After),
    ("przed ", QualifierKind::Before),
];

/// Roman numeral → century ordinal
///
/// `XII` maps to `10`, not `12`. This looks like a typo in the register
/// conversion table; it is kept verbatim so imported data stays consistent
/// with what was already loaded.
const ROMAN_CENTURIES: [(&str, &str); 10] = [
    ("X", "10"),
    ("XI", "11"),
    ("XII", "10"),
    ("XIII", "13"),
    ("XIV", "14"),
    ("XV", "15"),
    ("XVI", "16"),
    ("XVII", "17"),
    ("XVIII", "18"),
    ("XIX", "19"),
];

/// Granularity at which a date is asserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// Century ordinal, e.g. `15`
    Century,
    /// Four-digit year
    Year,
    /// Exact day
    Day,
}

impl Precision {
    /// Wikibase precision code (7 = century, 9 = year, 11 = day)
    pub fn code(&self) -> u8 {
        match self {
            Precision::Century => 7,
            Precision::Year => 9,
            Precision::Day => 11,
        }
    }

    /// Get the precision name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Century => "century",
            Precision::Year => "year",
            Precision::Day => "day",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier attached to a date expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifierKind {
    /// Plain date
    None,
    /// "ok." - approximately
    Circa,
    /// "po" - some time after
    After,
    /// "przed" - some time before
    Before,
}

impl QualifierKind {
    /// Get the qualifier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            QualifierKind::None => "none",
            QualifierKind::Circa => "circa",
            QualifierKind::After => "after",
            QualifierKind::Before => "before",
        }
    }

    /// Whether the date carries any modifier
    pub fn is_none(&self) -> bool {
        matches!(self, QualifierKind::None)
    }
}

impl fmt::Display for QualifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of normalizing a date expression
///
/// `numeric_value` always has the shape its precision implies: two digits for
/// a century, four for a year and `yyyy-mm-dd` for a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDate {
    /// Century ordinal, year or `yyyy-mm-dd`
    pub numeric_value: String,

    /// Granularity of the value
    pub precision: Precision,

    /// Modifier found in the expression
    pub qualifier: QualifierKind,
}

impl NormalizedDate {
    /// Create a normalized date
    pub fn new(
        numeric_value: impl Into<String>,
        precision: Precision,
        qualifier: QualifierKind,
    ) -> Self {
        Self {
            numeric_value: numeric_value.into(),
            precision,
            qualifier,
        }
    }

    /// Encode the value as a Wikibase time string
    pub fn encode(&self) -> Option<crate::time::EncodedTime> {
        crate::time::encode(&self.numeric_value)
    }
}

/// Errors produced while normalizing a date expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The text matches none of the known shapes
    #[error("Date was not recognized: '{0}'")]
    Unrecognized(String),

    /// A century expression used a numeral missing from the lookup table
    #[error("Unknown century numeral: '{0}'")]
    UnknownCentury(String),
}

/// Normalize a free-text date expression
///
/// Multi-token input is matched against the century suffix first, then the
/// `ok.`/`po`/`przed` prefixes. Single tokens are either a four-digit year or
/// a `dd.mm.yyyy` day.
///
/// # Examples
///
/// ```
/// use urzednicy_domain::{normalize, Precision, QualifierKind};
///
/// let date = normalize("przed 1450").unwrap();
/// assert_eq!(date.numeric_value, "1450");
/// assert_eq!(date.precision, Precision::Year);
/// assert_eq!(date.qualifier, QualifierKind::Before);
/// ```
pub fn normalize(raw: &str) -> Result<NormalizedDate, DateError> {
    let text = raw.trim();

    if text.split_whitespace().count() > 1 {
        normalize_phrase(text)
    } else {
        normalize_token(text)
    }
}

fn normalize_phrase(text: &str) -> Result<NormalizedDate, DateError> {
    if let Some(numeral) = text.strip_suffix(CENTURY_SUFFIX) {
        let century = century_from_roman(numeral.trim())?;
        return Ok(NormalizedDate::new(century, Precision::Century, QualifierKind::None));
    }

    for (prefix, qualifier) in MODIFIER_PREFIXES {
        if let Some(rest) = text.strip_prefix(prefix) {
            let year = rest.trim();
            if !is_year(year) {
                return Err(DateError::Unrecognized(text.to_string()));
            }
            return Ok(NormalizedDate::new(year, Precision::Year, qualifier));
        }
    }

    Err(DateError::Unrecognized(text.to_string()))
}

fn normalize_token(text: &str) -> Result<NormalizedDate, DateError> {
    if is_year(text) {
        return Ok(NormalizedDate::new(text, Precision::Year, QualifierKind::None));
    }

    if is_day(text) {
        // dd.mm.yyyy -> yyyy-mm-dd
        let day = &text[0..2];
        let month = &text[3..5];
        let year = &text[6..10];
        return Ok(NormalizedDate::new(
            format!("{}-{}-{}", year, month, day),
            Precision::Day,
            QualifierKind::None,
        ));
    }

    Err(DateError::Unrecognized(text.to_string()))
}

/// Look up the century ordinal for a roman numeral
pub fn century_from_roman(numeral: &str) -> Result<&'static str, DateError> {
    ROMAN_CENTURIES
        .iter()
        .find(|(roman, _)| *roman == numeral)
        .map(|(_, century)| *century)
        .ok_or_else(|| DateError::UnknownCentury(numeral.to_string()))
}

fn is_year(text: &str) -> bool {
    text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_day(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 2 || i == 5 { *b == b'.' } else { b.is_ascii_digit() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_year() {
        assert_eq!(
            normalize("1450").unwrap(),
            NormalizedDate::new("1450", Precision::Year, QualifierKind::None)
        );
    }

    #[test]
    fn test_exact_day_is_reordered() {
        assert_eq!(
            normalize("15.06.1450").unwrap(),
            NormalizedDate::new("1450-06-15", Precision::Day, QualifierKind::None)
        );
    }

    #[test]
    fn test_century() {
        assert_eq!(
            normalize("XV w.").unwrap(),
            NormalizedDate::new("15", Precision::Century, QualifierKind::None)
        );
    }

    #[test]
    fn test_modifiers() {
        assert_eq!(
            normalize("ok. 1450").unwrap(),
            NormalizedDate::new("1450", Precision::Year, QualifierKind::Circa)
        );
        assert_eq!(
            normalize("po 1450").unwrap(),
            NormalizedDate::new("1450", Precision::Year, QualifierKind::After)
        );
        assert_eq!(
            normalize("przed 1450").unwrap(),
            NormalizedDate::new("1450", Precision::Year, QualifierKind::Before)
        );
    }

    #[test]
    fn test_garbage_is_unrecognized() {
        assert_eq!(
            normalize("garbage"),
            Err(DateError::Unrecognized("garbage".to_string()))
        );
        assert!(matches!(normalize("około roku"), Err(DateError::Unrecognized(_))));
        assert!(matches!(normalize(""), Err(DateError::Unrecognized(_))));
        assert!(matches!(normalize("145"), Err(DateError::Unrecognized(_))));
    }

    #[test]
    fn test_prefix_without_year_is_unrecognized() {
        assert!(matches!(normalize("ok. roku"), Err(DateError::Unrecognized(_))));
        assert!(matches!(normalize("po 15.06.1450"), Err(DateError::Unrecognized(_))));
    }

    #[test]
    fn test_malformed_day_is_unrecognized() {
        assert!(matches!(normalize("15-06-1450"), Err(DateError::Unrecognized(_))));
        assert!(matches!(normalize("1x.06.1450"), Err(DateError::Unrecognized(_))));
    }

    #[test]
    fn test_unknown_roman_numeral_is_lookup_error() {
        assert_eq!(
            normalize("XX w."),
            Err(DateError::UnknownCentury("XX".to_string()))
        );
        assert!(matches!(normalize("ok. XV w."), Err(DateError::UnknownCentury(_))));
    }

    #[test]
    fn test_roman_table_maps_xii_to_tenth_century() {
        // Mirrors the register table, including its XII entry.
        assert_eq!(normalize("XII w.").unwrap().numeric_value, "10");
        assert_eq!(normalize("X w.").unwrap().numeric_value, "10");
        assert_eq!(normalize("XIII w.").unwrap().numeric_value, "13");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(normalize("  1450\n").unwrap().numeric_value, "1450");
    }

    #[test]
    fn test_precision_codes() {
        assert_eq!(Precision::Century.code(), 7);
        assert_eq!(Precision::Year.code(), 9);
        assert_eq!(Precision::Day.code(), 11);
    }

    #[test]
    fn test_normalized_date_encodes() {
        let date = normalize("po 1410").unwrap();
        assert_eq!(date.encode().unwrap().as_str(), "+1410-01-01T00:00:00Z");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every four-digit year normalizes to itself
        #[test]
        fn test_year_is_identity(year in "[0-9]{4}") {
            let date = normalize(&year).unwrap();
            prop_assert_eq!(date.numeric_value, year);
            prop_assert_eq!(date.precision, Precision::Year);
            prop_assert_eq!(date.qualifier, QualifierKind::None);
        }

        /// Property: day values keep their digits, reordered year-first
        #[test]
        fn test_day_shape(d in "[0-9]{2}", m in "[0-9]{2}", y in "[0-9]{4}") {
            let date = normalize(&format!("{}.{}.{}", d, m, y)).unwrap();
            prop_assert_eq!(date.precision, Precision::Day);
            prop_assert_eq!(date.numeric_value.len(), 10);
            prop_assert_eq!(date.numeric_value, format!("{}-{}-{}", y, m, d));
        }

        /// Property: normalization never panics on arbitrary text
        #[test]
        fn test_never_panics(text in "\\PC{0,24}") {
            let _ = normalize(&text);
        }
    }
}
