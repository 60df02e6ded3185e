//! Wikibase time value encoding

use std::fmt;

/// A time string in Wikibase wire format, e.g. `+1450-01-01T00:00:00Z`
///
/// Always midnight UTC with an explicit `+` sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedTime(String);

impl EncodedTime {
    /// Get the wire string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the wire string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncodedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a normalized date value as a Wikibase time string
///
/// The branch is chosen by length alone:
/// - 4 (year) → `+yyyy-01-01T00:00:00Z`
/// - 10 (`yyyy-mm-dd`) → `+yyyy-mm-ddT00:00:00Z`
/// - 2 (century) → the century's representative year, `+{c-1}01-01-01T00:00:00Z`
///
/// Anything else yields `None`, meaning no time claim should be attached.
/// The century year is built by string concatenation and is not validated.
///
/// # Examples
///
/// ```
/// use urzednicy_domain::encode;
///
/// assert_eq!(encode("15").unwrap().as_str(), "+1401-01-01T00:00:00Z");
/// assert!(encode("145").is_none());
/// ```
pub fn encode(numeric_value: &str) -> Option<EncodedTime> {
    match numeric_value.len() {
        4 => Some(EncodedTime(format!("+{}-01-01T00:00:00Z", numeric_value))),
        10 => Some(EncodedTime(format!("+{}T00:00:00Z", numeric_value))),
        2 => {
            let century: u32 = numeric_value.parse().ok()?;
            let previous = century.checked_sub(1)?;
            Some(EncodedTime(format!("+{}01-01-01T00:00:00Z", previous)))
        }
        _ => None,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: encoded years keep the year and pin January 1st
        #[test]
        fn test_year_encoding_shape(year in "[0-9]{4}") {
            let encoded = encode(&year).unwrap();
            prop_assert_eq!(encoded.as_str(), format!("+{}-01-01T00:00:00Z", year));
        }

        /// Property: every encoded value is midnight UTC with a plus sign
        #[test]
        fn test_encoding_is_midnight_utc(value in "[0-9]{2}|[0-9]{4}|[0-9]{4}-[0-9]{2}-[0-9]{2}") {
            if let Some(encoded) = encode(&value) {
                prop_assert!(encoded.as_str().starts_with('+'));
                prop_assert!(encoded.as_str().ends_with("T00:00:00Z"));
            }
        }
    }
}
