//! Claim model - snaks, statements and references

use crate::date::Precision;
use crate::time::EncodedTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a Wikibase entity: an item (`Q…`) or a property (`P…`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Parse an entity id such as `Q32` or `P47`
    ///
    /// # Examples
    ///
    /// ```
    /// use urzednicy_domain::EntityId;
    ///
    /// let id = EntityId::from_string("Q32").unwrap();
    /// assert!(id.is_item());
    /// assert_eq!(id.numeric_id(), 32);
    /// assert!(EntityId::from_string("47").is_err());
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let mut chars = s.chars();
        let kind = chars.next();
        let digits = chars.as_str();

        let valid_kind = matches!(kind, Some('Q') | Some('P'));
        let valid_digits = !digits.is_empty()
            && !digits.starts_with('0')
            && digits.bytes().all(|b| b.is_ascii_digit());

        if valid_kind && valid_digits {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("Invalid entity id: '{}'", s))
        }
    }

    /// Item id from its number (`32` → `Q32`)
    pub fn item(number: u64) -> Self {
        Self(format!("Q{}", number))
    }

    /// Property id from its number (`47` → `P47`)
    pub fn property(number: u64) -> Self {
        Self(format!("P{}", number))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is an item id
    pub fn is_item(&self) -> bool {
        self.0.starts_with('Q')
    }

    /// Whether this is a property id
    pub fn is_property(&self) -> bool {
        self.0.starts_with('P')
    }

    /// Numeric part of the id (`Q32` → 32)
    pub fn numeric_id(&self) -> u64 {
        // Validated on construction
        self.0[1..].parse().unwrap_or_default()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EntityId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(&value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl std::str::FromStr for EntityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// A time value with its precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeValue {
    /// Wire-format time string
    pub time: EncodedTime,
    /// Granularity
    pub precision: Precision,
}

/// Typed value carried by a snak
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValue {
    /// Reference to another item
    Item(EntityId),
    /// Plain string
    String(String),
    /// URL
    Url(String),
    /// Text in a given language
    Monolingual {
        /// The text
        text: String,
        /// Language code, e.g. `pl`
        language: String,
    },
    /// Point in time
    Time(TimeValue),
}

impl DataValue {
    /// Wikibase datatype name of the value
    pub fn datatype(&self) -> &'static str {
        match self {
            DataValue::Item(_) => "wikibase-item",
            DataValue::String(_) => "string",
            DataValue::Url(_) => "url",
            DataValue::Monolingual { .. } => "monolingualtext",
            DataValue::Time(_) => "time",
        }
    }
}

/// Value slot of a snak
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakValue {
    /// A concrete value
    Value(DataValue),
    /// A value exists but is unknown
    SomeValue,
}

/// A property-value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snak {
    /// Property id
    pub property: EntityId,
    /// Value slot
    pub value: SnakValue,
}

impl Snak {
    /// Create a snak with a concrete value
    pub fn new(property: EntityId, value: DataValue) -> Self {
        Self {
            property,
            value: SnakValue::Value(value),
        }
    }

    /// Item-valued snak
    pub fn item(property: &EntityId, item: &EntityId) -> Self {
        Self::new(property.clone(), DataValue::Item(item.clone()))
    }

    /// String-valued snak
    pub fn string(property: &EntityId, value: impl Into<String>) -> Self {
        Self::new(property.clone(), DataValue::String(value.into()))
    }

    /// URL-valued snak
    pub fn url(property: &EntityId, value: impl Into<String>) -> Self {
        Self::new(property.clone(), DataValue::Url(value.into()))
    }

    /// Monolingual text snak
    pub fn monolingual(
        property: &EntityId,
        text: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self::new(
            property.clone(),
            DataValue::Monolingual {
                text: text.into(),
                language: language.into(),
            },
        )
    }

    /// Time-valued snak
    pub fn time(property: &EntityId, time: EncodedTime, precision: Precision) -> Self {
        Self::new(property.clone(), DataValue::Time(TimeValue { time, precision }))
    }

    /// Unknown-value snak
    pub fn some_value(property: &EntityId) -> Self {
        Self {
            property: property.clone(),
            value: SnakValue::SomeValue,
        }
    }

    /// The data value, if this snak carries one
    pub fn data_value(&self) -> Option<&DataValue> {
        match &self.value {
            SnakValue::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// A group of snaks citing one source
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reference {
    /// Snaks in insertion order
    pub snaks: Vec<Snak>,
}

impl Reference {
    /// Create a reference group
    pub fn new(snaks: Vec<Snak>) -> Self {
        Self { snaks }
    }
}

/// A claim on an item: main snak, qualifiers and references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// The asserted property-value pair
    pub main_snak: Snak,
    /// Qualifiers in insertion order
    pub qualifiers: Vec<Snak>,
    /// Reference groups
    pub references: Vec<Reference>,
}

impl Statement {
    /// Create a statement with no qualifiers or references
    pub fn new(main_snak: Snak) -> Self {
        Self {
            main_snak,
            qualifiers: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Add a qualifier
    pub fn with_qualifier(mut self, qualifier: Snak) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    /// Add several qualifiers
    pub fn with_qualifiers(mut self, qualifiers: impl IntoIterator<Item = Snak>) -> Self {
        self.qualifiers.extend(qualifiers);
        self
    }

    /// Add a reference group
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    /// Property of the main snak
    pub fn property(&self) -> &EntityId {
        &self.main_snak.property
    }

    /// Qualifiers under the given property
    pub fn qualifiers_for<'a>(
        &'a self,
        property: &'a EntityId,
    ) -> impl Iterator<Item = &'a Snak> + 'a {
        self.qualifiers.iter().filter(move |q| &q.property == property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> EntityId {
        EntityId::from_string(s).unwrap()
    }

    #[test]
    fn test_entity_id_parsing() {
        assert!(pid("Q1").is_item());
        assert!(pid("P47").is_property());
        assert_eq!(pid("Q37979").numeric_id(), 37979);
        assert!(EntityId::from_string("").is_err());
        assert!(EntityId::from_string("Q").is_err());
        assert!(EntityId::from_string("Q012").is_err());
        assert!(EntityId::from_string("L12").is_err());
        assert!(EntityId::from_string("Q12a").is_err());
    }

    #[test]
    fn test_entity_id_from_number() {
        assert_eq!(EntityId::item(32).as_str(), "Q32");
        assert_eq!(EntityId::property(47), EntityId::from_string("P47").unwrap());
    }

    #[test]
    fn test_entity_id_trims_whitespace() {
        assert_eq!(pid(" Q5 ").as_str(), "Q5");
    }

    #[test]
    fn test_datatypes() {
        assert_eq!(DataValue::Item(pid("Q1")).datatype(), "wikibase-item");
        assert_eq!(DataValue::Url("x".into()).datatype(), "url");
        assert_eq!(
            DataValue::Monolingual {
                text: "a".into(),
                language: "pl".into()
            }
            .datatype(),
            "monolingualtext"
        );
    }

    #[test]
    fn test_statement_builder() {
        let start = pid("P203");
        let end = pid("P204");
        let time = crate::time::encode("1410").unwrap();
        let statement = Statement::new(Snak::item(&pid("P9"), &pid("Q100")))
            .with_qualifier(Snak::time(&start, time.clone(), Precision::Year))
            .with_qualifier(Snak::time(&end, time, Precision::Year))
            .with_reference(Reference::new(vec![Snak::url(&pid("P182"), "http://example.org")]));

        assert_eq!(statement.property(), &pid("P9"));
        assert_eq!(statement.qualifiers.len(), 2);
        assert_eq!(statement.qualifiers_for(&start).count(), 1);
        assert_eq!(statement.references.len(), 1);
    }

    #[test]
    fn test_some_value_has_no_data() {
        let snak = Snak::some_value(&pid("P8"));
        assert!(snak.data_value().is_none());
        assert_eq!(snak.value, SnakValue::SomeValue);
    }
}
