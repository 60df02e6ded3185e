//! Item documents and lookup criteria

use crate::claim::{EntityId, Statement};
use std::collections::BTreeMap;

/// Everything written to a single Wikibase item
///
/// Labels and descriptions hold one value per language; aliases accumulate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemDocument {
    /// Label per language code
    pub labels: BTreeMap<String, String>,

    /// Description per language code
    pub descriptions: BTreeMap<String, String>,

    /// Aliases per language code
    pub aliases: BTreeMap<String, Vec<String>>,

    /// Statements in insertion order
    pub statements: Vec<Statement>,
}

impl ItemDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label in a language
    pub fn set_label(&mut self, language: &str, value: impl Into<String>) {
        self.labels.insert(language.to_string(), value.into());
    }

    /// Set the description in a language
    pub fn set_description(&mut self, language: &str, value: impl Into<String>) {
        self.descriptions.insert(language.to_string(), value.into());
    }

    /// Add an alias unless it is already present
    pub fn add_alias(&mut self, language: &str, value: impl Into<String>) {
        let value = value.into();
        let aliases = self.aliases.entry(language.to_string()).or_default();
        if !aliases.contains(&value) {
            aliases.push(value);
        }
    }

    /// Add a statement
    pub fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Add a statement unless one with the same main snak exists
    ///
    /// Returns whether the statement was added.
    pub fn add_statement_if_absent(&mut self, statement: Statement) -> bool {
        if self.has_main_snak(&statement) {
            return false;
        }
        self.statements.push(statement);
        true
    }

    /// Whether a statement with the same main snak is present
    pub fn has_main_snak(&self, statement: &Statement) -> bool {
        self.statements.iter().any(|s| s.main_snak == statement.main_snak)
    }

    /// Statements for a property
    pub fn statements_for<'a>(
        &'a self,
        property: &'a EntityId,
    ) -> impl Iterator<Item = &'a Statement> + 'a {
        self.statements.iter().filter(move |s| s.property() == property)
    }

    /// Label in a language
    pub fn label(&self, language: &str) -> Option<&str> {
        self.labels.get(language).map(String::as_str)
    }

    /// Description in a language
    pub fn description(&self, language: &str) -> Option<&str> {
        self.descriptions.get(language).map(String::as_str)
    }
}

/// Criteria for finding an existing item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLookup {
    /// Label plus description in the search language
    ///
    /// With `description: None` any item carrying the label matches.
    ByDescription {
        /// Label to search for
        label: String,
        /// Required description
        description: Option<String>,
    },

    /// Label plus the value of a property's first statement
    ///
    /// `value` is compared against an item id or a string value.
    ByProperty {
        /// Label to search for
        label: String,
        /// Property to inspect
        property: EntityId,
        /// Expected value
        value: String,
    },
}

impl ItemLookup {
    /// Lookup by label and (optional) description
    pub fn by_description(label: impl Into<String>, description: Option<&str>) -> Self {
        ItemLookup::ByDescription {
            label: label.into(),
            description: description.map(str::to_string),
        }
    }

    /// Lookup by label and property value
    pub fn by_property(
        label: impl Into<String>,
        property: &EntityId,
        value: impl Into<String>,
    ) -> Self {
        ItemLookup::ByProperty {
            label: label.into(),
            property: property.clone(),
            value: value.into(),
        }
    }

    /// The label being searched for
    pub fn label(&self) -> &str {
        match self {
            ItemLookup::ByDescription { label, .. } => label,
            ItemLookup::ByProperty { label, .. } => label,
        }
    }
}
