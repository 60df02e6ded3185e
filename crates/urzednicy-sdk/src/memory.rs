//! In-memory entity store for dry runs and testing.

use crate::error::SdkError;
use std::collections::BTreeMap;
use tracing::debug;
use urzednicy_domain::{DataValue, EntityId, EntityStore, ItemDocument, ItemLookup};

/// Entity store backed by a map
///
/// Lookups follow the same rules as [`crate::WikibaseClient`], except that
/// labels must match exactly instead of going through the search index.
/// New items receive sequential `Q` ids and the oldest match wins.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    language: String,
    next_id: u64,
    items: BTreeMap<EntityId, ItemDocument>,
    created: Vec<EntityId>,
    updated: Vec<EntityId>,
}

impl InMemoryStore {
    /// Create an empty store matching labels in `pl`
    pub fn new() -> Self {
        Self::with_language("pl")
    }

    /// Create an empty store matching labels in the given language
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            next_id: 1,
            items: BTreeMap::new(),
            created: Vec::new(),
            updated: Vec::new(),
        }
    }

    /// Insert an existing item under a fixed id
    ///
    /// Later ids are allocated above every seeded one.
    pub fn insert(&mut self, id: EntityId, document: ItemDocument) {
        if id.is_item() {
            self.next_id = self.next_id.max(id.numeric_id() + 1);
        }
        self.items.insert(id, document);
    }

    /// Document stored under an id
    pub fn get(&self, id: &EntityId) -> Option<&ItemDocument> {
        self.items.get(id)
    }

    /// All stored items
    pub fn items(&self) -> &BTreeMap<EntityId, ItemDocument> {
        &self.items
    }

    /// Ids created through [`EntityStore::create`], in order
    pub fn created(&self) -> &[EntityId] {
        &self.created
    }

    /// Ids touched through [`EntityStore::update`], in order
    pub fn updated(&self) -> &[EntityId] {
        &self.updated
    }

    fn first_value(document: &ItemDocument, property: &EntityId) -> Option<String> {
        let statement = document.statements_for(property).next()?;
        match statement.main_snak.data_value()? {
            DataValue::Item(id) => Some(id.to_string()),
            DataValue::String(s) | DataValue::Url(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn matches(&self, document: &ItemDocument, lookup: &ItemLookup) -> bool {
        if document.label(&self.language) != Some(lookup.label()) {
            return false;
        }
        match lookup {
            ItemLookup::ByDescription { description, .. } => match description.as_deref() {
                None | Some("") => true,
                Some(wanted) => document.description(&self.language) == Some(wanted),
            },
            ItemLookup::ByProperty { property, value, .. } => {
                Self::first_value(document, property).as_deref() == Some(value.as_str())
            }
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore for InMemoryStore {
    type Error = SdkError;

    fn find(&self, lookup: &ItemLookup) -> Result<Option<EntityId>, SdkError> {
        Ok(self
            .items
            .iter()
            .filter(|(_, document)| self.matches(document, lookup))
            .min_by_key(|(id, _)| id.numeric_id())
            .map(|(id, _)| id.clone()))
    }

    fn create(&mut self, document: &ItemDocument) -> Result<EntityId, SdkError> {
        let id = EntityId::item(self.next_id);
        self.next_id += 1;
        let label = document.label(&self.language).unwrap_or("");
        debug!(id = %id, label, "Created item in memory");
        self.items.insert(id.clone(), document.clone());
        self.created.push(id.clone());
        Ok(id)
    }

    fn update(&mut self, id: &EntityId, document: &ItemDocument) -> Result<(), SdkError> {
        let existing = self
            .items
            .get_mut(id)
            .ok_or_else(|| SdkError::EntityNotFound(id.to_string()))?;

        for statement in &document.statements {
            existing.add_statement_if_absent(statement.clone());
        }
        for (language, aliases) in &document.aliases {
            for alias in aliases {
                existing.add_alias(language, alias.clone());
            }
        }

        debug!(id = %id, "Updated item in memory");
        self.updated.push(id.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urzednicy_domain::{Snak, Statement};

    fn id(s: &str) -> EntityId {
        EntityId::from_string(s).unwrap()
    }

    fn labelled(label: &str, description: &str) -> ItemDocument {
        let mut doc = ItemDocument::new();
        doc.set_label("pl", label);
        doc.set_description("pl", description);
        doc
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = InMemoryStore::new();
        let first = store.create(&labelled("Jan", "imię męskie")).unwrap();
        let second = store.create(&labelled("Mikołaj", "imię męskie")).unwrap();
        assert_eq!(first, id("Q1"));
        assert_eq!(second, id("Q2"));
        assert_eq!(store.created(), &[first, second]);
    }

    #[test]
    fn test_seeded_ids_are_not_reused() {
        let mut store = InMemoryStore::new();
        store.insert(id("Q40"), labelled("Topór", "herb szlachecki"));
        assert_eq!(store.create(&labelled("Nałęcz", "herb szlachecki")).unwrap(), id("Q41"));
    }

    #[test]
    fn test_find_by_description() {
        let mut store = InMemoryStore::new();
        store.insert(id("Q5"), labelled("Jan", "imię męskie"));
        store.insert(id("Q6"), labelled("Jan", "urząd"));

        let lookup = ItemLookup::by_description("Jan", Some("urząd"));
        assert_eq!(store.find(&lookup).unwrap(), Some(id("Q6")));

        let any = ItemLookup::by_description("Jan", None);
        assert_eq!(store.find(&any).unwrap(), Some(id("Q5")));

        let empty = ItemLookup::by_description("Jan", Some(""));
        assert_eq!(store.find(&empty).unwrap(), Some(id("Q5")));

        let missing = ItemLookup::by_description("Piotr", None);
        assert_eq!(store.find(&missing).unwrap(), None);
    }

    #[test]
    fn test_find_by_property() {
        let mut store = InMemoryStore::new();
        let mut place = labelled("Kraków", "miasto");
        place.add_statement(Statement::new(Snak::string(&id("P274"), "PRNG-1")));
        store.insert(id("Q10"), place);

        let hit = ItemLookup::by_property("Kraków", &id("P274"), "PRNG-1");
        assert_eq!(store.find(&hit).unwrap(), Some(id("Q10")));

        let wrong_value = ItemLookup::by_property("Kraków", &id("P274"), "PRNG-2");
        assert_eq!(store.find(&wrong_value).unwrap(), None);

        let wrong_label = ItemLookup::by_property("Krakow", &id("P274"), "PRNG-1");
        assert_eq!(store.find(&wrong_label).unwrap(), None);
    }

    #[test]
    fn test_update_merges_without_duplicates() {
        let mut store = InMemoryStore::new();
        let mut person = labelled("Jan z Tęczyna", "wojewoda");
        person.add_statement(Statement::new(Snak::item(&id("P9"), &id("Q100"))));
        let person_id = store.create(&person).unwrap();

        let mut patch = ItemDocument::new();
        patch.add_statement(Statement::new(Snak::item(&id("P9"), &id("Q100"))));
        patch.add_statement(Statement::new(Snak::item(&id("P9"), &id("Q101"))));
        patch.add_alias("la", "Johannes de Tanczin");
        store.update(&person_id, &patch).unwrap();
        store.update(&person_id, &patch).unwrap();

        let stored = store.get(&person_id).unwrap();
        assert_eq!(stored.statements.len(), 2);
        assert_eq!(stored.aliases["la"], vec!["Johannes de Tanczin".to_string()]);
        assert_eq!(store.updated().len(), 2);
    }

    #[test]
    fn test_update_missing_item() {
        let mut store = InMemoryStore::new();
        let result = store.update(&id("Q404"), &ItemDocument::new());
        assert!(matches!(result, Err(SdkError::EntityNotFound(_))));
    }
}
