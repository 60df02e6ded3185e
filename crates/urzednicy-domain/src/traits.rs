//! Trait definitions for external interactions
//!
//! These traits define the boundary between the mapping logic and the
//! knowledge base. Implementations live in `urzednicy-sdk`.

use crate::{EntityId, ItemDocument, ItemLookup};

/// Trait for finding and writing items in a knowledge base
///
/// Lookups are check-then-act: callers assume exclusive write access for the
/// duration of a run.
pub trait EntityStore {
    /// Error type for store operations
    type Error;

    /// Find an existing item matching the lookup
    fn find(&self, lookup: &ItemLookup) -> Result<Option<EntityId>, Self::Error>;

    /// Create a new item and return its id
    fn create(&mut self, document: &ItemDocument) -> Result<EntityId, Self::Error>;

    /// Add the document's statements and aliases to an existing item
    fn update(&mut self, id: &EntityId, document: &ItemDocument) -> Result<(), Self::Error>;

    /// Find an item or create it from the document
    fn find_or_create(
        &mut self,
        lookup: &ItemLookup,
        document: &ItemDocument,
    ) -> Result<EntityId, Self::Error> {
        match self.find(lookup)? {
            Some(id) => Ok(id),
            None => self.create(document),
        }
    }
}
