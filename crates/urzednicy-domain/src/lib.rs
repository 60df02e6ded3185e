//! Urzędnicy Domain Layer
//!
//! Core model for importing historical officials into a Wikibase instance.
//! This crate performs no I/O: it turns Polish date shorthand into Wikibase
//! time values and defines the claim, item and record types that the other
//! crates pass around.
//!
//! ## Key Concepts
//!
//! - **Date Normalizer**: `"ok. 1450"` → value `1450`, year precision, circa
//! - **Time Encoder**: `1450` → `+1450-01-01T00:00:00Z`
//! - **Statement**: main snak with qualifiers and reference groups
//! - **ItemDocument**: labels, descriptions, aliases and statements of one item
//! - **EntityStore**: the find/create boundary to the knowledge base
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Remote access lives in `urzednicy-sdk`
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod date;
pub mod item;
pub mod record;
pub mod time;
pub mod traits;

// Re-exports for convenience
pub use claim::{DataValue, EntityId, Reference, Snak, SnakValue, Statement, TimeValue};
pub use date::{normalize, DateError, NormalizedDate, Precision, QualifierKind};
pub use item::{ItemDocument, ItemLookup};
pub use record::{BirthPlace, PersonRecord, PositionRecord, StatedAs};
pub use time::{encode, EncodedTime};
pub use traits::EntityStore;
