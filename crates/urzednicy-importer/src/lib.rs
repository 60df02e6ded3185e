//! Urzędnicy Importer
//!
//! Reads the XML register of officials and writes one Wikibase item per
//! person through an [`urzednicy_domain::EntityStore`].
//!
//! # Architecture
//!
//! ```text
//! XML → source → PersonRecord → PersonMapper → ItemDocument → EntityStore
//!                                    │
//!                          normalize / encode dates
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use urzednicy_importer::{read_persons, Importer, ImporterConfig};
//! use urzednicy_sdk::InMemoryStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let records = read_persons("data/persons.xml")?;
//! let mut importer = Importer::new(InMemoryStore::new(), ImporterConfig::default())?;
//!
//! let report = importer.run(&records);
//! println!("Created: {}, failed: {}", report.created(), report.failed());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod importer;
mod label;
mod mapper;
mod source;
mod types;

#[cfg(test)]
mod tests;

pub use config::{Classes, ImporterConfig, Properties, SourceReference};
pub use error::ImporterError;
pub use importer::Importer;
pub use label::label_and_description;
pub use mapper::{
    date_statement, position_qualifiers, register_reference, url_reference, DateSkip, PersonMapper,
};
pub use source::{parse_persons, read_persons};
pub use types::{Field, ImportReport, MappedPerson, Outcome, RecordOutcome, SkippedField};
