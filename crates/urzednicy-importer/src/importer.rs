//! Core Importer implementation

use crate::config::ImporterConfig;
use crate::error::ImporterError;
use crate::label::label_and_description;
use crate::mapper::PersonMapper;
use crate::types::{ImportReport, MappedPerson, Outcome, RecordOutcome};
use std::fmt::Display;
use tracing::{error, info, warn};
use urzednicy_domain::{EntityStore, ItemLookup, PersonRecord};

/// The Importer writes person records into an entity store
///
/// Records are processed one at a time; each finishes, including any name,
/// coat-of-arms or office items it needs, before the next one starts.
pub struct Importer<S> {
    store: S,
    config: ImporterConfig,
}

impl<S> Importer<S>
where
    S: EntityStore,
    S::Error: Display,
{
    /// Create a new Importer
    pub fn new(store: S, config: ImporterConfig) -> Result<Self, ImporterError> {
        config.validate().map_err(ImporterError::Config)?;
        Ok(Self { store, config })
    }

    /// The configuration
    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the importer and return the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Import records, honoring the configured limit
    ///
    /// A failing record is logged and reported; the run continues.
    pub fn run(&mut self, records: &[PersonRecord]) -> ImportReport {
        let limit = self.config.limit.unwrap_or(records.len());
        info!("Importing {} of {} records", limit.min(records.len()), records.len());

        let mut report = ImportReport::default();
        for (index, record) in records.iter().take(limit).enumerate() {
            let outcome = match self.map_record(record) {
                Ok(mapped) => {
                    let skipped = mapped.skipped.clone();
                    let label = mapped.label.clone();
                    let outcome = match self.write(mapped) {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            error!(index, label = %label, "Failed to write record: {}", e);
                            Outcome::Failed(e.to_string())
                        }
                    };
                    RecordOutcome {
                        index,
                        label,
                        outcome,
                        skipped,
                    }
                }
                Err(e) => {
                    error!(index, "Failed to map record: {}", e);
                    RecordOutcome {
                        index,
                        label: label_and_description(record).0,
                        outcome: Outcome::Failed(e.to_string()),
                        skipped: Vec::new(),
                    }
                }
            };
            report.records.push(outcome);
        }

        info!(
            "Import finished: {} created, {} updated, {} failed, {} fields skipped",
            report.created(),
            report.updated(),
            report.failed(),
            report.skipped_fields()
        );
        report
    }

    /// Map a single record without writing the person item
    ///
    /// Name, coat-of-arms and office items are still resolved (and created)
    /// in the store.
    pub fn map_record(&mut self, record: &PersonRecord) -> Result<MappedPerson, ImporterError> {
        if label_and_description(record).0.is_empty() {
            return Err(ImporterError::InvalidRecord(
                "No name, surname or location to build a label from".to_string(),
            ));
        }
        PersonMapper::new(&mut self.store, &self.config).map(record)
    }

    /// Create the person item, or extend the one with the same label and description
    fn write(&mut self, mapped: MappedPerson) -> Result<Outcome, ImporterError> {
        let lookup = self.person_lookup(&mapped);
        let existing = self
            .store
            .find(&lookup)
            .map_err(|e| ImporterError::Store(e.to_string()))?;

        match existing {
            Some(id) => {
                warn!(id = %id, label = %mapped.label, "Person already exists, adding statements");
                self.store
                    .update(&id, &mapped.document)
                    .map_err(|e| ImporterError::Store(e.to_string()))?;
                Ok(Outcome::Updated(id))
            }
            None => {
                let id = self
                    .store
                    .create(&mapped.document)
                    .map_err(|e| ImporterError::Store(e.to_string()))?;
                info!(id = %id, label = %mapped.label, "Person created");
                Ok(Outcome::Created(id))
            }
        }
    }

    /// Without a description the label alone would also match the name
    /// items just resolved for the record, so only humans qualify.
    fn person_lookup(&self, mapped: &MappedPerson) -> ItemLookup {
        if mapped.description.is_empty() {
            ItemLookup::by_property(
                &mapped.label,
                &self.config.properties.instance_of,
                self.config.classes.human.as_str(),
            )
        } else {
            ItemLookup::by_description(&mapped.label, Some(mapped.description.as_str()))
        }
    }
}
