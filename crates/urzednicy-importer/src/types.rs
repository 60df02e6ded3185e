//! Result types for an import run

use std::fmt;
use urzednicy_domain::{EntityId, ItemDocument};

/// Record field that can be skipped during mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// date_of_birth
    DateOfBirth,
    /// date_of_death
    DateOfDeath,
    /// floruit
    Floruit,
    /// place_of_birth
    PlaceOfBirth,
    /// coat_of_arms
    CoatOfArms,
    /// start_date of a position
    StartDate,
    /// end_date of a position
    EndDate,
    /// date of a position
    PositionDate,
}

impl Field {
    /// Element name in the source register
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::DateOfBirth => "date_of_birth",
            Field::DateOfDeath => "date_of_death",
            Field::Floruit => "floruit",
            Field::PlaceOfBirth => "place_of_birth",
            Field::CoatOfArms => "coat_of_arms",
            Field::StartDate => "start_date",
            Field::EndDate => "end_date",
            Field::PositionDate => "date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field left out of the item, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    /// Which field
    pub field: Field,
    /// Raw text of the field
    pub value: String,
    /// Why it was skipped
    pub reason: String,
}

impl SkippedField {
    /// Create a skipped-field entry
    pub fn new(field: Field, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// The item built for one person
#[derive(Debug, Clone)]
pub struct MappedPerson {
    /// Label in the primary language
    pub label: String,
    /// Description in the primary language
    pub description: String,
    /// Labels, descriptions, aliases and statements
    pub document: ItemDocument,
    /// Fields that produced no statement
    pub skipped: Vec<SkippedField>,
}

/// What happened to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new person item was created
    Created(EntityId),
    /// An existing person item was extended
    Updated(EntityId),
    /// The record could not be imported
    Failed(String),
}

/// Per-record result
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    /// Position of the record in the source
    pub index: usize,
    /// Person label
    pub label: String,
    /// Result
    pub outcome: Outcome,
    /// Fields left out of the item
    pub skipped: Vec<SkippedField>,
}

/// Summary of an import run
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Results in source order
    pub records: Vec<RecordOutcome>,
}

impl ImportReport {
    /// Number of created person items
    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Created(_)))
    }

    /// Number of updated person items
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Updated(_)))
    }

    /// Number of failed records
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    /// Number of skipped fields across all records
    pub fn skipped_fields(&self) -> usize {
        self.records.iter().map(|r| r.skipped.len()).sum()
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(&r.outcome)).count()
    }
}
