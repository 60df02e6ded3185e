//! Record-to-claims mapping
//!
//! Date fields go through [`normalize`] and [`urzednicy_domain::encode`] and become time
//! statements or qualifiers. Name, coat-of-arms and office values are
//! resolved to items through an [`EntityStore`], creating the item when the
//! store has none.

use crate::config::{ImporterConfig, Properties, SourceReference};
use crate::error::ImporterError;
use crate::label::label_and_description;
use crate::types::{Field, MappedPerson, SkippedField};
use std::fmt::Display;
use tracing::{debug, warn};
use urzednicy_domain::{
    normalize, EntityId, EntityStore, ItemDocument, ItemLookup, PersonRecord, PositionRecord,
    QualifierKind, Reference, Snak, Statement,
};

/// Why a date field produced nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSkip {
    /// The text could not be normalized
    Invalid(String),
    /// The normalized value has no time encoding
    Unencodable(String),
}

impl DateSkip {
    fn into_skipped(self, field: Field, raw: &str) -> SkippedField {
        match self {
            DateSkip::Invalid(reason) => SkippedField::new(field, raw, reason),
            DateSkip::Unencodable(value) => {
                SkippedField::new(field, raw, format!("No time value for '{}'", value))
            }
        }
    }
}

/// Build the statement for a person's date field
///
/// `field` must be one of [`Field::DateOfBirth`], [`Field::DateOfDeath`] or
/// [`Field::Floruit`].
pub fn date_statement(
    field: Field,
    property: &EntityId,
    raw: &str,
    properties: &Properties,
) -> Result<Statement, DateSkip> {
    let date = normalize(raw).map_err(|e| DateSkip::Invalid(e.to_string()))?;
    let time = date
        .encode()
        .ok_or_else(|| DateSkip::Unencodable(date.numeric_value.clone()))?;
    let precision = date.precision;

    let statement = match date.qualifier {
        // Only death dates turn "ok." into an unknown value with the date in a
        // circa qualifier. Birth and floruit assert the date directly.
        QualifierKind::Circa if field == Field::DateOfDeath => {
            Statement::new(Snak::some_value(property))
                .with_qualifier(Snak::time(&properties.circa, time, precision))
        }
        QualifierKind::After => Statement::new(Snak::time(property, time.clone(), precision))
            .with_qualifier(Snak::time(&properties.after, time, precision)),
        QualifierKind::Before => Statement::new(Snak::time(property, time.clone(), precision))
            .with_qualifier(Snak::time(&properties.before, time, precision)),
        QualifierKind::Circa | QualifierKind::None => {
            Statement::new(Snak::time(property, time, precision))
        }
    };
    Ok(statement)
}

/// Time qualifiers of a position: start, end and point in time
///
/// `po`/`przed` dates append an after/before qualifier carrying the same time
/// after the slot qualifier.
/// Dates that cannot be used are returned as skipped fields.
pub fn position_qualifiers(
    position: &PositionRecord,
    properties: &Properties,
) -> (Vec<Snak>, Vec<SkippedField>) {
    let mut qualifiers = Vec::new();
    let mut skipped = Vec::new();

    let slots = [
        (Field::StartDate, &position.start_date, &properties.start_time),
        (Field::EndDate, &position.end_date, &properties.end_time),
        (Field::PositionDate, &position.date, &properties.point_in_time),
    ];

    for (field, raw, property) in slots {
        let Some(raw) = raw.as_deref() else {
            continue;
        };

        let date = match normalize(raw) {
            Ok(date) => date,
            Err(e) => {
                warn!(office = %position.office, field = %field, "{}", e);
                skipped.push(SkippedField::new(field, raw, e.to_string()));
                continue;
            }
        };
        let Some(time) = date.encode() else {
            let skip = DateSkip::Unencodable(date.numeric_value.clone());
            skipped.push(skip.into_skipped(field, raw));
            continue;
        };

        qualifiers.push(Snak::time(property, time.clone(), date.precision));
        match date.qualifier {
            QualifierKind::After => {
                qualifiers.push(Snak::time(&properties.after, time, date.precision))
            }
            QualifierKind::Before => {
                qualifiers.push(Snak::time(&properties.before, time, date.precision))
            }
            QualifierKind::Circa | QualifierKind::None => {}
        }
    }

    (qualifiers, skipped)
}

/// Citation of the printed register: book, volume and notebook
pub fn register_reference(source: &SourceReference, properties: &Properties) -> Reference {
    Reference::new(vec![
        Snak::item(&properties.stated_in, &source.book),
        Snak::string(&properties.volume, &source.volume),
        Snak::string(&properties.notebook, &source.notebook),
    ])
}

/// Citation of the online edition
pub fn url_reference(source: &SourceReference, properties: &Properties) -> Reference {
    Reference::new(vec![Snak::url(&properties.reference_url, &source.url)])
}

/// Descriptions of items created on the fly, in Polish and English
#[derive(Debug, Clone, Copy)]
struct Terms {
    pl: &'static str,
    en: &'static str,
}

const GIVEN_NAME: Terms = Terms {
    pl: "imię męskie",
    en: "male given name",
};
const FAMILY_NAME: Terms = Terms {
    pl: "nazwisko",
    en: "family name",
};
const COAT_OF_ARMS: Terms = Terms {
    pl: "herb szlachecki",
    en: "coat of arms",
};
const POSITION: Terms = Terms {
    pl: "urząd",
    en: "position",
};

fn store_error(e: impl Display) -> ImporterError {
    ImporterError::Store(e.to_string())
}

/// Maps person records to item documents, resolving related items
pub struct PersonMapper<'a, S> {
    store: &'a mut S,
    config: &'a ImporterConfig,
}

impl<'a, S> PersonMapper<'a, S>
where
    S: EntityStore,
    S::Error: Display,
{
    /// Create a mapper over a store
    pub fn new(store: &'a mut S, config: &'a ImporterConfig) -> Self {
        Self { store, config }
    }

    /// Build the person item for a record
    ///
    /// Store failures abort the record; unusable fields are skipped and
    /// reported.
    pub fn map(&mut self, record: &PersonRecord) -> Result<MappedPerson, ImporterError> {
        let config = self.config;
        let properties = &config.properties;
        let (label, description) = label_and_description(record);

        let mut document = ItemDocument::new();
        for language in &config.languages {
            document.set_label(language, &label);
            if !description.is_empty() {
                document.set_description(language, &description);
            }
        }
        let human = Snak::item(&properties.instance_of, &config.classes.human);
        document.add_statement(Statement::new(human));

        let mut skipped = Vec::new();

        for name in record.given_names() {
            let id = self.resolve_named(name, &config.classes.given_name, GIVEN_NAME)?;
            let given_name = Snak::item(&properties.given_name, &id);
            document.add_statement_if_absent(Statement::new(given_name));
        }

        if let Some(surname) = &record.surname {
            let id = self.resolve_named(surname, &config.classes.family_name, FAMILY_NAME)?;
            document.add_statement(Statement::new(Snak::item(&properties.family_name, &id)));
        }

        if let Some(location) = &record.location {
            document.add_statement(Statement::new(Snak::string(&properties.called, location)));
        }

        if let Some(coat_of_arms) = &record.coat_of_arms {
            if coat_of_arms.contains(config.unknown_coat_of_arms.as_str()) {
                skipped.push(SkippedField::new(
                    Field::CoatOfArms,
                    coat_of_arms,
                    "Coat of arms is unknown",
                ));
            } else {
                let id =
                    self.resolve_named(coat_of_arms, &config.classes.coat_of_arms, COAT_OF_ARMS)?;
                document.add_statement(Statement::new(Snak::item(&properties.coat_of_arms, &id)));
            }
        }

        let dates = [
            (Field::DateOfBirth, &record.date_of_birth, &properties.date_of_birth),
            (Field::DateOfDeath, &record.date_of_death, &properties.date_of_death),
            (Field::Floruit, &record.floruit, &properties.floruit),
        ];
        for (field, raw, property) in dates {
            let Some(raw) = raw.as_deref() else {
                continue;
            };
            match date_statement(field, property, raw, properties) {
                Ok(statement) => document.add_statement(statement),
                Err(skip) => {
                    warn!(label = %label, field = %field, raw, "Skipping date: {:?}", skip);
                    skipped.push(skip.into_skipped(field, raw));
                }
            }
        }

        if let Some(place) = &record.place_of_birth {
            let lookup = ItemLookup::by_property(&place.place, &properties.prng, &place.prng);
            match self.store.find(&lookup).map_err(store_error)? {
                Some(id) => {
                    let place_of_birth = Snak::item(&properties.place_of_birth, &id);
                    document.add_statement(Statement::new(place_of_birth))
                }
                None => {
                    warn!(
                        label = %label,
                        place = %place.place,
                        prng = %place.prng,
                        "Place of birth not found"
                    );
                    skipped.push(SkippedField::new(
                        Field::PlaceOfBirth,
                        &place.place,
                        format!("No item with PRNG {}", place.prng),
                    ));
                }
            }
        }

        for stated_as in &record.stated_as {
            let text =
                Snak::monolingual(&properties.stated_as, &stated_as.text, &stated_as.language);
            document.add_statement(
                Statement::new(text).with_reference(url_reference(&config.source, properties)),
            );
            document.add_alias(&stated_as.language, &stated_as.text);
        }

        for position in &record.positions {
            let office = self.resolve_office(&position.office)?;
            let (qualifiers, position_skipped) = position_qualifiers(position, properties);
            skipped.extend(position_skipped);

            document.add_statement(
                Statement::new(Snak::item(&properties.position_held, &office))
                    .with_qualifiers(qualifiers)
                    .with_reference(register_reference(&config.source, properties))
                    .with_reference(url_reference(&config.source, properties)),
            );
        }

        debug!(
            label = %label,
            statements = document.statements.len(),
            skipped = skipped.len(),
            "Mapped record"
        );
        Ok(MappedPerson {
            label,
            description,
            document,
            skipped,
        })
    }

    /// Given name, family name or coat of arms: matched by label and class
    fn resolve_named(
        &mut self,
        label: &str,
        class: &EntityId,
        terms: Terms,
    ) -> Result<EntityId, ImporterError> {
        let instance_of = &self.config.properties.instance_of;
        let lookup = ItemLookup::by_property(label, instance_of, class.as_str());
        let document = self.new_item(label, terms, class);
        self.store.find_or_create(&lookup, &document).map_err(store_error)
    }

    /// Offices match on label alone
    fn resolve_office(&mut self, office: &str) -> Result<EntityId, ImporterError> {
        let lookup = ItemLookup::by_description(office, None);
        let config = self.config;
        let document = self.new_item(office, POSITION, &config.classes.position);
        self.store.find_or_create(&lookup, &document).map_err(store_error)
    }

    fn new_item(&self, label: &str, terms: Terms, class: &EntityId) -> ItemDocument {
        let mut document = ItemDocument::new();
        for language in &self.config.languages {
            document.set_label(language, label);
            match language.as_str() {
                "pl" => document.set_description(language, terms.pl),
                "en" => document.set_description(language, terms.en),
                _ => {}
            }
        }
        let instance_of = Snak::item(&self.config.properties.instance_of, class);
        document.add_statement(Statement::new(instance_of));
        document
    }
}
