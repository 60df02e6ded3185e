//! Label and description of a person item
//!
//! The label is `name surname location`. The description is a life-span
//! prefix followed by the offices held, e.g. `(1410-1470) kasztelan wojnicki,
//! wojewoda krakowski`.

use urzednicy_domain::PersonRecord;

/// Hyphenated dates (`1409-1410`) keep only their last four characters
fn short_year(date: &str) -> &str {
    if date.contains('-') && date.len() >= 4 {
        let start = date.len() - 4;
        date.get(start..).unwrap_or(date)
    } else {
        date
    }
}

fn life_span(record: &PersonRecord) -> String {
    let birth = record.date_of_birth.as_deref().map(short_year);
    let death = record.date_of_death.as_deref().map(short_year);

    match (birth, death) {
        (Some(birth), Some(death)) => format!("({}-{}) ", birth, death),
        (Some(birth), None) => format!("(ur. {}) ", birth),
        (None, Some(death)) => format!("(zm. {}) ", death),
        (None, None) => match &record.floruit {
            Some(floruit) => format!("({}) ", floruit),
            None => String::new(),
        },
    }
}

/// Build the label and description of a person
pub fn label_and_description(record: &PersonRecord) -> (String, String) {
    let label = [&record.name, &record.surname, &record.location]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    let offices = record
        .positions
        .iter()
        .map(|p| p.office.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let description = format!("{}{}", life_span(record), offices);

    (label.trim().to_string(), description.trim().to_string())
}
