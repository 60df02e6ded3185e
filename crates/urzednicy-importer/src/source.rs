//! XML record source
//!
//! The register is a root element with one child per person:
//!
//! ```xml
//! <persons>
//!   <person>
//!     <name>Jan</name>
//!     <surname>Tęczyński</surname>
//!     <date_of_death>ok. 1470</date_of_death>
//!     <stated_as lang="la">Johannes de Tanczin</stated_as>
//!     <positions>
//!       <position><office>wojewoda krakowski</office><start_date>1437</start_date></position>
//!     </positions>
//!   </person>
//! </persons>
//! ```
//!
//! The document is read into a small element tree first, then each person
//! element is mapped to a [`PersonRecord`].

use crate::error::ImporterError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use tracing::{debug, warn};
use urzednicy_domain::{BirthPlace, PersonRecord, PositionRecord, StatedAs};

#[derive(Debug, Default)]
struct Element {
    name: String,
    lang: Option<String>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, ImporterError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let lang = match start.try_get_attribute("lang")? {
            Some(attr) => Some(attr.unescape_value()?.into_owned()),
            None => None,
        };
        Ok(Self {
            name,
            lang,
            ..Self::default()
        })
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of a child, `None` when absent or empty
    fn child_text(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(|c| c.text.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}

fn parse_tree(xml: &str) -> Result<Element, ImporterError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => stack.push(Element::open(e)?),
            Event::Empty(ref e) => {
                let element = Element::open(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(ref e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ImporterError::Xml("Unbalanced closing tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        let open = &stack[stack.len() - 1].name;
        return Err(ImporterError::Xml(format!("Unclosed element <{}>", open)));
    }
    root.ok_or_else(|| ImporterError::Xml("Document has no root element".to_string()))
}

fn person_from_element(element: &Element) -> PersonRecord {
    let place_of_birth = element.child("place_of_birth").and_then(|p| {
        match (p.child_text("place"), p.child_text("prng")) {
            (Some(place), Some(prng)) => Some(BirthPlace { place, prng }),
            _ => {
                warn!("Skipping place_of_birth without place or prng");
                None
            }
        }
    });

    let stated_as = element
        .children_named("stated_as")
        .filter_map(|s| {
            let text = s.text.trim();
            match &s.lang {
                Some(lang) if !text.is_empty() => Some(StatedAs {
                    text: text.to_string(),
                    language: lang.clone(),
                }),
                Some(_) => None,
                None => {
                    warn!(text, "Skipping stated_as without lang attribute");
                    None
                }
            }
        })
        .collect();

    let positions = element
        .child("positions")
        .map(|list| {
            list.children_named("position")
                .filter_map(|p| match p.child_text("office") {
                    Some(office) => Some(PositionRecord {
                        office,
                        start_date: p.child_text("start_date"),
                        end_date: p.child_text("end_date"),
                        date: p.child_text("date"),
                    }),
                    None => {
                        warn!("Skipping position without office");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    PersonRecord {
        name: element.child_text("name"),
        surname: element.child_text("surname"),
        location: element.child_text("location"),
        coat_of_arms: element.child_text("coat_of_arms"),
        date_of_birth: element.child_text("date_of_birth"),
        date_of_death: element.child_text("date_of_death"),
        floruit: element.child_text("floruit"),
        place_of_birth,
        stated_as,
        positions,
    }
}

/// Parse person records from an XML document
pub fn parse_persons(xml: &str) -> Result<Vec<PersonRecord>, ImporterError> {
    let root = parse_tree(xml)?;
    let persons: Vec<PersonRecord> = root.children.iter().map(person_from_element).collect();
    debug!(root = %root.name, persons = persons.len(), "Parsed register");
    Ok(persons)
}

/// Read person records from an XML file
pub fn read_persons(path: impl AsRef<Path>) -> Result<Vec<PersonRecord>, ImporterError> {
    let xml = std::fs::read_to_string(path)?;
    parse_persons(&xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<persons>
  <person>
    <name>Jan Mikołaj</name>
    <surname>Tęczyński</surname>
    <location>z Tęczyna</location>
    <coat_of_arms>Topór</coat_of_arms>
    <date_of_birth>15.06.1410</date_of_birth>
    <date_of_death>ok. 1470</date_of_death>
    <place_of_birth><place>Tęczyn</place><prng>98765</prng></place_of_birth>
    <stated_as lang="la">Johannes de Tanczin</stated_as>
    <stated_as>no language</stated_as>
    <positions>
      <position>
        <office>kasztelan wojnicki</office>
        <start_date>1433</start_date>
        <end_date>1437</end_date>
      </position>
      <position><office>wojewoda krakowski</office><date>po 1437</date></position>
      <position><start_date>1440</start_date></position>
    </positions>
  </person>
  <person>
    <name>Piotr</name>
    <floruit>XV w.</floruit>
  </person>
</persons>"#;

    #[test]
    fn test_parse_full_person() {
        let persons = parse_persons(REGISTER).unwrap();
        assert_eq!(persons.len(), 2);

        let jan = &persons[0];
        assert_eq!(jan.name.as_deref(), Some("Jan Mikołaj"));
        assert_eq!(jan.surname.as_deref(), Some("Tęczyński"));
        assert_eq!(jan.location.as_deref(), Some("z Tęczyna"));
        assert_eq!(jan.date_of_death.as_deref(), Some("ok. 1470"));
        assert_eq!(
            jan.place_of_birth,
            Some(BirthPlace {
                place: "Tęczyn".to_string(),
                prng: "98765".to_string()
            })
        );
        assert_eq!(jan.stated_as.len(), 1);
        assert_eq!(jan.stated_as[0].language, "la");
        assert_eq!(jan.positions.len(), 2);
        assert_eq!(jan.positions[0].end_date.as_deref(), Some("1437"));
        assert_eq!(jan.positions[1].date.as_deref(), Some("po 1437"));
        assert_eq!(jan.positions[1].start_date, None);
    }

    #[test]
    fn test_missing_children_are_none() {
        let persons = parse_persons(REGISTER).unwrap();
        let piotr = &persons[1];
        assert_eq!(piotr.surname, None);
        assert_eq!(piotr.floruit.as_deref(), Some("XV w."));
        assert!(piotr.positions.is_empty());
        assert!(piotr.place_of_birth.is_none());
    }

    #[test]
    fn test_unescapes_entities() {
        let xml =
            "<persons><person><location>Kraków &amp; Sandomierz</location></person></persons>";
        let persons = parse_persons(xml).unwrap();
        assert_eq!(persons[0].location.as_deref(), Some("Kraków & Sandomierz"));
    }

    #[test]
    fn test_empty_root() {
        assert!(parse_persons("<persons/>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            parse_persons("<persons><person><name>Jan</surname></person></persons>"),
            Err(ImporterError::Xml(_))
        ));
        assert!(matches!(parse_persons("<persons><person>"), Err(ImporterError::Xml(_))));
    }

    #[test]
    fn test_read_persons_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persons.xml");
        std::fs::write(&path, REGISTER).unwrap();
        assert_eq!(read_persons(&path).unwrap().len(), 2);
    }
}
