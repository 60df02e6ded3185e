//! Wikibase JSON wire format
//!
//! Converts domain documents into the entity JSON accepted by `wbeditentity`
//! and parses the responses of `wbgetentities`, `wbsearchentities` and
//! `wbeditentity`.

use crate::error::SdkError;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use urzednicy_domain::{
    DataValue, EntityId, ItemDocument, ItemLookup, Reference, Snak, SnakValue, Statement,
};

/// Calendar model of every time value (proleptic Gregorian)
pub const CALENDAR_MODEL: &str = "http://www.wikidata.org/entity/Q1985727";

/// Convert a data value to its `datavalue` object
pub fn datavalue_to_json(value: &DataValue) -> Value {
    match value {
        DataValue::Item(id) => json!({
            "value": {
                "entity-type": "item",
                "numeric-id": id.numeric_id(),
                "id": id.as_str(),
            },
            "type": "wikibase-entityid",
        }),
        DataValue::String(s) | DataValue::Url(s) => json!({
            "value": s,
            "type": "string",
        }),
        DataValue::Monolingual { text, language } => json!({
            "value": { "text": text, "language": language },
            "type": "monolingualtext",
        }),
        DataValue::Time(time) => json!({
            "value": {
                "time": time.time.as_str(),
                "timezone": 0,
                "before": 0,
                "after": 0,
                "precision": time.precision.code(),
                "calendarmodel": CALENDAR_MODEL,
            },
            "type": "time",
        }),
    }
}

/// Convert a snak to JSON
pub fn snak_to_json(snak: &Snak) -> Value {
    match &snak.value {
        SnakValue::Value(value) => json!({
            "snaktype": "value",
            "property": snak.property.as_str(),
            "datavalue": datavalue_to_json(value),
            "datatype": value.datatype(),
        }),
        SnakValue::SomeValue => json!({
            "snaktype": "somevalue",
            "property": snak.property.as_str(),
        }),
    }
}

/// Group snaks by property, keeping first-seen property order
fn snak_group(snaks: &[Snak]) -> (Value, Value) {
    let mut grouped: Map<String, Value> = Map::new();
    let mut order: Vec<Value> = Vec::new();

    for snak in snaks {
        let key = snak.property.as_str().to_string();
        if !grouped.contains_key(&key) {
            order.push(Value::String(key.clone()));
            grouped.insert(key.clone(), Value::Array(Vec::new()));
        }
        if let Some(Value::Array(list)) = grouped.get_mut(&key) {
            list.push(snak_to_json(snak));
        }
    }

    (Value::Object(grouped), Value::Array(order))
}

fn reference_to_json(reference: &Reference) -> Value {
    let (snaks, order) = snak_group(&reference.snaks);
    json!({ "snaks": snaks, "snaks-order": order })
}

/// Convert a statement to JSON
pub fn statement_to_json(statement: &Statement) -> Value {
    let mut object = json!({
        "mainsnak": snak_to_json(&statement.main_snak),
        "type": "statement",
        "rank": "normal",
    });

    if !statement.qualifiers.is_empty() {
        let (qualifiers, order) = snak_group(&statement.qualifiers);
        object["qualifiers"] = qualifiers;
        object["qualifiers-order"] = order;
    }

    if !statement.references.is_empty() {
        object["references"] =
            Value::Array(statement.references.iter().map(reference_to_json).collect());
    }

    object
}

fn term_map(terms: &BTreeMap<String, String>) -> Value {
    let map: Map<String, Value> = terms
        .iter()
        .map(|(language, value)| {
            let term = json!({ "language": language, "value": value });
            (language.clone(), term)
        })
        .collect();
    Value::Object(map)
}

fn alias_map(aliases: &BTreeMap<String, Vec<String>>, add: bool) -> Value {
    let map: Map<String, Value> = aliases
        .iter()
        .map(|(language, values)| {
            let entries = values
                .iter()
                .map(|value| {
                    let mut entry = json!({ "language": language, "value": value });
                    if add {
                        entry["add"] = Value::String(String::new());
                    }
                    entry
                })
                .collect();
            (language.clone(), Value::Array(entries))
        })
        .collect();
    Value::Object(map)
}

/// Entity JSON for creating a new item
pub fn item_to_json(document: &ItemDocument) -> Value {
    json!({
        "labels": term_map(&document.labels),
        "descriptions": term_map(&document.descriptions),
        "aliases": alias_map(&document.aliases, false),
        "claims": document.statements.iter().map(statement_to_json).collect::<Vec<_>>(),
    })
}

/// Entity JSON for extending an existing item
///
/// Labels and descriptions are left untouched; aliases are appended.
pub fn item_update_json(
    statements: &[&Statement],
    aliases: &BTreeMap<String, Vec<String>>,
) -> Value {
    let mut object = json!({
        "claims": statements.iter().map(|s| statement_to_json(s)).collect::<Vec<_>>(),
    });
    if !aliases.is_empty() {
        object["aliases"] = alias_map(aliases, true);
    }
    object
}

/// Fail with the API error carried by a response, if any
pub fn check_api_error(response: &Value) -> Result<(), SdkError> {
    match response.get("error") {
        Some(error) => Err(SdkError::ApiError {
            code: error["code"].as_str().unwrap_or("unknown").to_string(),
            info: error["info"].as_str().unwrap_or_default().to_string(),
        }),
        None => Ok(()),
    }
}

/// Ids returned by `wbsearchentities`
pub fn parse_search(response: &Value) -> Result<Vec<EntityId>, SdkError> {
    check_api_error(response)?;
    let hits = response["search"]
        .as_array()
        .ok_or_else(|| SdkError::InvalidResponse("Missing 'search' array".to_string()))?;

    Ok(hits
        .iter()
        .filter_map(|hit| hit["id"].as_str())
        .filter_map(|id| EntityId::from_string(id).ok())
        .collect())
}

/// Id of the entity returned by `wbeditentity`
pub fn parse_edit(response: &Value) -> Result<EntityId, SdkError> {
    check_api_error(response)?;
    let id = response["entity"]["id"]
        .as_str()
        .ok_or_else(|| SdkError::InvalidResponse("Missing 'entity.id'".to_string()))?;
    EntityId::from_string(id).map_err(SdkError::InvalidResponse)
}

/// Snapshots returned by `wbgetentities`
pub fn parse_entities(response: &Value) -> Result<Vec<EntitySnapshot>, SdkError> {
    check_api_error(response)?;
    let entities = response["entities"]
        .as_object()
        .ok_or_else(|| SdkError::InvalidResponse("Missing 'entities' object".to_string()))?;

    entities
        .iter()
        .map(|(id, entity)| {
            if entity.get("missing").is_some() {
                return Err(SdkError::EntityNotFound(id.clone()));
            }
            EntitySnapshot::from_json(entity)
        })
        .collect()
}

/// Comparable key of a `datavalue` object
fn value_key(datavalue: &Value) -> Option<String> {
    let value = &datavalue["value"];
    match datavalue["type"].as_str()? {
        "wikibase-entityid" => value["id"].as_str().map(str::to_string),
        "string" => value.as_str().map(str::to_string),
        "monolingualtext" => Some(format!(
            "{}:{}",
            value["language"].as_str()?,
            value["text"].as_str()?
        )),
        "time" => Some(format!("{}/{}", value["time"].as_str()?, value["precision"].as_u64()?)),
        _ => None,
    }
}

fn main_snak_key(snak: &Value) -> Option<String> {
    let snaktype = snak["snaktype"].as_str()?;
    if snaktype == "value" {
        value_key(&snak["datavalue"])
    } else {
        Some(snaktype.to_string())
    }
}

/// Read-only view of an existing entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    /// Entity id
    pub id: EntityId,
    labels: BTreeMap<String, String>,
    descriptions: BTreeMap<String, String>,
    main_snaks: BTreeMap<String, Vec<Value>>,
}

impl EntitySnapshot {
    /// Parse one entity object from `wbgetentities`
    pub fn from_json(entity: &Value) -> Result<Self, SdkError> {
        let id = entity["id"]
            .as_str()
            .ok_or_else(|| SdkError::InvalidResponse("Entity without 'id'".to_string()))?;
        let id = EntityId::from_string(id).map_err(SdkError::InvalidResponse)?;

        let terms = |key: &str| -> BTreeMap<String, String> {
            entity[key]
                .as_object()
                .map(|map| {
                    map.iter()
                        .filter_map(|(lang, term)| {
                            Some((lang.clone(), term["value"].as_str()?.to_string()))
                        })
                        .collect()
                })
                .unwrap_or_default()
        };

        let main_snaks: BTreeMap<String, Vec<Value>> = entity["claims"]
            .as_object()
            .map(|claims| {
                claims
                    .iter()
                    .map(|(property, statements)| {
                        let snaks: Vec<Value> = statements
                            .as_array()
                            .map(|list| list.iter().map(|s| s["mainsnak"].clone()).collect())
                            .unwrap_or_default();
                        (property.clone(), snaks)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            id,
            labels: terms("labels"),
            descriptions: terms("descriptions"),
            main_snaks,
        })
    }

    /// Label in a language
    pub fn label(&self, language: &str) -> Option<&str> {
        self.labels.get(language).map(String::as_str)
    }

    /// Description in a language
    pub fn description(&self, language: &str) -> Option<&str> {
        self.descriptions.get(language).map(String::as_str)
    }

    /// Value of the first statement for a property: an item id or a string
    pub fn first_value(&self, property: &EntityId) -> Option<String> {
        let snak = self.main_snaks.get(property.as_str())?.first()?;
        let datavalue = &snak["datavalue"];
        match datavalue["type"].as_str()? {
            "wikibase-entityid" => datavalue["value"]["id"].as_str().map(str::to_string),
            "string" => datavalue["value"].as_str().map(str::to_string),
            _ => None,
        }
    }

    /// Whether a statement with an equivalent main snak already exists
    pub fn has_main_snak(&self, snak: &Snak) -> bool {
        let Some(existing) = self.main_snaks.get(snak.property.as_str()) else {
            return false;
        };
        let wanted = main_snak_key(&snak_to_json(snak));
        wanted.is_some() && existing.iter().any(|s| main_snak_key(s) == wanted)
    }
}

/// First snapshot satisfying a lookup, in search order
///
/// The label must equal the wanted one exactly; search hits that merely
/// start with it are ignored. A missing or empty description accepts any
/// description.
pub fn select_match(
    lookup: &ItemLookup,
    snapshots: &[EntitySnapshot],
    language: &str,
) -> Option<EntityId> {
    snapshots
        .iter()
        .filter(|entity| entity.label(language) == Some(lookup.label()))
        .find(|entity| match lookup {
            ItemLookup::ByDescription { description, .. } => {
                match description.as_deref().filter(|d| !d.is_empty()) {
                    Some(wanted) => entity.description(language) == Some(wanted),
                    None => true,
                }
            }
            ItemLookup::ByProperty {
                property, value, ..
            } => entity.first_value(property).as_deref() == Some(value.as_str()),
        })
        .map(|entity| entity.id.clone())
}
