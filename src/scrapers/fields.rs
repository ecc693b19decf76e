//! Tolerant field extraction for the Työmarkkinatori search API.
//!
//! The response schema drifts between deployments, so every field is read
//! through an ordered list of candidate keys. The first key holding a usable
//! value wins.

use crate::models::SourceId;
use crate::scrapers::types::RawListing;
use serde_json::{Map, Value};

/// Keys that may wrap the result list, in priority order
pub const LIST_WRAPPER_KEYS: &[&str] = &[
    "jobs",
    "results",
    "items",
    "hits",
    "ilmoitukset",
    "content",
    "data",
];

/// Candidate keys per field, in priority order
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub title: &'static [&'static str],
    pub company: &'static [&'static str],
    pub location: &'static [&'static str],
    /// Keys tried inside a location object
    pub location_name: &'static [&'static str],
    pub url: &'static [&'static str],
    pub id: &'static [&'static str],
}

pub const API_FIELD_RULES: FieldRules = FieldRules {
    title: &["title", "otsikko", "tehtavanimike", "jobTitle", "name"],
    company: &[
        "company",
        "companyName",
        "employer",
        "tyonantaja",
        "tyonantajanNimi",
        "organization",
    ],
    location: &["location", "city", "kunta", "sijainti", "municipality", "locations"],
    location_name: &["displayName", "name", "locality", "city", "municipality", "nimi"],
    url: &["url", "link", "applyUrl", "href"],
    id: &["id", "ilmoitusnumero", "jobId", "ilmoitusId"],
};

/// Locate the list of records in a response body.
///
/// Accepts a bare list, or an object with the list under one of
/// [`LIST_WRAPPER_KEYS`], optionally nested one level deeper.
pub fn extract_records(body: &Value) -> Option<&Vec<Value>> {
    find_list(body, 2)
}

fn find_list(value: &Value, depth: u8) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(obj) if depth > 0 => LIST_WRAPPER_KEYS
            .iter()
            .filter_map(|key| obj.get(*key))
            .find_map(|inner| match inner {
                Value::Array(items) => Some(items),
                Value::Object(_) => find_list(inner, depth - 1),
                _ => None,
            }),
        _ => None,
    }
}

/// Map one API record onto a raw listing. Returns `None` when the record has
/// no usable title or no way to build a link.
pub fn extract_listing(
    record: &Value,
    rules: &FieldRules,
    detail_url_base: &str,
) -> Option<RawListing> {
    let obj = record.as_object()?;

    let title = first_text(obj, rules.title)?;
    let company = first_text(obj, rules.company);
    let location = first_location(obj, rules);
    let url = first_text(obj, rules.url).or_else(|| {
        first_text(obj, rules.id)
            .map(|id| format!("{}/{}", detail_url_base.trim_end_matches('/'), id))
    })?;

    Some(RawListing {
        source_id: SourceId::ApiSource,
        title,
        company,
        location,
        url,
    })
}

fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|key| obj.get(*key)).find_map(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn first_location(obj: &Map<String, Value>, rules: &FieldRules) -> Option<String> {
    rules
        .location
        .iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| location_text(value, rules))
}

fn location_text(value: &Value, rules: &FieldRules) -> Option<String> {
    match value {
        Value::Object(inner) => first_text(inner, rules.location_name),
        Value::Array(items) => {
            let names: Vec<String> = items
                .iter()
                .filter_map(|item| location_text(item, rules))
                .collect();
            (!names.is_empty()).then(|| names.join(", "))
        }
        other => scalar_text(other),
    }
}
