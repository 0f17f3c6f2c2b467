//! Turns raw catalog documents into [CatalogEntry] and [AbilityInfo].
//!
//! Upstream records are walked field by field. A missing or mistyped field
//! becomes an absent value in the output instead of an error, so a partially
//! populated record still produces whatever can be salvaged from it.

use serde_json::Value;

use crate::model::{AbilityInfo, CatalogEntry};

const ENGLISH: &str = "en";

/// True for documents that carry no data at all: null, `false`, zero, the
/// empty string, or an empty array or object.
pub fn is_empty_document(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

pub fn normalize_entry(raw: &Value) -> Option<CatalogEntry> {
    if is_empty_document(raw) {
        return None;
    }

    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())?;
    let number = raw
        .get("id")
        .and_then(Value::as_u64)
        .filter(|id| *id > 0)?;

    let sprites = raw.get("sprites");
    let sprite_animated = sprites
        .and_then(|s| s.pointer("/other/showdown/front_default"))
        .and_then(string_field);
    let sprite_static = sprites
        .and_then(|s| s.get("front_default"))
        .and_then(string_field);

    let types = raw
        .get("types")
        .and_then(Value::as_array)
        .map(|types| {
            types
                .iter()
                .filter_map(|wrapper| wrapper.pointer("/type/name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let cry = raw
        .get("cries")
        .and_then(|c| c.get("legacy"))
        .and_then(string_field);

    Some(CatalogEntry {
        name: capitalize_first(name),
        number,
        sprite_animated,
        sprite_static,
        types,
        cry,
        stats: passthrough(raw, "stats"),
        abilities: passthrough(raw, "abilities"),
        moves: passthrough(raw, "moves"),
    })
}

pub fn normalize_ability(raw: &Value) -> Option<AbilityInfo> {
    if is_empty_document(raw) {
        return None;
    }

    let entry = raw
        .get("effect_entries")
        .and_then(Value::as_array)?
        .iter()
        .find(|entry| {
            entry.pointer("/language/name").and_then(Value::as_str) == Some(ENGLISH)
        })?;

    let text = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Some(AbilityInfo {
        effect: text("effect"),
        short_effect: text("short_effect"),
    })
}

fn string_field(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn passthrough(raw: &Value, key: &str) -> Vec<Value> {
    raw.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Upper-cases the first character and leaves the rest as the catalog sent it.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
