use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow, bail};
use publabel_schema::ClusterLabeling;
use regex::Regex;
use serde_json::{Map, Value};

/// Answer wrapped in a markdown JSON code fence.
static JSON_CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(```json)(.*)(```)$").unwrap());

/// Candidate keys per field, space-separated spelling first.
const SHORT_LABEL_KEYS: &[&str] = &["short label", "short_label"];
const LONG_LABEL_KEYS: &[&str] = &["long label", "long_label"];
const WIKIPEDIA_KEYS: &[&str] = &["wikipedia page", "wikipedia_page"];

/// Turn raw completion text into a labeling record.
///
/// Models sometimes wrap the JSON in a markdown code fence and alternate
/// between space-separated and underscore key spellings; both are tolerated.
/// Anything that does not parse as a JSON object is an error, which the
/// engine treats as grounds for a fresh attempt.
pub fn parse_labeling(raw: &str) -> Result<ClusterLabeling> {
    let payload = match JSON_CODE_BLOCK.captures(raw) {
        Some(caps) => caps.get(2).map_or(raw, |m| m.as_str()),
        None => raw,
    };

    let value: Value =
        serde_json::from_str(payload).context("parse completion response as JSON")?;
    let Some(object) = value.as_object() else {
        bail!("completion response is not a JSON object");
    };

    Ok(ClusterLabeling {
        short_label: string_field(object, SHORT_LABEL_KEYS),
        long_label: string_field(object, LONG_LABEL_KEYS),
        keywords: keyword_field(object)?,
        summary: string_field(object, &["summary"]),
        wikipedia_page: string_field(object, WIKIPEDIA_KEYS),
    })
}

/// First non-empty string among the candidate keys; empty if none match.
fn string_field(object: &Map<String, Value>, keys: &[&str]) -> String {
    for key in keys {
        if let Some(text) = object.get(*key).and_then(Value::as_str)
            && !text.is_empty()
        {
            return text.to_string();
        }
    }
    String::new()
}

/// The keyword array, if present. A `keywords` value that is not an array is
/// treated as absent; an array element that is not a string is an error.
fn keyword_field(object: &Map<String, Value>) -> Result<Vec<String>> {
    let Some(items) = object.get("keywords").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("keyword {i} is not a string"))
        })
        .collect()
}
