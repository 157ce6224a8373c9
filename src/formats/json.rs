use log::{error, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::subtitle_model::{Cue, Metadata, ParseResult, SubtitleFormat, Word};
use crate::time_codec;

// @module: JSON cue documents

// @struct: Shape written by the serializer
#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    metadata: &'a Metadata,
    cues: &'a [Cue],
}

/// Parses a bare cue array or a `{ cues, metadata }` object.
///
/// A document that is not valid JSON yields an empty result.
pub fn parse(content: &str) -> ParseResult {
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to parse JSON subtitles: {}", e);
            return ParseResult::empty();
        }
    };

    let (items, metadata) = match &value {
        Value::Array(items) => (items.as_slice(), Metadata::default()),
        Value::Object(map) => {
            let items = map
                .get("cues")
                .and_then(Value::as_array)
                .map(|cues| cues.as_slice())
                .unwrap_or(&[]);
            let metadata = map
                .get("metadata")
                .and_then(Value::as_object)
                .map(metadata_from_object)
                .unwrap_or_default();
            (items, metadata)
        }
        _ => {
            warn!("JSON subtitles must be an array or an object, found {}", value);
            return ParseResult::empty();
        }
    };

    let cues = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item.as_object() {
            Some(object) => Some(cue_from_object(object, index)),
            None => {
                warn!("Skipping JSON cue {} that is not an object", index);
                None
            }
        })
        .collect();

    ParseResult::new(cues, metadata)
}

// Numbers are taken as ms, strings go through the time codec
fn time_value(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(number) => number.as_f64().map(time_codec::millis_from_f64),
        Value::String(text) => Some(time_codec::decode(text)),
        _ => None,
    }
}

fn string_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn metadata_from_object(object: &Map<String, Value>) -> Metadata {
    let field = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_string);
    Metadata {
        title: field("title"),
        artist: field("artist"),
        album: field("album"),
        by: field("by"),
    }
}

fn cue_from_object(object: &Map<String, Value>, index: usize) -> Cue {
    let format = SubtitleFormat::Json;
    let start = time_value(object.get("start")).unwrap_or(0);
    let end = time_value(object.get("end")).unwrap_or(start);
    let id = string_value(object.get("id")).unwrap_or_else(|| format.cue_id(index));
    let text = object.get("text").and_then(Value::as_str).unwrap_or_default();

    let mut cue = Cue::new(id, start, end, text);
    cue.words = object.get("words").and_then(Value::as_array).map(|words| {
        words
            .iter()
            .enumerate()
            .filter_map(|(j, word)| word.as_object().map(|object| word_from_object(object, index, j)))
            .collect()
    });
    cue
}

fn word_from_object(object: &Map<String, Value>, cue_index: usize, word_index: usize) -> Word {
    let id = string_value(object.get("id"))
        .unwrap_or_else(|| SubtitleFormat::Json.word_id(cue_index, word_index));
    let text = object.get("text").and_then(Value::as_str).unwrap_or_default();
    Word::new(id, text, time_value(object.get("start")), time_value(object.get("end")))
}

/// Writes `{ metadata, cues }` with two-space indentation
pub fn serialize(cues: &[Cue], metadata: Option<&Metadata>) -> String {
    let empty = Metadata::default();
    let document = JsonDocument {
        metadata: metadata.unwrap_or(&empty),
        cues,
    };

    match serde_json::to_string_pretty(&document) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize cues to JSON: {}", e);
            String::from("{}")
        }
    }
}
