use std::fs;
use std::path::Path;

use lillio_download_application::{ApplicationError, RecordSource};
use lillio_download_domain::ImageRecord;
use serde_json::{Map, Value};

#[derive(Debug, Default)]
pub struct JsonRecordSource;

impl RecordSource for JsonRecordSource {
    fn load_records(&self, path: &Path) -> Result<Vec<ImageRecord>, ApplicationError> {
        if !path.is_file() {
            return Err(ApplicationError::NotFound(format!(
                "JSON file not found at path: {}",
                path.display()
            )));
        }

        let raw =
            fs::read_to_string(path).map_err(|error| ApplicationError::Io(error.to_string()))?;
        parse_records(&raw)
    }
}

/// Decodes a JSON array of records, matching property names case-insensitively.
pub fn parse_records(raw: &str) -> Result<Vec<ImageRecord>, ApplicationError> {
    let payload: Value = serde_json::from_str(raw)
        .map_err(|error| ApplicationError::InvalidInput(format!("malformed JSON: {error}")))?;

    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Null => {
            return Err(ApplicationError::InvalidInput("JSON data is null".to_string()));
        }
        other => {
            return Err(ApplicationError::InvalidInput(format!(
                "expected a JSON array of image records, found {}",
                kind_of(&other)
            )));
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(normalize_keys(entry)).map_err(|error| {
                ApplicationError::InvalidInput(format!("record {index}: {error}"))
            })
        })
        .collect()
}

fn normalize_keys(entry: Value) -> Value {
    match entry {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key.to_ascii_lowercase(), value))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
