use serde_json::Value;

/// How the request body should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Text,
    Json,
}

/// Maps a request body to the raw text handed to the pipeline.
///
/// JSON bodies contribute their `url` field; a body that does not parse as
/// JSON is used as plain text instead.
pub fn raw_input_from_body(body: &str, format: BodyFormat) -> Option<String> {
    match format {
        BodyFormat::Text => Some(body.to_string()),
        BodyFormat::Json => match serde_json::from_str::<Value>(body) {
            Ok(value) => value
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(_) => Some(body.to_string()),
        },
    }
}
