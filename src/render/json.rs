//! JSON rendering for block streams.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::BlockStream;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a block stream to JSON.
pub fn to_json(stream: &BlockStream, format: JsonFormat) -> Result<String> {
    serialize(stream, format)
}

/// Serialize a value with the given layout.
fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
