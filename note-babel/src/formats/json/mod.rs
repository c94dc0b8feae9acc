//! JSON block format
//!
//! Blocks as a JSON array, using the wire names of the block model:
//!
//! ```json
//! [{ "id": 1, "kind": "todo", "content": "ship", "properties": { "checked": true } }]
//! ```
//!
//! Unknown `kind` names import as paragraphs instead of failing the whole document.

use crate::blocks::Block;
use crate::error::FormatError;
use crate::format::Format;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Block sequence as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Vec<Block>, FormatError> {
        serde_json::from_str(source)
            .map_err(|e| FormatError::ParseError(format!("Invalid block JSON: {e}")))
    }

    fn serialize(&self, blocks: &[Block]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(blocks)
            .map_err(|e| FormatError::SerializationError(format!("JSON serialization failed: {e}")))
    }
}
