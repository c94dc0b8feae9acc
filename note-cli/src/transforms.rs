//! CLI-specific transforms
//!
//! This module defines the views the `inspect` command can print for a parsed
//! block sequence.
//!
//! - `blocks-json`: the flat block sequence, as stored
//! - `blocks-grouped`: the sequence after list merging, with list items folded
//!   into `{kind, items}` containers
//! - `markup-grouped`: markup with one container per run of list items
//!
//! ## Extra Parameters
//!
//! - `normalize-math`: "true" normalizes math in every non-code block first
//! - `rewrite-fractions`: "false" keeps `a/b` as typed while normalizing
//!
//! Example: `note inspect note.html blocks-json --extra-normalize-math`

use note_babel::blocks::Block;
use note_babel::transforms::normalize_block_math;
use note_babel::{merge_list_blocks, serialize_grouped_markup, MathOptions};
use std::collections::HashMap;

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["blocks-json", "blocks-grouped", "markup-grouped"];

/// Execute a named transform on parsed blocks with optional extra parameters
///
/// # Examples
///
/// ```ignore
/// let blocks = note_babel::parse_markup_to_blocks("<ul><li>A</li><li>B</li></ul>");
/// let output = execute_transform(&blocks, "markup-grouped", &HashMap::new())?;
/// assert_eq!(output, "<ul><li>A</li><li>B</li></ul>");
/// ```
pub fn execute_transform(
    blocks: &[Block],
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let normalized;
    let blocks = if flag(extra_params, "normalize-math")? {
        let options = MathOptions {
            rewrite_fractions: extra_params
                .get("rewrite-fractions")
                .map(|raw| parse_bool("rewrite-fractions", raw))
                .transpose()?
                .unwrap_or(true),
        };
        normalized = normalize_block_math(blocks, &options);
        normalized.as_slice()
    } else {
        blocks
    };

    match transform_name {
        "blocks-json" => serde_json::to_string_pretty(blocks)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "blocks-grouped" => serde_json::to_string_pretty(&merge_list_blocks(blocks))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "markup-grouped" => Ok(serialize_grouped_markup(blocks)),
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn flag(params: &HashMap<String, String>, key: &str) -> Result<bool, String> {
    params
        .get(key)
        .map_or(Ok(false), |raw| parse_bool(key, raw))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(format!("Invalid boolean value '{other}' for --extra-{key}")),
    }
}
