//! HTML-like markup format
//!
//! Converts between the markup the editor emits and the block sequence.
//!
//! # Library Choice
//!
//! Parsing uses `html5ever` + `markup5ever_rcdom`: a browser-grade tree builder that
//! accepts malformed input the way a browser does, which is what the editor's markup
//! was produced against. Serialization does not go through the DOM, since fragments
//! are fixed templates with verbatim content.
//!
//! # Element Mapping Table
//!
//! | Block kind         | Import from                   | Export to                                   |
//! |--------------------|-------------------------------|---------------------------------------------|
//! | heading1/2/3       | `<h1>`/`<h2>`/`<h3>`          | `<hN>content</hN>`                          |
//! | code               | `<pre>` (inner `<code>` text) | `<pre><code>content</code></pre>`           |
//! | quote              | `<blockquote>`                | `<blockquote>content</blockquote>`          |
//! | divider            | `<hr>`                        | `<hr/>`                                     |
//! | bulletListItem     | each child of `<ul>`          | `<ul><li>content</li></ul>`                 |
//! | numberedListItem   | each child of `<ol>`          | `<ol><li>content</li></ol>`                 |
//! | todo               | never derived                 | `<div class="todo">` with checkbox          |
//! | callout            | never derived                 | `<div class="callout">content</div>`        |
//! | toggle             | never derived                 | `<details>` + `<summary>`                   |
//! | paragraph          | `<p>`, other elements, text   | `<p>content</p>`                            |
//!
//! # Lossy Conversions
//!
//! - List items export as single-item containers; re-import yields the same items,
//!   but grouping only comes back through the `group-lists` option.
//! - todo, callout and toggle import as paragraphs.
//! - Inline markup inside a block is flattened to its text.

pub mod parser;
pub mod serializer;

pub use serializer::HtmlOptions;

use crate::blocks::Block;
use crate::error::FormatError;
use crate::format::Format;
use std::collections::HashMap;

/// Format implementation for HTML-like markup
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Markup format that groups consecutive list items on export
    pub fn with_grouped_lists() -> Self {
        Self::new(HtmlOptions::grouped())
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML-like block markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Vec<Block>, FormatError> {
        Ok(parser::parse_markup(source))
    }

    fn serialize(&self, blocks: &[Block]) -> Result<String, FormatError> {
        Ok(serializer::serialize_with_options(blocks, self.options))
    }

    fn serialize_with_options(
        &self,
        blocks: &[Block],
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut html_options = self.options;
        if let Some(value) = options.get("group-lists") {
            html_options.group_lists = parse_flag("group-lists", value)?;
        }
        Ok(serializer::serialize_with_options(blocks, html_options))
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, FormatError> {
    match value {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(FormatError::SerializationError(format!(
            "Invalid value '{other}' for '{key}', expected true or false"
        ))),
    }
}
