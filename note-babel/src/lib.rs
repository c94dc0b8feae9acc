//! Block conversion and math normalization for note documents
//!
//!     A note is a flat, ordered sequence of typed blocks (paragraph, heading, list item, todo,
//!     ...). This crate converts between that block sequence and markup, and normalizes the
//!     informal math people type into notes before it is rendered.
//!
//!     This is a pure lib: it powers note-cli but is shell agnostic, so no code here prints,
//!     reads env vars or touches the filesystem.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── blocks                  # Block model and the editable BlockDocument
//!     ├── common
//!     │   └── list_merge.rs       # Folding list item runs into containers
//!     ├── formats
//!     │   ├── html                # markup <-> blocks
//!     │   └── json                # blocks as stored
//!     ├── math                    # Math detection and normalization
//!     ├── transforms.rs           # Block-level pipelines built from the above
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── html/
//!     ├── math/
//!     └── blocks/
//!
//!     Rust does not discover tests in subdirectories, so tests/lib.rs includes them as modules.
//!
//! Core Algorithms
//!
//!     Parsing walks only the top-level children of the markup body: each one maps to zero or
//!     more blocks, lists expand to one block per item, and nothing is ever nested. Serializing
//!     is the reverse, one template per block kind, with list items emitted as single-item
//!     containers unless grouping is asked for (see ./common/list_merge.rs).
//!
//!     The round trip is deliberately lossy: todos, toggles, callouts and dividers serialize to
//!     markup that parses back as paragraphs (or nothing). The json format is the lossless one.
//!
//!     Math normalization is a line-oriented state machine (see ./math/mod.rs) that leaves code,
//!     preformatted regions and display math alone and applies an ordered set of rewrite rules
//!     to everything else, never touching text already inside `$...$`.
//!
pub mod blocks;
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod math;
pub mod registry;
pub mod transforms;

pub use blocks::{Block, BlockDocument, BlockId, BlockKind};
pub use common::list_merge::{ListGroup, ListGroupKind, MergedBlock};
pub use error::FormatError;
pub use format::Format;
pub use math::{
    clean_math_delimiters, detect_math_content, normalize_math_content,
    normalize_math_content_with, normalize_math_delimiters, process_math_in_content,
    process_math_in_content_with, MathOptions,
};
pub use registry::FormatRegistry;

/// Parse markup into a flat block sequence.
///
/// Never fails and never returns an empty vector: input without any block-producing
/// content yields a single empty paragraph.
pub fn parse_markup_to_blocks(markup: &str) -> Vec<Block> {
    formats::html::parser::parse_markup(markup)
}

/// Serialize blocks to markup, one fragment per block joined with `\n`
pub fn serialize_blocks_to_markup(blocks: &[Block]) -> String {
    formats::html::serializer::serialize_blocks(blocks)
}

/// Serialize blocks to markup with consecutive list items sharing one container
pub fn serialize_grouped_markup(blocks: &[Block]) -> String {
    formats::html::serializer::serialize_grouped(blocks)
}

/// Fold consecutive same-kind list items into [`ListGroup`]s
pub fn merge_list_blocks(blocks: &[Block]) -> Vec<MergedBlock> {
    common::list_merge::merge_list_blocks(blocks)
}
