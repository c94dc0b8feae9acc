//! Block model shared by the parser, serializer and list merge.
//!
//! A document is a flat, ordered sequence of [`Block`]s. Nesting only appears
//! transiently, when consecutive list items are grouped for presentation (see
//! [`crate::common::list_merge`]).

pub mod document;
pub mod model;

pub use document::BlockDocument;
pub use model::{Block, BlockId, BlockKind, IdGenerator, Properties, CHECKED, EXPANDED};
