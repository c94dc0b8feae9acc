//! Editor-facing block document
//!
//!     Blocks come from the markup parser or are created directly by editor actions
//!     (insert, split, merge). A document owns its id generator so every block it
//!     hands out keeps a unique id for the lifetime of the document.
//!
//!     Content and properties may be edited in place. Changing a block's kind is a
//!     replacement: the old block goes away and a new one with a fresh id takes its
//!     position.

use super::model::{Block, BlockId, BlockKind, IdGenerator};
use crate::error::FormatError;
use crate::formats::html::{parser, serializer};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct BlockDocument {
    blocks: Vec<Block>,
    ids: IdGenerator,
}

impl BlockDocument {
    /// A document holding a single empty paragraph
    pub fn new() -> Self {
        let mut ids = IdGenerator::new();
        let blocks = vec![Block::new(ids.next_id(), BlockKind::Paragraph, "")];
        Self { blocks, ids }
    }

    /// Adopt existing blocks; new ids continue after the highest one present
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            return Self::new();
        }
        let ids = IdGenerator::after(&blocks);
        Self { blocks, ids }
    }

    pub fn from_markup(markup: &str) -> Self {
        let mut ids = IdGenerator::new();
        let blocks = parser::parse_markup_with_ids(markup, &mut ids);
        Self { blocks, ids }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    fn position(&self, id: BlockId) -> Result<usize, FormatError> {
        self.blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or(FormatError::BlockNotFound(id))
    }

    /// Append a block at the end of the document
    pub fn push(&mut self, kind: BlockKind, content: impl Into<String>) -> BlockId {
        let block = Block::new(self.ids.next_id(), kind, content);
        let id = block.id;
        self.blocks.push(block);
        id
    }

    /// Insert a new block right after `after`
    pub fn insert_after(
        &mut self,
        after: BlockId,
        kind: BlockKind,
        content: impl Into<String>,
    ) -> Result<BlockId, FormatError> {
        let index = self.position(after)?;
        let block = Block::new(self.ids.next_id(), kind, content);
        let id = block.id;
        self.blocks.insert(index + 1, block);
        Ok(id)
    }

    /// Split a block at a character offset.
    ///
    /// The text after the offset moves into a new block inserted below. List
    /// items and todos continue as the same kind; every other kind continues as
    /// a paragraph. Offsets past the end split off an empty block.
    pub fn split(&mut self, id: BlockId, at: usize) -> Result<BlockId, FormatError> {
        let index = self.position(id)?;
        let original = &mut self.blocks[index];

        let byte_at = original
            .content
            .char_indices()
            .nth(at)
            .map(|(i, _)| i)
            .unwrap_or(original.content.len());
        let tail = original.content.split_off(byte_at);

        let kind = match original.kind {
            kind @ (BlockKind::BulletListItem | BlockKind::NumberedListItem | BlockKind::Todo) => {
                kind
            }
            _ => BlockKind::Paragraph,
        };

        let block = Block::new(self.ids.next_id(), kind, tail);
        let new_id = block.id;
        self.blocks.insert(index + 1, block);
        Ok(new_id)
    }

    /// Append a block's content to its predecessor and remove it.
    ///
    /// Returns the id of the surviving block.
    pub fn merge_with_previous(&mut self, id: BlockId) -> Result<BlockId, FormatError> {
        let index = self.position(id)?;
        if index == 0 {
            return Err(FormatError::NotSupported(format!(
                "block {id} has no previous block to merge into"
            )));
        }
        let removed = self.blocks.remove(index);
        let previous = &mut self.blocks[index - 1];
        previous.content.push_str(&removed.content);
        Ok(previous.id)
    }

    /// Delete a block. Removing the last block leaves one empty paragraph behind.
    pub fn remove(&mut self, id: BlockId) -> Result<Block, FormatError> {
        let index = self.position(id)?;
        let removed = self.blocks.remove(index);
        if self.blocks.is_empty() {
            self.push(BlockKind::Paragraph, "");
        }
        Ok(removed)
    }

    /// Replace a block with one of another kind, keeping its content.
    ///
    /// Properties are kind-specific and are not carried over.
    pub fn replace_kind(&mut self, id: BlockId, kind: BlockKind) -> Result<BlockId, FormatError> {
        let index = self.position(id)?;
        let content = std::mem::take(&mut self.blocks[index].content);
        let replacement = Block::new(self.ids.next_id(), kind, content);
        let new_id = replacement.id;
        self.blocks[index] = replacement;
        Ok(new_id)
    }

    pub fn update_content(
        &mut self,
        id: BlockId,
        content: impl Into<String>,
    ) -> Result<(), FormatError> {
        let index = self.position(id)?;
        self.blocks[index].content = content.into();
        Ok(())
    }

    pub fn set_property(
        &mut self,
        id: BlockId,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<(), FormatError> {
        let index = self.position(id)?;
        self.blocks[index]
            .properties
            .insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn to_markup(&self) -> String {
        serializer::serialize_blocks(&self.blocks)
    }
}

impl Default for BlockDocument {
    fn default() -> Self {
        Self::new()
    }
}
