//! Groups runs of list items into list containers.
//!
//!     The block sequence is flat: a bullet list of three items is three
//!     `bulletListItem` blocks. Presentation wants one container per run, so this
//!     pass folds consecutive items of the same list kind into a [`ListGroup`].
//!
//!     It is a single left-to-right scan that keeps at most one open accumulator.
//!     A block of the other list kind, or any non-list block, closes it. Groups are
//!     transient: they are never stored, only rendered and discarded.

use crate::blocks::{Block, BlockKind};
use serde::Serialize;

/// Container kind of a [`ListGroup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListGroupKind {
    BulletList,
    NumberedList,
}

impl ListGroupKind {
    /// The container kind a list item belongs to, `None` for non-list blocks
    pub fn for_item(kind: BlockKind) -> Option<ListGroupKind> {
        match kind {
            BlockKind::BulletListItem => Some(ListGroupKind::BulletList),
            BlockKind::NumberedListItem => Some(ListGroupKind::NumberedList),
            _ => None,
        }
    }
}

/// Consecutive list items of one kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListGroup {
    pub kind: ListGroupKind,
    pub items: Vec<Block>,
}

/// Output element of the merge: a pass-through block or a list container
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MergedBlock {
    Block(Block),
    List(ListGroup),
}

/// Fold consecutive same-kind list items into [`ListGroup`]s
pub fn merge_list_blocks(blocks: &[Block]) -> Vec<MergedBlock> {
    let mut output = Vec::with_capacity(blocks.len());
    let mut open: Option<ListGroup> = None;

    for block in blocks {
        match ListGroupKind::for_item(block.kind) {
            Some(kind) => {
                if let Some(group) = open.as_mut().filter(|group| group.kind == kind) {
                    group.items.push(block.clone());
                    continue;
                }
                if let Some(group) = open.take() {
                    output.push(MergedBlock::List(group));
                }
                open = Some(ListGroup {
                    kind,
                    items: vec![block.clone()],
                });
            }
            None => {
                if let Some(group) = open.take() {
                    output.push(MergedBlock::List(group));
                }
                output.push(MergedBlock::Block(block.clone()));
            }
        }
    }

    if let Some(group) = open {
        output.push(MergedBlock::List(group));
    }

    output
}
