//! Core data structures for the block model.

use crate::error::FormatError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Property key read by `todo` blocks.
pub const CHECKED: &str = "checked";
/// Property key read by `toggle` blocks.
pub const EXPANDED: &str = "expanded";

/// Identifier of a block, unique within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Call-scoped source of block ids.
///
/// Every parse seeds its own generator, so concurrent parses never share a
/// counter and ids within one call are strictly increasing.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Generator whose first id is 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Generator whose first id is `first`
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Generator that continues after the highest id in `blocks`
    pub fn after(blocks: &[Block]) -> Self {
        let highest = blocks.iter().map(|b| b.id.0).max().unwrap_or(0);
        Self::starting_at(highest + 1)
    }

    pub fn next_id(&mut self) -> BlockId {
        let id = BlockId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`IdGenerator::next_id`] will return
    pub fn peek(&self) -> BlockId {
        BlockId(self.next)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// The closed set of block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Code,
    Quote,
    Divider,
    BulletListItem,
    NumberedListItem,
    Todo,
    Callout,
    Toggle,
}

impl BlockKind {
    pub const ALL: [BlockKind; 12] = [
        BlockKind::Paragraph,
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::Code,
        BlockKind::Quote,
        BlockKind::Divider,
        BlockKind::BulletListItem,
        BlockKind::NumberedListItem,
        BlockKind::Todo,
        BlockKind::Callout,
        BlockKind::Toggle,
    ];

    /// Wire name of this kind (e.g. `bulletListItem`)
    pub const fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading1 => "heading1",
            BlockKind::Heading2 => "heading2",
            BlockKind::Heading3 => "heading3",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::Divider => "divider",
            BlockKind::BulletListItem => "bulletListItem",
            BlockKind::NumberedListItem => "numberedListItem",
            BlockKind::Todo => "todo",
            BlockKind::Callout => "callout",
            BlockKind::Toggle => "toggle",
        }
    }

    /// Heading kind for levels 1-3
    pub fn heading(level: usize) -> Option<BlockKind> {
        match level {
            1 => Some(BlockKind::Heading1),
            2 => Some(BlockKind::Heading2),
            3 => Some(BlockKind::Heading3),
            _ => None,
        }
    }

    pub fn heading_level(&self) -> Option<usize> {
        match self {
            BlockKind::Heading1 => Some(1),
            BlockKind::Heading2 => Some(2),
            BlockKind::Heading3 => Some(3),
            _ => None,
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, BlockKind::BulletListItem | BlockKind::NumberedListItem)
    }

    /// Parse a kind name, falling back to `paragraph` for unknown names.
    pub fn from_name_lossy(name: &str) -> BlockKind {
        name.parse().unwrap_or_else(|err: FormatError| {
            tracing::warn!(%err, "treating block as paragraph");
            BlockKind::Paragraph
        })
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FormatError::InvalidBlockKind(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for BlockKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(BlockKind::from_name_lossy(&name))
    }
}

/// Open key/value map attached to a block.
pub type Properties = BTreeMap<String, Value>;

/// The unit of document structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Block {
    pub fn new(id: BlockId, kind: BlockKind, content: impl Into<String>) -> Self {
        Block {
            id,
            kind,
            content: content.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Boolean property; absent or non-boolean values read as `false`
    pub fn flag(&self, key: &str) -> bool {
        self.properties
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// `properties.checked` of a todo block
    pub fn is_checked(&self) -> bool {
        self.flag(CHECKED)
    }

    /// `properties.expanded` of a toggle block
    pub fn is_expanded(&self) -> bool {
        self.flag(EXPANDED)
    }
}
