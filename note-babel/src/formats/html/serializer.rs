//! Markup serialization (blocks → markup)
//!
//! Every block renders on its own through a fixed template per kind. Content is
//! substituted verbatim: escaping happens before text enters a block, never here.
//!
//! List items serialize to single-item containers, so storage stays
//! kind-preserving per block. The grouped variant runs the list merge first and
//! emits one container per run of items.

use crate::blocks::{Block, BlockKind};
use crate::common::list_merge::{merge_list_blocks, ListGroup, ListGroupKind, MergedBlock};

/// Options for markup serialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Group consecutive list items into one container
    pub group_lists: bool,
}

impl HtmlOptions {
    pub fn grouped() -> Self {
        Self { group_lists: true }
    }
}

/// Serialize blocks one fragment per line
pub fn serialize_blocks(blocks: &[Block]) -> String {
    let output = blocks
        .iter()
        .map(serialize_block)
        .collect::<Vec<_>>()
        .join("\n");
    tracing::debug!(blocks = blocks.len(), bytes = output.len(), "serialized blocks");
    output
}

/// Serialize blocks, grouping consecutive list items into shared containers
pub fn serialize_grouped(blocks: &[Block]) -> String {
    merge_list_blocks(blocks)
        .iter()
        .map(|merged| match merged {
            MergedBlock::Block(block) => serialize_block(block),
            MergedBlock::List(group) => serialize_list_group(group),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn serialize_with_options(blocks: &[Block], options: HtmlOptions) -> String {
    if options.group_lists {
        serialize_grouped(blocks)
    } else {
        serialize_blocks(blocks)
    }
}

/// Render a single block
pub fn serialize_block(block: &Block) -> String {
    let content = &block.content;
    match block.kind {
        BlockKind::Heading1 => format!("<h1>{content}</h1>"),
        BlockKind::Heading2 => format!("<h2>{content}</h2>"),
        BlockKind::Heading3 => format!("<h3>{content}</h3>"),
        BlockKind::Code => format!("<pre><code>{content}</code></pre>"),
        BlockKind::Quote => format!("<blockquote>{content}</blockquote>"),
        BlockKind::Divider => "<hr/>".to_string(),
        BlockKind::BulletListItem => format!("<ul><li>{content}</li></ul>"),
        BlockKind::NumberedListItem => format!("<ol><li>{content}</li></ol>"),
        BlockKind::Todo => {
            let checked = if block.is_checked() { " checked" } else { "" };
            format!(
                "<div class=\"todo\"><input type=\"checkbox\"{checked}/><span>{content}</span></div>"
            )
        }
        BlockKind::Callout => format!("<div class=\"callout\">{content}</div>"),
        BlockKind::Toggle => {
            let open = if block.is_expanded() { " open" } else { "" };
            format!("<details{open}><summary>{content}</summary></details>")
        }
        BlockKind::Paragraph => format!("<p>{content}</p>"),
    }
}

fn serialize_list_group(group: &ListGroup) -> String {
    let tag = match group.kind {
        ListGroupKind::BulletList => "ul",
        ListGroupKind::NumberedList => "ol",
    };
    let items: String = group
        .items
        .iter()
        .map(|item| format!("<li>{}</li>", item.content))
        .collect();
    format!("<{tag}>{items}</{tag}>")
}
