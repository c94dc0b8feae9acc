//! Markup parsing (markup → blocks)
//!
//! Pipeline: markup string → html5ever → RcDom → top-level `<body>` nodes → blocks
//!
//! Each top-level node maps to zero or more blocks. The walk never fails: tags
//! it does not know fall back to paragraphs and nodes without text vanish.

use crate::blocks::{Block, BlockKind, IdGenerator};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse markup into blocks with ids starting at 1
pub fn parse_markup(markup: &str) -> Vec<Block> {
    let mut ids = IdGenerator::new();
    parse_markup_with_ids(markup, &mut ids)
}

/// Parse markup into blocks, drawing ids from `ids`.
///
/// Always returns at least one block: when nothing in the markup produces a
/// block, a single empty paragraph is emitted.
pub fn parse_markup_with_ids(markup: &str, ids: &mut IdGenerator) -> Vec<Block> {
    let dom = parse_document(RcDom::default(), Default::default()).one(markup);

    let mut blocks = Vec::new();
    if let Some(body) = find_element(&dom.document, "body") {
        for child in body.children.borrow().iter() {
            collect_blocks_from_node(child, ids, &mut blocks);
        }
    }

    if blocks.is_empty() {
        blocks.push(Block::new(ids.next_id(), BlockKind::Paragraph, ""));
    }

    tracing::debug!(blocks = blocks.len(), "parsed markup");
    blocks
}

/// Map one top-level node to blocks
fn collect_blocks_from_node(node: &Handle, ids: &mut IdGenerator, blocks: &mut Vec<Block>) {
    match &node.data {
        NodeData::Element { name, .. } => {
            let tag: &str = &name.local;
            match tag {
                "h1" | "h2" | "h3" => {
                    let level = tag[1..].parse().unwrap_or(1);
                    let kind = BlockKind::heading(level).unwrap_or(BlockKind::Heading1);
                    blocks.push(Block::new(ids.next_id(), kind, text_content(node)));
                }
                "pre" => {
                    let content = element_children(node)
                        .into_iter()
                        .find(|child| tag_name(child) == Some("code"))
                        .map(|code| text_content(&code))
                        .unwrap_or_else(|| text_content(node));
                    blocks.push(Block::new(ids.next_id(), BlockKind::Code, content));
                }
                "blockquote" => {
                    blocks.push(Block::new(ids.next_id(), BlockKind::Quote, text_content(node)));
                }
                "hr" => {
                    blocks.push(Block::new(ids.next_id(), BlockKind::Divider, ""));
                }
                "ul" | "ol" => {
                    let kind = if tag == "ol" {
                        BlockKind::NumberedListItem
                    } else {
                        BlockKind::BulletListItem
                    };
                    for item in element_children(node) {
                        blocks.push(Block::new(ids.next_id(), kind, text_content(&item)));
                    }
                }
                _ => {
                    // `p` and every unrecognized element: paragraph when there is text
                    let text = text_content(node);
                    if !text.trim().is_empty() {
                        blocks.push(Block::new(ids.next_id(), BlockKind::Paragraph, text));
                    }
                }
            }
        }
        NodeData::Text { contents } => {
            let text = contents.borrow();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                blocks.push(Block::new(ids.next_id(), BlockKind::Paragraph, trimmed));
            }
        }
        // Comments, doctypes and processing instructions carry no content
        _ => {}
    }
}

fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Direct element children, skipping text and comments
fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// Depth-first search for the first element with the given tag
fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if tag_name(node) == Some(tag) {
        return Some(node.clone());
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

/// Concatenated text of all descendant text nodes
fn text_content(node: &Handle) -> String {
    let mut output = String::new();
    collect_text(node, &mut output);
    output
}

fn collect_text(node: &Handle, output: &mut String) {
    match &node.data {
        NodeData::Text { contents } => output.push_str(&contents.borrow()),
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, output);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockId;

    fn kinds(blocks: &[Block]) -> Vec<BlockKind> {
        blocks.iter().map(|b| b.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        let blocks = parse_markup("");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].content, "");
    }

    #[test]
    fn test_heading_and_paragraph() {
        let blocks = parse_markup("<h1>Title</h1><p>Body</p>");
        assert_eq!(kinds(&blocks), vec![BlockKind::Heading1, BlockKind::Paragraph]);
        assert_eq!(blocks[0].content, "Title");
        assert_eq!(blocks[1].content, "Body");
        assert!(blocks[0].id < blocks[1].id);
    }

    #[test]
    fn test_pre_without_code_uses_own_text() {
        let blocks = parse_markup("<pre>let x = 1;</pre>");
        assert_eq!(blocks[0].kind, BlockKind::Code);
        assert_eq!(blocks[0].content, "let x = 1;");
    }

    #[test]
    fn test_ids_continue_from_generator() {
        let mut ids = IdGenerator::starting_at(40);
        let blocks = parse_markup_with_ids("<p>a</p><p>b</p>", &mut ids);
        assert_eq!(blocks[0].id, BlockId(40));
        assert_eq!(blocks[1].id, BlockId(41));
        assert_eq!(ids.peek(), BlockId(42));
    }

    #[test]
    fn test_comments_produce_nothing() {
        let blocks = parse_markup("<!-- hidden --><p>shown</p>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "shown");
    }
}
