//! Import tests for the markup parser (markup → blocks)

use note_babel::blocks::{Block, BlockKind};
use note_babel::parse_markup_to_blocks;
use proptest::prelude::*;

fn summary(blocks: &[Block]) -> Vec<(BlockKind, &str)> {
    blocks.iter().map(|b| (b.kind, b.content.as_str())).collect()
}

#[test]
fn test_empty_markup_gives_one_empty_paragraph() {
    for markup in ["", "   ", "<div></div>", "<p>  </p>", "<!-- only a comment -->"] {
        let blocks = parse_markup_to_blocks(markup);
        assert_eq!(summary(&blocks), vec![(BlockKind::Paragraph, "")], "{markup:?}");
    }
}

#[test]
fn test_heading_then_paragraph() {
    let blocks = parse_markup_to_blocks("<h1>Title</h1><p>Body</p>");
    assert_eq!(
        summary(&blocks),
        vec![(BlockKind::Heading1, "Title"), (BlockKind::Paragraph, "Body")]
    );
    assert!(blocks[0].id < blocks[1].id);
}

#[test]
fn test_all_heading_levels() {
    let blocks = parse_markup_to_blocks("<h1>a</h1><h2>b</h2><h3>c</h3>");
    assert_eq!(
        summary(&blocks),
        vec![
            (BlockKind::Heading1, "a"),
            (BlockKind::Heading2, "b"),
            (BlockKind::Heading3, "c"),
        ]
    );
}

#[test]
fn test_lists_expand_to_one_block_per_item() {
    let blocks = parse_markup_to_blocks("<ul><li>A</li><li>B</li></ul><ol><li>one</li></ol>");
    assert_eq!(
        summary(&blocks),
        vec![
            (BlockKind::BulletListItem, "A"),
            (BlockKind::BulletListItem, "B"),
            (BlockKind::NumberedListItem, "one"),
        ]
    );
}

#[test]
fn test_nested_list_text_is_flattened() {
    let blocks = parse_markup_to_blocks("<ul><li>outer<ul><li>inner</li></ul></li></ul>");
    assert_eq!(summary(&blocks), vec![(BlockKind::BulletListItem, "outerinner")]);
}

#[test]
fn test_code_quote_and_divider() {
    let blocks = parse_markup_to_blocks(
        "<pre><code>fn main() {}</code></pre><blockquote>said <b>so</b></blockquote><hr>",
    );
    assert_eq!(
        summary(&blocks),
        vec![
            (BlockKind::Code, "fn main() {}"),
            (BlockKind::Quote, "said so"),
            (BlockKind::Divider, ""),
        ]
    );
}

#[test]
fn test_unknown_elements_and_bare_text_become_paragraphs() {
    let blocks = parse_markup_to_blocks("loose text<section>inside <em>here</em></section>");
    assert_eq!(
        summary(&blocks),
        vec![
            (BlockKind::Paragraph, "loose text"),
            (BlockKind::Paragraph, "inside here"),
        ]
    );
}

#[test]
fn test_editor_only_kinds_are_not_recovered() {
    // Todo, toggle and callout markup all come back as plain paragraphs
    let blocks = parse_markup_to_blocks(
        "<div class=\"todo\"><input type=\"checkbox\" checked/><span>task</span></div>\
         <details open><summary>more</summary></details>\
         <div class=\"callout\">note</div>",
    );
    assert_eq!(
        summary(&blocks),
        vec![
            (BlockKind::Paragraph, "task"),
            (BlockKind::Paragraph, "more"),
            (BlockKind::Paragraph, "note"),
        ]
    );
    assert!(blocks.iter().all(|b| b.properties.is_empty()));
}

#[test]
fn test_entities_are_decoded() {
    let blocks = parse_markup_to_blocks("<p>a &amp; b &lt; c</p>");
    assert_eq!(blocks[0].content, "a & b < c");
}

proptest! {
    #[test]
    fn parse_never_returns_empty(markup in ".{0,200}") {
        let blocks = parse_markup_to_blocks(&markup);
        prop_assert!(!blocks.is_empty());
    }

    #[test]
    fn ids_are_strictly_increasing(
        items in proptest::collection::vec("[a-z ]{0,12}", 0..8),
        tag in prop_oneof![Just("p"), Just("h2"), Just("blockquote")],
    ) {
        let markup: String = items
            .iter()
            .map(|item| format!("<{tag}>{item}</{tag}><ul><li>{item}</li></ul>"))
            .collect();
        let blocks = parse_markup_to_blocks(&markup);
        prop_assert!(blocks.windows(2).all(|pair| pair[0].id < pair[1].id));
    }
}
