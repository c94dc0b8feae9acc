//! Export tests for the markup serializer (blocks → markup)

use insta::assert_snapshot;
use note_babel::blocks::{Block, BlockId, BlockKind, CHECKED, EXPANDED};
use note_babel::format::Format;
use note_babel::formats::html::HtmlFormat;
use note_babel::{parse_markup_to_blocks, serialize_blocks_to_markup, serialize_grouped_markup};

fn block(id: u64, kind: BlockKind, content: &str) -> Block {
    Block::new(BlockId(id), kind, content)
}

fn kitchensink() -> Vec<Block> {
    vec![
        block(1, BlockKind::Heading1, "Notes"),
        block(2, BlockKind::Paragraph, "Some text"),
        block(3, BlockKind::BulletListItem, "A"),
        block(4, BlockKind::BulletListItem, "B"),
        block(5, BlockKind::NumberedListItem, "first"),
        block(6, BlockKind::Todo, "ship it").with_property(CHECKED, true),
        block(7, BlockKind::Toggle, "details").with_property(EXPANDED, false),
        block(8, BlockKind::Callout, "heads up"),
        block(9, BlockKind::Divider, ""),
        block(10, BlockKind::Code, "let x = 1;"),
        block(11, BlockKind::Quote, "quoted"),
    ]
}

#[test]
fn test_divider() {
    assert_eq!(
        serialize_blocks_to_markup(&[block(1, BlockKind::Divider, "")]),
        "<hr/>"
    );
}

#[test]
fn test_kitchensink_per_block() {
    assert_snapshot!(serialize_blocks_to_markup(&kitchensink()), @r###"
    <h1>Notes</h1>
    <p>Some text</p>
    <ul><li>A</li></ul>
    <ul><li>B</li></ul>
    <ol><li>first</li></ol>
    <div class="todo"><input type="checkbox" checked/><span>ship it</span></div>
    <details><summary>details</summary></details>
    <div class="callout">heads up</div>
    <hr/>
    <pre><code>let x = 1;</code></pre>
    <blockquote>quoted</blockquote>
    "###);
}

#[test]
fn test_kitchensink_grouped() {
    assert_snapshot!(serialize_grouped_markup(&kitchensink()), @r###"
    <h1>Notes</h1>
    <p>Some text</p>
    <ul><li>A</li><li>B</li></ul>
    <ol><li>first</li></ol>
    <div class="todo"><input type="checkbox" checked/><span>ship it</span></div>
    <details><summary>details</summary></details>
    <div class="callout">heads up</div>
    <hr/>
    <pre><code>let x = 1;</code></pre>
    <blockquote>quoted</blockquote>
    "###);
}

#[test]
fn test_grouped_bullets() {
    let blocks = vec![
        block(1, BlockKind::BulletListItem, "A"),
        block(2, BlockKind::BulletListItem, "B"),
    ];
    assert_eq!(serialize_grouped_markup(&blocks), "<ul><li>A</li><li>B</li></ul>");
}

#[test]
fn test_structural_kinds_survive_round_trip() {
    let markup = "<h2>Plan</h2><p>intro</p><ul><li>A</li><li>B</li></ul><blockquote>q</blockquote>";
    let blocks = parse_markup_to_blocks(markup);
    let reparsed = parse_markup_to_blocks(&serialize_grouped_markup(&blocks));

    let shape = |blocks: &[Block]| {
        blocks
            .iter()
            .map(|b| (b.kind, b.content.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&blocks), shape(&reparsed));
}

#[test]
fn test_html_format_grouped_option() {
    let blocks = vec![
        block(1, BlockKind::NumberedListItem, "1"),
        block(2, BlockKind::NumberedListItem, "2"),
    ];
    let grouped = HtmlFormat::with_grouped_lists().serialize(&blocks).unwrap();
    assert_eq!(grouped, "<ol><li>1</li><li>2</li></ol>");

    let plain = HtmlFormat::default().serialize(&blocks).unwrap();
    assert_eq!(plain, "<ol><li>1</li></ol>\n<ol><li>2</li></ol>");
}
