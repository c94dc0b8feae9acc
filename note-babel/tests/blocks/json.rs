//! Blocks in their stored (json) form

use note_babel::blocks::{Block, BlockId, BlockKind, CHECKED};
use note_babel::{merge_list_blocks, FormatRegistry};
use serde_json::json;

#[test]
fn test_registry_round_trip_through_json() {
    let registry = FormatRegistry::default();
    let blocks = vec![
        Block::new(BlockId(3), BlockKind::Heading2, "Today"),
        Block::new(BlockId(7), BlockKind::Todo, "call back").with_property(CHECKED, true),
    ];

    let stored = registry.serialize(&blocks, "json").unwrap();
    let restored = registry.parse(&stored, "json").unwrap();
    assert_eq!(restored, blocks);
}

#[test]
fn test_wire_names() {
    let block = Block::new(BlockId(1), BlockKind::BulletListItem, "A");
    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(
        value,
        json!({"id": 1, "kind": "bulletListItem", "content": "A", "properties": {}})
    );
}

#[test]
fn test_json_to_markup() {
    let registry = FormatRegistry::default();
    let stored = r#"[
        {"id": 1, "kind": "numberedListItem", "content": "one"},
        {"id": 2, "kind": "sticker", "content": "odd"},
        {"id": 3, "kind": "divider"}
    ]"#;
    let blocks = registry.parse(stored, "json").unwrap();
    assert_eq!(blocks[1].kind, BlockKind::Paragraph);
    assert_eq!(
        registry.serialize(&blocks, "html").unwrap(),
        "<ol><li>one</li></ol>\n<p>odd</p>\n<hr/>"
    );
}

#[test]
fn test_merged_groups_serialize_untagged() {
    let blocks = vec![
        Block::new(BlockId(1), BlockKind::BulletListItem, "A"),
        Block::new(BlockId(2), BlockKind::BulletListItem, "B"),
        Block::new(BlockId(3), BlockKind::Paragraph, "x"),
    ];
    let value = serde_json::to_value(merge_list_blocks(&blocks)).unwrap();
    assert_eq!(value[0]["kind"], "bulletList");
    assert_eq!(value[0]["items"][1]["content"], "B");
    assert_eq!(value[1]["kind"], "paragraph");
}
