//! Editor actions on a block document

use note_babel::blocks::{BlockDocument, BlockId, BlockKind, CHECKED};
use note_babel::FormatError;
use std::collections::HashSet;

fn ids_are_unique(doc: &BlockDocument) -> bool {
    let ids: HashSet<BlockId> = doc.blocks().iter().map(|b| b.id).collect();
    ids.len() == doc.len()
}

#[test]
fn test_typing_session() {
    let mut doc = BlockDocument::from_markup("<h1>Groceries</h1>");
    let title = doc.blocks()[0].id;

    let milk = doc.insert_after(title, BlockKind::Todo, "milk").unwrap();
    doc.set_property(milk, CHECKED, true).unwrap();
    let eggs = doc.split(milk, 4).unwrap();
    doc.update_content(eggs, "eggs").unwrap();

    assert!(ids_are_unique(&doc));
    assert_eq!(doc.get(eggs).unwrap().kind, BlockKind::Todo);
    assert!(!doc.get(eggs).unwrap().is_checked());
    assert_eq!(
        doc.to_markup(),
        "<h1>Groceries</h1>\n\
         <div class=\"todo\"><input type=\"checkbox\" checked/><span>milk</span></div>\n\
         <div class=\"todo\"><input type=\"checkbox\"/><span>eggs</span></div>"
    );
}

#[test]
fn test_kind_change_replaces_block() {
    let mut doc = BlockDocument::from_markup("<p>intro</p><p>list me</p>");
    let target = doc.blocks()[1].id;
    let replaced = doc.replace_kind(target, BlockKind::BulletListItem).unwrap();

    assert_ne!(target, replaced);
    assert!(ids_are_unique(&doc));
    assert_eq!(doc.to_markup(), "<p>intro</p>\n<ul><li>list me</li></ul>");
}

#[test]
fn test_missing_block_is_reported() {
    let mut doc = BlockDocument::new();
    let missing = BlockId(999);
    assert!(matches!(
        doc.update_content(missing, "x"),
        Err(FormatError::BlockNotFound(id)) if id == missing
    ));
    assert!(doc.remove(missing).is_err());
    assert!(doc.split(missing, 0).is_err());
}

#[test]
fn test_document_never_becomes_empty() {
    let mut doc = BlockDocument::from_markup("<p>only</p>");
    let only = doc.blocks()[0].id;
    doc.remove(only).unwrap();

    assert_eq!(doc.len(), 1);
    assert_eq!(doc.blocks()[0].kind, BlockKind::Paragraph);
    assert_ne!(doc.blocks()[0].id, only);
}

#[test]
fn test_split_then_merge_restores_content() {
    let mut doc = BlockDocument::from_markup("<p>hello world</p>");
    let id = doc.blocks()[0].id;
    let tail = doc.split(id, 5).unwrap();
    let survivor = doc.merge_with_previous(tail).unwrap();

    assert_eq!(survivor, id);
    assert_eq!(doc.get(id).unwrap().content, "hello world");
    assert_eq!(doc.len(), 1);
}
