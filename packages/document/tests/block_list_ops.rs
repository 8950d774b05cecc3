//! Block list operation properties.

use pagecraft_document::{
    find_block_index, insert_block_at, list_number_at, move_block, remove_block, Block, BlockEdit,
    BlockKind,
};

fn text_block(kind: BlockKind, text: &str) -> Block {
    Block::new(kind).with(BlockEdit::SetText {
        content: text.to_string(),
    })
}

#[test]
fn test_insert_remove_round_trip() {
    let list = vec![
        text_block(BlockKind::Paragraph, "a"),
        text_block(BlockKind::Heading1, "b"),
        text_block(BlockKind::BulletList, "c"),
    ];

    for i in 0..=list.len() {
        let block = Block::new(BlockKind::Paragraph);
        let id = block.id.clone();
        let inserted = insert_block_at(&list, i, block);
        assert_eq!(inserted.len(), list.len() + 1);

        let removed = remove_block(&inserted, &id);
        assert_eq!(removed, list, "round trip at index {}", i);
    }
}

#[test]
fn test_self_move_is_identity() {
    let list = vec![
        text_block(BlockKind::Paragraph, "a"),
        text_block(BlockKind::Paragraph, "b"),
        text_block(BlockKind::Paragraph, "c"),
    ];

    for i in 0..list.len() {
        assert_eq!(move_block(&list, i, i), list, "self-move at {}", i);
    }
}

#[test]
fn test_move_then_move_back() {
    let list = vec![
        text_block(BlockKind::Paragraph, "a"),
        text_block(BlockKind::Paragraph, "b"),
        text_block(BlockKind::Paragraph, "c"),
    ];

    let there = move_block(&list, 0, 2);
    let back = move_block(&there, 2, 0);
    assert_eq!(back, list);
}

#[test]
fn test_conversion_preservation_matrix() {
    let text_kinds = [
        BlockKind::Paragraph,
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::BulletList,
        BlockKind::NumberedList,
    ];
    let opaque_kinds = [
        BlockKind::Image,
        BlockKind::Table,
        BlockKind::Embed,
        BlockKind::Code,
    ];

    for from in text_kinds {
        let source = text_block(from, "kept");

        for to in text_kinds {
            let converted = source.convert(to);
            assert_eq!(converted.id, source.id);
            assert_eq!(converted.text(), Some("kept"), "{:?} -> {:?}", from, to);
        }

        for to in opaque_kinds {
            let converted = source.convert(to);
            assert_eq!(converted.id, source.id);
            assert_eq!(converted.text(), None, "{:?} -> {:?}", from, to);
        }
    }

    // Coming back out of an opaque kind starts from empty text.
    for from in opaque_kinds {
        let converted = Block::new(from).convert(BlockKind::Paragraph);
        assert_eq!(converted.text(), Some(""));
    }
}

#[test]
fn test_numbered_runs_after_reorder() {
    // [N, N, P, N] -- moving the paragraph to the front merges the runs.
    let list = vec![
        text_block(BlockKind::NumberedList, "1"),
        text_block(BlockKind::NumberedList, "2"),
        text_block(BlockKind::Paragraph, "x"),
        text_block(BlockKind::NumberedList, "3"),
    ];

    assert_eq!(list_number_at(&list, 3), Some(1));

    let merged = move_block(&list, 2, 0);
    let numbers: Vec<_> = (0..merged.len())
        .map(|i| list_number_at(&merged, i))
        .collect();
    assert_eq!(numbers, vec![None, Some(1), Some(2), Some(3)]);
}

#[test]
fn test_find_index_matches_position() {
    let list = vec![
        text_block(BlockKind::Paragraph, "a"),
        text_block(BlockKind::Paragraph, "b"),
    ];

    assert_eq!(find_block_index(&list, &list[1].id), Some(1));
    assert_eq!(find_block_index(&list, "block_nope"), None);
}
