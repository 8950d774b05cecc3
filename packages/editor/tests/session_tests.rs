//! End-to-end editing session tests.

use pagecraft_document::{Block, BlockEdit, BlockKind, Page};
use pagecraft_editor::EditorSession;
use pagecraft_workspace::{
    get_user_permissions, CreateWorkspaceInput, MemberRole, PermissionCheck, Workspace,
};

fn editable() -> PermissionCheck {
    PermissionCheck {
        can_edit: true,
        can_view: true,
        can_comment: true,
        can_invite: true,
        can_manage_members: false,
        can_delete: false,
    }
}

fn open_session() -> EditorSession {
    let page = Page::new("workspace_1", "Notes", "user_1");
    EditorSession::open(&page, editable())
}

fn typed(session: &mut EditorSession, block_id: &str, text: &str) {
    session.edit_text(block_id, text, text.len());
}

#[test]
fn test_enter_splits_after_focused_paragraph() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    typed(&mut session, &first, "hello");
    session.focus_block(&first);

    let new_id = session.press_enter().expect("split should create a block");

    assert_eq!(session.blocks().len(), 2);
    assert_eq!(session.blocks()[0].text(), Some("hello"));
    assert_eq!(session.blocks()[1].id, new_id);
    assert_eq!(session.blocks()[1].kind(), BlockKind::Paragraph);
    assert_eq!(session.focused_block_id(), Some(new_id.as_str()));
}

#[test]
fn test_enter_mirrors_list_type() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    session.convert_block(&first, BlockKind::BulletList);
    session.focus_block(&first);

    session.press_enter().unwrap();
    assert_eq!(session.blocks()[1].kind(), BlockKind::BulletList);

    session.convert_block(&first, BlockKind::NumberedList);
    session.focus_block(&first);
    session.press_enter().unwrap();
    assert_eq!(session.blocks()[1].kind(), BlockKind::NumberedList);
}

#[test]
fn test_enter_on_non_text_block_is_noop() {
    let mut session = open_session();
    let id = session.add_block(BlockKind::Image, None).unwrap();
    session.focus_block(&id);

    assert_eq!(session.press_enter(), None);
    assert_eq!(session.blocks().len(), 2);
}

#[test]
fn test_backspace_outdents_empty_list_item() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    session.convert_block(&first, BlockKind::BulletList);

    session.press_backspace(&first);

    assert_eq!(session.blocks().len(), 1);
    assert_eq!(session.blocks()[0].kind(), BlockKind::Paragraph);
    assert_eq!(session.blocks()[0].id, first);
}

#[test]
fn test_backspace_deletes_empty_paragraph_with_fallback() {
    let mut session = open_session();
    let only = session.blocks()[0].id.clone();

    session.press_backspace(&only);

    // Never-empty invariant: the last block is replaced, not removed.
    assert_eq!(session.blocks().len(), 1);
    assert_eq!(session.blocks()[0].kind(), BlockKind::Paragraph);
    assert_ne!(session.blocks()[0].id, only);
}

#[test]
fn test_backspace_keeps_nonempty_blocks() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    typed(&mut session, &first, "still here");

    session.press_backspace(&first);
    assert_eq!(session.blocks()[0].text(), Some("still here"));
}

#[test]
fn test_delete_storm_never_empties_list() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    session.focus_block(&first);
    for _ in 0..4 {
        session.press_enter();
    }
    assert_eq!(session.blocks().len(), 5);

    for _ in 0..20 {
        let id = session.blocks()[0].id.clone();
        session.delete_block(&id);
        assert!(!session.blocks().is_empty());
    }
    assert_eq!(session.blocks().len(), 1);
}

#[test]
fn test_delete_routes_focus_to_previous_block() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    session.focus_block(&first);
    let second = session.press_enter().unwrap();
    let third = session.press_enter().unwrap();

    session.focus_block(&third);
    session.delete_block(&third);
    assert_eq!(session.focused_block_id(), Some(second.as_str()));
}

#[test]
fn test_numbered_runs_reflect_live_list() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    typed(&mut session, &first, "intro");

    // Build [P, N, N, N] then break the run: [P, N, P, N].
    let n1 = session
        .add_block(BlockKind::NumberedList, Some(first.as_str()))
        .unwrap();
    session.focus_block(&n1);
    session.press_enter().unwrap();
    session.press_enter().unwrap();
    assert_eq!(session.list_number_at(1), Some(1));
    assert_eq!(session.list_number_at(2), Some(2));
    assert_eq!(session.list_number_at(3), Some(3));

    let middle = session.blocks()[2].id.clone();
    session.convert_block(&middle, BlockKind::Paragraph);
    assert_eq!(session.list_number_at(1), Some(1));
    assert_eq!(session.list_number_at(2), None);
    assert_eq!(session.list_number_at(3), Some(1));
}

#[test]
fn test_drag_drop_reorders_and_self_drop_is_noop() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    session.focus_block(&first);
    let second = session.press_enter().unwrap();
    let third = session.press_enter().unwrap();

    let before: Vec<String> = session.blocks().iter().map(|b| b.id.clone()).collect();
    session.drag_drop(&third, &third);
    let after: Vec<String> = session.blocks().iter().map(|b| b.id.clone()).collect();
    assert_eq!(before, after);

    session.drag_drop(&third, &first);
    let ids: Vec<&str> = session.blocks().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec![third.as_str(), first.as_str(), second.as_str()]);
}

#[test]
fn test_slash_menu_full_flow() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    session.focus_block(&first);

    typed(&mut session, &first, "/tab");
    let menu = session.slash_menu().expect("menu should be open");
    assert_eq!(menu.query(), "tab");

    let labels: Vec<&str> = menu.filtered().iter().map(|o| o.label).collect();
    assert!(labels.contains(&"Table"));
    assert!(!labels.contains(&"Heading 1"));

    let converted = session.press_enter().expect("enter commits the highlight");
    assert_eq!(converted, first);
    assert_eq!(session.blocks()[0].kind(), BlockKind::Table);
    assert!(session.slash_menu().is_none());
    // One block, no split happened.
    assert_eq!(session.blocks().len(), 1);
}

#[test]
fn test_slash_commit_strips_trigger_only() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();

    // Trigger typed mid-text, after a space.
    session.edit_text(&first, "note /head tail", 10);
    assert!(session.slash_menu().is_some());

    session.slash_select(BlockKind::Heading1);
    assert_eq!(session.blocks()[0].kind(), BlockKind::Heading1);
    assert_eq!(session.blocks()[0].text(), Some("note  tail"));
    assert_eq!(session.blocks()[0].id, first);
}

#[test]
fn test_slash_escape_closes_without_converting() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    typed(&mut session, &first, "/code");

    session.slash_close();
    assert!(session.slash_menu().is_none());
    assert_eq!(session.blocks()[0].kind(), BlockKind::Paragraph);
    assert_eq!(session.blocks()[0].text(), Some("/code"));
}

#[test]
fn test_slash_menu_closes_when_trigger_removed() {
    let mut session = open_session();
    let first = session.blocks()[0].id.clone();
    typed(&mut session, &first, "/h");
    assert!(session.slash_menu().is_some());

    typed(&mut session, &first, "h");
    assert!(session.slash_menu().is_none());
}

#[test]
fn test_guest_session_is_read_only() {
    let mut workspace = Workspace::new(CreateWorkspaceInput {
        name: "Docs".into(),
        description: None,
        icon: None,
        owner_id: "user_owner".into(),
        owner_email: "owner@example.com".into(),
        owner_name: "Owner".into(),
    });
    workspace
        .add_member(
            "user_guest",
            "guest@example.com",
            "Guest",
            MemberRole::Guest,
            MemberRole::Guest.default_permissions().to_vec(),
        )
        .unwrap();

    let page = Page::new(&workspace.id, "Notes", "user_owner");
    let check = get_user_permissions(&workspace, "user_guest");
    assert!(!check.can_edit);

    let mut session = EditorSession::open(&page, check);
    let first = session.blocks()[0].id.clone();
    session.focus_block(&first);

    // Every mutating transition is a silent no-op.
    assert_eq!(session.press_enter(), None);
    assert!(!session.edit_text(&first, "nope", 4));
    assert!(!session.convert_block(&first, BlockKind::Heading1));
    session.press_backspace(&first);
    session.delete_block(&first);
    session.drag_drop(&first, &first);
    assert!(!session.set_title("nope"));

    assert_eq!(session.blocks().len(), 1);
    assert_eq!(session.blocks()[0].id, first);
    assert_eq!(session.blocks()[0].text(), Some(""));
    assert_eq!(session.title(), "Notes");
}

#[test]
fn test_update_block_applies_typed_edit() {
    let mut session = open_session();
    let code_id = session.add_block(BlockKind::Code, None).unwrap();

    assert!(session.update_block(
        &code_id,
        BlockEdit::SetCode {
            code: "print()".into()
        }
    ));

    let block: &Block = session
        .blocks()
        .iter()
        .find(|b| b.id == code_id)
        .unwrap();
    assert_eq!(block.kind(), BlockKind::Code);
}
