//! # Editing Session
//!
//! Per-page editing state: title, ordered block list, focused block, and
//! the open slash menu, plus every key- and drop-driven transition.
//!
//! All state lives in memory and transitions cannot fail: unknown ids
//! are no-ops, and every mutating transition is gated on the session's
//! resolved `can_edit` permission — a viewer's keystrokes leave the
//! block list untouched while the host renders read-only content.

use pagecraft_document::{
    find_block_index, insert_block_at, list_number_at, move_block, remove_block, Block, BlockEdit,
    BlockKind, Page,
};
use pagecraft_workspace::PermissionCheck;
use tracing::debug;

use crate::slash::{detect_trigger, SlashMenu};

/// Editing state machine for one open page.
#[derive(Debug, Clone)]
pub struct EditorSession {
    page_id: String,
    title: String,
    blocks: Vec<Block>,
    focused_block_id: Option<String>,
    permissions: PermissionCheck,
    slash: Option<SlashMenu>,
}

impl EditorSession {
    /// Open a page for editing. A page stored with no blocks is seeded
    /// with one empty paragraph.
    pub fn open(page: &Page, permissions: PermissionCheck) -> Self {
        Self {
            page_id: page.id.clone(),
            title: page.title.clone(),
            blocks: Self::seed(page.blocks.clone()),
            focused_block_id: None,
            permissions,
            slash: None,
        }
    }

    /// Switch to a different page, synchronously resetting title, blocks,
    /// focus, and the slash menu. A no-op when the page identity is
    /// unchanged, so callers may invoke this unconditionally on
    /// selection events.
    pub fn open_page(&mut self, page: &Page) {
        if page.id == self.page_id {
            return;
        }
        debug!(page_id = %page.id, "switching editor session to page");
        self.page_id = page.id.clone();
        self.title = page.title.clone();
        self.blocks = Self::seed(page.blocks.clone());
        self.focused_block_id = None;
        self.slash = None;
    }

    fn seed(blocks: Vec<Block>) -> Vec<Block> {
        if blocks.is_empty() {
            vec![Block::new(BlockKind::Paragraph)]
        } else {
            blocks
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn focused_block_id(&self) -> Option<&str> {
        self.focused_block_id.as_deref()
    }

    pub fn slash_menu(&self) -> Option<&SlashMenu> {
        self.slash.as_ref()
    }

    pub fn can_edit(&self) -> bool {
        self.permissions.can_edit
    }

    pub fn permissions(&self) -> &PermissionCheck {
        &self.permissions
    }

    /// Displayed 1-based number of the numbered-list block at `index`,
    /// recomputed from the live list.
    pub fn list_number_at(&self, index: usize) -> Option<usize> {
        list_number_at(&self.blocks, index)
    }

    /// Track which block holds the caret. Unknown ids clear focus.
    pub fn focus_block(&mut self, block_id: &str) {
        self.focused_block_id = find_block_index(&self.blocks, block_id)
            .map(|_| block_id.to_string());
    }

    /// Edit the page title. Returns whether the title changed so the
    /// caller can propagate it to the owning page.
    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        if !self.permissions.can_edit {
            return false;
        }
        let title = title.into();
        if title == self.title {
            return false;
        }
        self.title = title;
        true
    }

    /// Apply a typed edit to one block. Returns whether anything changed.
    pub fn update_block(&mut self, block_id: &str, edit: BlockEdit) -> bool {
        if !self.permissions.can_edit {
            return false;
        }
        match find_block_index(&self.blocks, block_id) {
            Some(index) => {
                let updated = self.blocks[index].with(edit);
                self.blocks[index] = updated;
                true
            }
            None => false,
        }
    }

    /// Replace a text-bearing block's text from a keystroke, driving
    /// slash-trigger detection for paragraphs. `cursor` is the caret's
    /// byte offset after the edit.
    pub fn edit_text(&mut self, block_id: &str, text: &str, cursor: usize) -> bool {
        if !self.permissions.can_edit {
            return false;
        }
        let Some(index) = find_block_index(&self.blocks, block_id) else {
            return false;
        };

        let changed = if self.blocks[index].kind().is_text_bearing() {
            let updated = self.blocks[index].with(BlockEdit::SetText {
                content: text.to_string(),
            });
            self.blocks[index] = updated;
            true
        } else {
            false
        };

        // The slash menu only ever rides a paragraph.
        if changed && self.blocks[index].kind() == BlockKind::Paragraph {
            match detect_trigger(text, cursor) {
                Some(trigger) => match &mut self.slash {
                    Some(menu) if menu.block_id == block_id => menu.update(trigger, cursor),
                    _ => self.slash = Some(SlashMenu::open(block_id, trigger, cursor)),
                },
                None => self.slash = None,
            }
        } else if changed {
            self.slash = None;
        }

        changed
    }

    /// Enter inside the focused block.
    ///
    /// With the slash menu open this commits the highlighted candidate.
    /// Otherwise it splits: a new block is inserted after the focused
    /// text-bearing block — same kind for list blocks, paragraph for
    /// everything else — and focus moves to it. Returns the id of the
    /// block created or converted.
    pub fn press_enter(&mut self) -> Option<String> {
        if !self.permissions.can_edit {
            return None;
        }

        if self.slash.is_some() {
            return self.commit_slash_selection(None);
        }

        let focused_id = self.focused_block_id.clone()?;
        let index = find_block_index(&self.blocks, &focused_id)?;
        let focused = &self.blocks[index];
        if !focused.kind().is_text_bearing() {
            return None;
        }

        let new_kind = match focused.kind() {
            BlockKind::BulletList => BlockKind::BulletList,
            BlockKind::NumberedList => BlockKind::NumberedList,
            _ => BlockKind::Paragraph,
        };

        let block = Block::new(new_kind);
        let new_id = block.id.clone();
        self.blocks = insert_block_at(&self.blocks, index + 1, block);
        self.focused_block_id = Some(new_id.clone());
        Some(new_id)
    }

    /// Backspace inside a block whose text is already empty.
    ///
    /// An empty list item outdents to a paragraph (same id); an empty
    /// paragraph or heading is deleted outright, with focus routed to
    /// the preceding block. Blocks with remaining text, and non-text
    /// blocks, are untouched.
    pub fn press_backspace(&mut self, block_id: &str) {
        if !self.permissions.can_edit {
            return;
        }
        let Some(index) = find_block_index(&self.blocks, block_id) else {
            return;
        };

        if self.blocks[index].text().map(|t| !t.is_empty()).unwrap_or(true) {
            return;
        }

        match self.blocks[index].kind() {
            BlockKind::BulletList | BlockKind::NumberedList => {
                let outdented = self.blocks[index].convert(BlockKind::Paragraph);
                self.blocks[index] = outdented;
            }
            BlockKind::Paragraph | BlockKind::Heading1 | BlockKind::Heading2 | BlockKind::Heading3 => {
                self.delete_block(block_id);
            }
            _ => {}
        }
    }

    /// Delete a block outright (the explicit delete affordance). The
    /// list never goes empty: deleting the last block leaves one fresh
    /// empty paragraph.
    pub fn delete_block(&mut self, block_id: &str) {
        if !self.permissions.can_edit {
            return;
        }
        let Some(index) = find_block_index(&self.blocks, block_id) else {
            return;
        };

        let mut next = remove_block(&self.blocks, block_id);
        if next.is_empty() {
            let fallback = Block::new(BlockKind::Paragraph);
            debug!(page_id = %self.page_id, "block list emptied, seeding fallback paragraph");
            self.focused_block_id = Some(fallback.id.clone());
            next.push(fallback);
        } else if self.focused_block_id.as_deref() == Some(block_id) {
            let neighbor = index.saturating_sub(1).min(next.len() - 1);
            self.focused_block_id = Some(next[neighbor].id.clone());
        }
        if self.slash.as_ref().is_some_and(|m| m.block_id == block_id) {
            self.slash = None;
        }
        self.blocks = next;
    }

    /// Insert a fresh block of `kind` after `after_id`, or append when
    /// no anchor is given. Focus moves to the new block. Returns its id.
    pub fn add_block(&mut self, kind: BlockKind, after_id: Option<&str>) -> Option<String> {
        if !self.permissions.can_edit {
            return None;
        }

        let index = match after_id {
            Some(id) => find_block_index(&self.blocks, id)? + 1,
            None => self.blocks.len(),
        };

        let block = Block::new(kind);
        let new_id = block.id.clone();
        self.blocks = insert_block_at(&self.blocks, index, block);
        self.focused_block_id = Some(new_id.clone());
        Some(new_id)
    }

    /// Convert a block to another kind in place, preserving text between
    /// text-bearing kinds and keeping the block's id.
    pub fn convert_block(&mut self, block_id: &str, new_kind: BlockKind) -> bool {
        if !self.permissions.can_edit {
            return false;
        }
        match find_block_index(&self.blocks, block_id) {
            Some(index) => {
                let converted = self.blocks[index].convert(new_kind);
                self.blocks[index] = converted;
                true
            }
            None => false,
        }
    }

    /// Drop handler for drag-reorder: move the dragged block to the
    /// dropped-on block's position. Self-drops and unknown ids are
    /// no-ops.
    pub fn drag_drop(&mut self, active_id: &str, over_id: &str) {
        if !self.permissions.can_edit || active_id == over_id {
            return;
        }
        let (Some(from), Some(to)) = (
            find_block_index(&self.blocks, active_id),
            find_block_index(&self.blocks, over_id),
        ) else {
            return;
        };

        debug!(from, to, "reordering blocks");
        self.blocks = move_block(&self.blocks, from, to);
    }

    /// Arrow-down inside the open slash menu.
    pub fn slash_move_down(&mut self) {
        if let Some(menu) = &mut self.slash {
            menu.move_down();
        }
    }

    /// Arrow-up inside the open slash menu.
    pub fn slash_move_up(&mut self) {
        if let Some(menu) = &mut self.slash {
            menu.move_up();
        }
    }

    /// Escape or click-outside: close the menu without converting.
    pub fn slash_close(&mut self) {
        self.slash = None;
    }

    /// Click on a specific candidate.
    pub fn slash_select(&mut self, kind: BlockKind) -> Option<String> {
        self.commit_slash_selection(Some(kind))
    }

    /// Commit the slash menu: strip the trigger substring from the
    /// paragraph's text up to the cursor, then convert the block. With
    /// `kind` unset the highlighted candidate is used. Returns the
    /// converted block's id.
    fn commit_slash_selection(&mut self, kind: Option<BlockKind>) -> Option<String> {
        if !self.permissions.can_edit {
            return None;
        }
        let menu = self.slash.take()?;
        let kind = match kind.or_else(|| menu.highlighted().map(|o| o.kind)) {
            Some(kind) => kind,
            None => return None,
        };

        let index = find_block_index(&self.blocks, &menu.block_id)?;

        let stripped = self.blocks[index].text().and_then(|text| {
            let cursor = menu.cursor.min(text.len());
            if text.is_char_boundary(cursor) && menu.slash_index <= cursor {
                Some(format!("{}{}", &text[..menu.slash_index], &text[cursor..]))
            } else {
                None
            }
        });
        if let Some(content) = stripped {
            let updated = self.blocks[index].with(BlockEdit::SetText { content });
            self.blocks[index] = updated;
        }

        debug!(block_id = %menu.block_id, ?kind, "slash menu conversion");
        let converted = self.blocks[index].convert(kind);
        self.blocks[index] = converted;
        Some(menu.block_id)
    }
}
