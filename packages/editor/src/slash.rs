//! # Slash Command Menu
//!
//! State for the `/`-triggered block type menu: trigger detection inside
//! a paragraph's text, fuzzy candidate filtering, and wrapping keyboard
//! navigation.

use pagecraft_document::BlockKind;
use serde::Serialize;

/// One selectable entry in the slash menu.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockTypeOption {
    pub kind: BlockKind,
    pub label: &'static str,
    pub description: &'static str,
    /// Lowercase search keywords.
    pub keywords: &'static [&'static str],
}

/// Every block kind reachable from the keyboard.
pub const BLOCK_TYPE_OPTIONS: &[BlockTypeOption] = &[
    BlockTypeOption {
        kind: BlockKind::Paragraph,
        label: "Paragraph",
        description: "Plain text block",
        keywords: &["text", "paragraph", "p"],
    },
    BlockTypeOption {
        kind: BlockKind::Heading1,
        label: "Heading 1",
        description: "Large section heading",
        keywords: &["heading", "h1", "title"],
    },
    BlockTypeOption {
        kind: BlockKind::Heading2,
        label: "Heading 2",
        description: "Medium section heading",
        keywords: &["heading", "h2", "subtitle"],
    },
    BlockTypeOption {
        kind: BlockKind::Heading3,
        label: "Heading 3",
        description: "Small section heading",
        keywords: &["heading", "h3"],
    },
    BlockTypeOption {
        kind: BlockKind::BulletList,
        label: "Bulleted list",
        description: "Simple bulleted list",
        keywords: &["bullet", "list", "ul"],
    },
    BlockTypeOption {
        kind: BlockKind::NumberedList,
        label: "Numbered list",
        description: "List with numbering",
        keywords: &["numbered", "list", "ol"],
    },
    BlockTypeOption {
        kind: BlockKind::Image,
        label: "Image",
        description: "Upload or embed an image",
        keywords: &["image", "img", "picture", "photo"],
    },
    BlockTypeOption {
        kind: BlockKind::Table,
        label: "Table",
        description: "Create a table",
        keywords: &["table", "grid", "spreadsheet"],
    },
    BlockTypeOption {
        kind: BlockKind::Embed,
        label: "Embed",
        description: "Embed external content",
        keywords: &["embed", "link", "iframe", "video"],
    },
    BlockTypeOption {
        kind: BlockKind::Code,
        label: "Code",
        description: "Code block with syntax highlighting",
        keywords: &["code", "programming", "snippet"],
    },
];

/// Candidates matching `query`: case-insensitive substring over label,
/// description, and keywords — a hit in any field includes the option.
pub fn filter_options(query: &str) -> Vec<&'static BlockTypeOption> {
    let query = query.to_lowercase();
    BLOCK_TYPE_OPTIONS
        .iter()
        .filter(|option| {
            option.label.to_lowercase().contains(&query)
                || option.description.to_lowercase().contains(&query)
                || option.keywords.iter().any(|k| k.contains(&query))
        })
        .collect()
}

/// A detected slash trigger within a paragraph's text.
#[derive(Debug, Clone, PartialEq)]
pub struct SlashTrigger {
    /// Byte offset of the `/` character.
    pub slash_index: usize,
    /// Text typed between the slash and the cursor.
    pub query: String,
}

/// Detect a slash trigger in `text` with the cursor at byte offset
/// `cursor`. Triggers on a `/` at the start of the text or immediately
/// after whitespace; the query is whatever follows it up to the cursor.
pub fn detect_trigger(text: &str, cursor: usize) -> Option<SlashTrigger> {
    let cursor = cursor.min(text.len());
    if !text.is_char_boundary(cursor) {
        return None;
    }

    let before_cursor = &text[..cursor];
    let slash_index = before_cursor.rfind('/')?;
    let before_slash = &before_cursor[..slash_index];

    if slash_index == 0 || before_slash.chars().next_back().is_some_and(|c| c.is_whitespace()) {
        Some(SlashTrigger {
            slash_index,
            query: before_cursor[slash_index + 1..].to_string(),
        })
    } else {
        None
    }
}

/// Open slash menu over one paragraph block.
#[derive(Debug, Clone, PartialEq)]
pub struct SlashMenu {
    /// Block the trigger was typed into.
    pub block_id: String,
    /// Byte offset of the `/` in that block's text.
    pub slash_index: usize,
    /// Cursor position at the last edit; the trigger substring
    /// `slash_index..cursor` is removed on commit.
    pub cursor: usize,
    query: String,
    selected: usize,
}

impl SlashMenu {
    pub fn open(block_id: impl Into<String>, trigger: SlashTrigger, cursor: usize) -> Self {
        Self {
            block_id: block_id.into(),
            slash_index: trigger.slash_index,
            cursor,
            query: trigger.query,
            selected: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update from a re-detected trigger. The highlight resets whenever
    /// the query changes.
    pub fn update(&mut self, trigger: SlashTrigger, cursor: usize) {
        if trigger.query != self.query {
            self.selected = 0;
        }
        self.slash_index = trigger.slash_index;
        self.cursor = cursor;
        self.query = trigger.query;
    }

    pub fn filtered(&self) -> Vec<&'static BlockTypeOption> {
        filter_options(&self.query)
    }

    /// Currently highlighted candidate.
    pub fn highlighted(&self) -> Option<&'static BlockTypeOption> {
        let filtered = self.filtered();
        filtered.get(self.selected.min(filtered.len().saturating_sub(1))).copied()
    }

    /// Arrow-down: advance the highlight, wrapping.
    pub fn move_down(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Arrow-up: retreat the highlight, wrapping.
    pub fn move_up(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_any_field() {
        // "tab" hits Table via label and keyword, not Heading 1.
        let hits = filter_options("tab");
        assert!(hits.iter().any(|o| o.label == "Table"));
        assert!(!hits.iter().any(|o| o.label == "Heading 1"));

        // "video" hits Embed via its keyword list only.
        let hits = filter_options("video");
        assert!(hits.iter().any(|o| o.label == "Embed"));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let hits = filter_options("TABLE");
        assert!(hits.iter().any(|o| o.label == "Table"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert_eq!(filter_options("").len(), BLOCK_TYPE_OPTIONS.len());
    }

    #[test]
    fn test_trigger_at_start_and_after_whitespace() {
        assert_eq!(
            detect_trigger("/hea", 4),
            Some(SlashTrigger {
                slash_index: 0,
                query: "hea".into()
            })
        );
        assert_eq!(
            detect_trigger("note /ta", 8),
            Some(SlashTrigger {
                slash_index: 5,
                query: "ta".into()
            })
        );
        assert_eq!(
            detect_trigger("line\n/x", 7),
            Some(SlashTrigger {
                slash_index: 5,
                query: "x".into()
            })
        );
    }

    #[test]
    fn test_no_trigger_mid_word_or_without_slash() {
        assert_eq!(detect_trigger("a/b", 3), None);
        assert_eq!(detect_trigger("plain text", 5), None);
    }

    #[test]
    fn test_trigger_ignores_text_after_cursor() {
        // Cursor sits right after the slash; trailing text is not query.
        let trigger = detect_trigger("/ tail", 1).unwrap();
        assert_eq!(trigger.query, "");
    }

    #[test]
    fn test_navigation_wraps_modulo_filtered_len() {
        let trigger = detect_trigger("/heading", 8).unwrap();
        let mut menu = SlashMenu::open("block_1", trigger, 8);
        let len = menu.filtered().len();
        assert_eq!(len, 3); // Heading 1..3

        menu.move_up();
        assert_eq!(menu.highlighted().unwrap().label, "Heading 3");
        menu.move_down();
        menu.move_down();
        menu.move_down();
        menu.move_down();
        assert_eq!(menu.highlighted().unwrap().label, "Heading 1");
    }

    #[test]
    fn test_highlight_resets_when_query_changes() {
        let mut menu = SlashMenu::open("block_1", detect_trigger("/h", 2).unwrap(), 2);
        menu.move_down();
        assert_ne!(menu.highlighted().unwrap().label, "Paragraph");

        menu.update(detect_trigger("/he", 3).unwrap(), 3);
        assert_eq!(menu.highlighted().unwrap().label, "Heading 1");
    }

    #[test]
    fn test_empty_filter_has_no_highlight() {
        let menu = SlashMenu::open("block_1", detect_trigger("/zzzz", 5).unwrap(), 5);
        assert!(menu.filtered().is_empty());
        assert_eq!(menu.highlighted(), None);
    }
}
