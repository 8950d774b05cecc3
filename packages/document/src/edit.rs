//! # Block Edits
//!
//! Typed update operations applied to a single block.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each edit names a semantic operation, not a
//!    field diff
//! 2. **Shape-checked**: an edit only applies to the variant it targets;
//!    a mismatch is an identity no-op, never an error
//! 3. **Invariant-keeping**: table edits maintain the rectangular
//!    invariant and refuse to drop the last row or column

use serde::{Deserialize, Serialize};

use crate::block::{detect_embed_kind, BlockContent, CodeLanguage, TableRow};

/// Semantic edit on a single block's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum BlockEdit {
    /// Replace the plain text of a text-bearing block.
    SetText { content: String },

    /// Replace image fields. Url left empty keeps the block in its
    /// placeholder state.
    SetImage {
        url: String,
        alt: String,
        caption: Option<String>,
    },

    /// Replace the embed url; the provider is re-derived from it.
    SetEmbedUrl { url: String },

    /// Set or clear the embed title.
    SetEmbedTitle { title: Option<String> },

    /// Replace the source text of a code block.
    SetCode { code: String },

    /// Change the code block language tag.
    SetLanguage { language: CodeLanguage },

    /// Insert a two-space indent at `cursor` (Tab inside a code block).
    InsertIndent { cursor: usize },

    /// Replace one table cell's content.
    SetCell {
        row: usize,
        col: usize,
        content: String,
    },

    /// Append a row of empty cells matching the current column count.
    AddRow,

    /// Append an empty cell to every row.
    AddColumn,

    /// Remove the row at `row`; refused when it is the last row.
    RemoveRow { row: usize },

    /// Remove the column at `col` from every row; refused when it is the
    /// last column.
    RemoveColumn { col: usize },

    /// Mark or unmark the first row as a header row.
    SetHeader { has_header: bool },
}

impl BlockEdit {
    /// Apply this edit to a payload in place. Returns whether anything
    /// was applied; a shape mismatch leaves the payload untouched.
    pub(crate) fn apply(&self, content: &mut BlockContent) -> bool {
        match (self, content) {
            (
                BlockEdit::SetText { content: text },
                BlockContent::Paragraph { content }
                | BlockContent::Heading1 { content }
                | BlockContent::Heading2 { content }
                | BlockContent::Heading3 { content }
                | BlockContent::BulletList { content }
                | BlockContent::NumberedList { content },
            ) => {
                *content = text.clone();
                true
            }

            (
                BlockEdit::SetImage { url, alt, caption },
                BlockContent::Image {
                    url: u,
                    alt: a,
                    caption: c,
                },
            ) => {
                *u = url.clone();
                *a = alt.clone();
                *c = caption.clone();
                true
            }

            (
                BlockEdit::SetEmbedUrl { url },
                BlockContent::Embed {
                    url: u, embed_type, ..
                },
            ) => {
                *embed_type = detect_embed_kind(url);
                *u = url.clone();
                true
            }

            (BlockEdit::SetEmbedTitle { title }, BlockContent::Embed { title: t, .. }) => {
                *t = title.clone();
                true
            }

            (BlockEdit::SetCode { code }, BlockContent::Code { code: c, .. }) => {
                *c = code.clone();
                true
            }

            (BlockEdit::SetLanguage { language }, BlockContent::Code { language: l, .. }) => {
                *l = *language;
                true
            }

            (BlockEdit::InsertIndent { cursor }, BlockContent::Code { code, .. }) => {
                let at = (*cursor).min(code.len());
                if !code.is_char_boundary(at) {
                    return false;
                }
                code.insert_str(at, "  ");
                true
            }

            (BlockEdit::SetCell { row, col, content }, BlockContent::Table { rows, .. }) => {
                match rows.get_mut(*row).and_then(|r| r.cells.get_mut(*col)) {
                    Some(cell) => {
                        cell.content = content.clone();
                        true
                    }
                    None => false,
                }
            }

            (BlockEdit::AddRow, BlockContent::Table { rows, .. }) => {
                let width = rows.first().map(|r| r.cells.len()).unwrap_or(2);
                rows.push(TableRow::empty(width));
                true
            }

            (BlockEdit::AddColumn, BlockContent::Table { rows, .. }) => {
                for row in rows.iter_mut() {
                    row.cells.push(crate::block::TableCell::empty());
                }
                true
            }

            (BlockEdit::RemoveRow { row }, BlockContent::Table { rows, .. }) => {
                if rows.len() > 1 && *row < rows.len() {
                    rows.remove(*row);
                    true
                } else {
                    false
                }
            }

            (BlockEdit::RemoveColumn { col }, BlockContent::Table { rows, .. }) => {
                let width = rows.first().map(|r| r.cells.len()).unwrap_or(0);
                if width > 1 && *col < width {
                    for row in rows.iter_mut() {
                        row.cells.remove(*col);
                    }
                    true
                } else {
                    false
                }
            }

            (BlockEdit::SetHeader { has_header }, BlockContent::Table { has_header: h, .. }) => {
                *h = *has_header;
                true
            }

            _ => false,
        }
    }
}
