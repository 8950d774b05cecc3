use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockKind};

/// An ordered sequence of blocks with a title, owned by exactly one
/// workspace. Pages form a forest: at most one parent, children ordered
/// by `order` within a parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    /// Rendering and storage order; never empty for a live page.
    pub blocks: Vec<Block>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub order: i64,
}

impl Page {
    /// Create a page seeded with one empty paragraph block.
    pub fn new(workspace_id: impl Into<String>, title: impl Into<String>, created_by: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: pagecraft_common::page_id(),
            workspace_id: workspace_id.into(),
            title: title.into(),
            blocks: vec![Block::new(BlockKind::Paragraph)],
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
            updated_by: None,
            is_public: false,
            icon: None,
            parent_id: None,
            order: 0,
        }
    }

    /// Nest this page under `parent_id` at `order` within the parent.
    pub fn with_parent(mut self, parent_id: impl Into<String>, order: i64) -> Self {
        self.parent_id = Some(parent_id.into());
        self.order = order;
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>, editor: impl Into<String>) {
        self.title = title.into();
        self.touch(editor);
    }

    /// Replace the block list with an editing session's result. An empty
    /// list is replaced by a single empty paragraph so a live page never
    /// has zero blocks.
    pub fn set_blocks(&mut self, blocks: Vec<Block>, editor: impl Into<String>) {
        self.blocks = if blocks.is_empty() {
            vec![Block::new(BlockKind::Paragraph)]
        } else {
            blocks
        };
        self.touch(editor);
    }

    fn touch(&mut self, editor: impl Into<String>) {
        self.updated_at = Utc::now();
        self.updated_by = Some(editor.into());
    }
}

/// Direct children of `parent_id`, ordered by `order`.
pub fn children_of<'a>(pages: &'a [Page], parent_id: &str) -> Vec<&'a Page> {
    let mut children: Vec<&Page> = pages
        .iter()
        .filter(|p| p.parent_id.as_deref() == Some(parent_id))
        .collect();
    children.sort_by_key(|p| p.order);
    children
}

/// Ids of every descendant of `page_id` (children, grandchildren, …),
/// excluding `page_id` itself. Backs cascade deletion.
pub fn descendant_ids(pages: &[Page], page_id: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut frontier = vec![page_id.to_string()];

    while let Some(current) = frontier.pop() {
        for page in pages.iter().filter(|p| p.parent_id.as_deref() == Some(current.as_str())) {
            result.push(page.id.clone());
            frontier.push(page.id.clone());
        }
    }

    result
}
