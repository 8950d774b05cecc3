use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::edit::BlockEdit;

/// Block type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletList,
    NumberedList,
    Image,
    Table,
    Embed,
    Code,
}

impl BlockKind {
    /// Whether this kind carries plain text `content` that survives
    /// conversion to another text-bearing kind.
    pub fn is_text_bearing(&self) -> bool {
        matches!(
            self,
            BlockKind::Paragraph
                | BlockKind::Heading1
                | BlockKind::Heading2
                | BlockKind::Heading3
                | BlockKind::BulletList
                | BlockKind::NumberedList
        )
    }
}

/// One cell of a table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub content: String,
}

impl TableCell {
    pub fn empty() -> Self {
        Self {
            content: String::new(),
        }
    }
}

/// One row of a table block. All rows of a table hold the same number of
/// cells (rectangular invariant, maintained by `BlockEdit`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn empty(width: usize) -> Self {
        Self {
            cells: (0..width).map(|_| TableCell::empty()).collect(),
        }
    }
}

/// Embed provider, derived from the embed url.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedKind {
    Youtube,
    Vimeo,
    Generic,
}

/// Detect embed provider from a url.
pub fn detect_embed_kind(url: &str) -> EmbedKind {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        EmbedKind::Youtube
    } else if url.contains("vimeo.com") {
        EmbedKind::Vimeo
    } else {
        EmbedKind::Generic
    }
}

/// Language tag for code blocks. Drives syntax highlighting in the host
/// renderer; the engine only needs the closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Cpp,
    Csharp,
    Go,
    Rust,
    Php,
    Ruby,
    Swift,
    Kotlin,
    Html,
    Css,
    Sql,
    Bash,
    Json,
    Yaml,
    Markdown,
    PlainText,
}

impl CodeLanguage {
    pub const ALL: [CodeLanguage; 20] = [
        CodeLanguage::JavaScript,
        CodeLanguage::TypeScript,
        CodeLanguage::Python,
        CodeLanguage::Java,
        CodeLanguage::Cpp,
        CodeLanguage::Csharp,
        CodeLanguage::Go,
        CodeLanguage::Rust,
        CodeLanguage::Php,
        CodeLanguage::Ruby,
        CodeLanguage::Swift,
        CodeLanguage::Kotlin,
        CodeLanguage::Html,
        CodeLanguage::Css,
        CodeLanguage::Sql,
        CodeLanguage::Bash,
        CodeLanguage::Json,
        CodeLanguage::Yaml,
        CodeLanguage::Markdown,
        CodeLanguage::PlainText,
    ];

    /// Human-readable label for language pickers.
    pub fn label(&self) -> &'static str {
        match self {
            CodeLanguage::JavaScript => "JavaScript",
            CodeLanguage::TypeScript => "TypeScript",
            CodeLanguage::Python => "Python",
            CodeLanguage::Java => "Java",
            CodeLanguage::Cpp => "C++",
            CodeLanguage::Csharp => "C#",
            CodeLanguage::Go => "Go",
            CodeLanguage::Rust => "Rust",
            CodeLanguage::Php => "PHP",
            CodeLanguage::Ruby => "Ruby",
            CodeLanguage::Swift => "Swift",
            CodeLanguage::Kotlin => "Kotlin",
            CodeLanguage::Html => "HTML",
            CodeLanguage::Css => "CSS",
            CodeLanguage::Sql => "SQL",
            CodeLanguage::Bash => "Bash",
            CodeLanguage::Json => "JSON",
            CodeLanguage::Yaml => "YAML",
            CodeLanguage::Markdown => "Markdown",
            CodeLanguage::PlainText => "Plain Text",
        }
    }
}

impl Default for CodeLanguage {
    fn default() -> Self {
        CodeLanguage::JavaScript
    }
}

/// Variant payload of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockContent {
    Paragraph {
        content: String,
    },
    Heading1 {
        content: String,
    },
    Heading2 {
        content: String,
    },
    Heading3 {
        content: String,
    },
    BulletList {
        content: String,
    },
    NumberedList {
        content: String,
    },
    Image {
        url: String,
        alt: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Table {
        rows: Vec<TableRow>,
        has_header: bool,
    },
    Embed {
        url: String,
        embed_type: EmbedKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Code {
        code: String,
        language: CodeLanguage,
    },
}

impl BlockContent {
    /// Default payload for a freshly created block of `kind`.
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Paragraph => BlockContent::Paragraph {
                content: String::new(),
            },
            BlockKind::Heading1 => BlockContent::Heading1 {
                content: String::new(),
            },
            BlockKind::Heading2 => BlockContent::Heading2 {
                content: String::new(),
            },
            BlockKind::Heading3 => BlockContent::Heading3 {
                content: String::new(),
            },
            BlockKind::BulletList => BlockContent::BulletList {
                content: String::new(),
            },
            BlockKind::NumberedList => BlockContent::NumberedList {
                content: String::new(),
            },
            // Empty url renders as the "pick an image" placeholder
            BlockKind::Image => BlockContent::Image {
                url: String::new(),
                alt: String::new(),
                caption: None,
            },
            BlockKind::Table => BlockContent::Table {
                rows: vec![TableRow::empty(2), TableRow::empty(2)],
                has_header: true,
            },
            BlockKind::Embed => BlockContent::Embed {
                url: String::new(),
                embed_type: EmbedKind::Generic,
                title: None,
            },
            BlockKind::Code => BlockContent::Code {
                code: String::new(),
                language: CodeLanguage::default(),
            },
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Paragraph { .. } => BlockKind::Paragraph,
            BlockContent::Heading1 { .. } => BlockKind::Heading1,
            BlockContent::Heading2 { .. } => BlockKind::Heading2,
            BlockContent::Heading3 { .. } => BlockKind::Heading3,
            BlockContent::BulletList { .. } => BlockKind::BulletList,
            BlockContent::NumberedList { .. } => BlockKind::NumberedList,
            BlockContent::Image { .. } => BlockKind::Image,
            BlockContent::Table { .. } => BlockKind::Table,
            BlockContent::Embed { .. } => BlockKind::Embed,
            BlockContent::Code { .. } => BlockKind::Code,
        }
    }

    /// Plain text of a text-bearing variant, `None` otherwise.
    pub fn text(&self) -> Option<&str> {
        match self {
            BlockContent::Paragraph { content }
            | BlockContent::Heading1 { content }
            | BlockContent::Heading2 { content }
            | BlockContent::Heading3 { content }
            | BlockContent::BulletList { content }
            | BlockContent::NumberedList { content } => Some(content),
            _ => None,
        }
    }

    fn with_text(kind: BlockKind, content: String) -> Option<Self> {
        match kind {
            BlockKind::Paragraph => Some(BlockContent::Paragraph { content }),
            BlockKind::Heading1 => Some(BlockContent::Heading1 { content }),
            BlockKind::Heading2 => Some(BlockContent::Heading2 { content }),
            BlockKind::Heading3 => Some(BlockContent::Heading3 { content }),
            BlockKind::BulletList => Some(BlockContent::BulletList { content }),
            BlockKind::NumberedList => Some(BlockContent::NumberedList { content }),
            _ => None,
        }
    }
}

/// One unit of page content: a stable id plus a typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Opaque unique id, stable for the block's lifetime (conversions
    /// keep it so focus and drag tracking survive).
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub content: BlockContent,
}

impl Block {
    /// Create a new block of `kind` with a fresh id and default payload.
    pub fn new(kind: BlockKind) -> Self {
        let now = Utc::now();
        Self {
            id: pagecraft_common::block_id(),
            created_at: now,
            updated_at: now,
            content: BlockContent::default_for(kind),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    /// Plain text of a text-bearing block, `None` otherwise.
    pub fn text(&self) -> Option<&str> {
        self.content.text()
    }

    /// Apply a typed edit, returning the updated block value.
    ///
    /// The input is left untouched. `updated_at` is refreshed only when
    /// the edit actually applies; an edit whose shape does not match this
    /// block's variant returns an unchanged copy.
    pub fn with(&self, edit: BlockEdit) -> Block {
        let mut next = self.clone();
        if edit.apply(&mut next.content) {
            next.updated_at = Utc::now();
        }
        next
    }

    /// Convert this block to `new_kind`, reusing the same id.
    ///
    /// Plain text is carried over when and only when both the source and
    /// destination kinds are text-bearing; any other conversion starts
    /// from the destination kind's default payload. Never fails.
    pub fn convert(&self, new_kind: BlockKind) -> Block {
        let mut next = Block::new(new_kind);
        next.id = self.id.clone();

        if self.kind().is_text_bearing() && new_kind.is_text_bearing() {
            let text = self.text().unwrap_or_default().to_string();
            if let Some(content) = BlockContent::with_text(new_kind, text) {
                next.content = content;
            }
        }

        next
    }
}
