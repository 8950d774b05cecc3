//! # Pagecraft Editor
//!
//! Per-page editing state machine for pagecraft documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host UI: keystrokes, drops, clicks          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorSession (this crate)          │
//! │  - permission-gated transitions             │
//! │  - Enter split / Backspace outdent-delete   │
//! │  - slash command menu                       │
//! │  - drag reorder, focus routing              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: block values + pure list ops      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One session per open page**: switching pages resets the whole
//!    session synchronously, never lazily during a render pass
//! 2. **Read-only means no-op**: a session without edit permission
//!    ignores every mutating transition instead of erroring
//! 3. **The list is never empty**: deleting the last block leaves one
//!    fresh empty paragraph

mod session;
mod slash;

pub use session::EditorSession;
pub use slash::{
    detect_trigger, filter_options, BlockTypeOption, SlashMenu, SlashTrigger, BLOCK_TYPE_OPTIONS,
};
