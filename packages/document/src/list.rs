//! Pure operations on a page's block list.
//!
//! Every function returns a new list and leaves its input untouched;
//! these back the interactive transitions in the editor crate. Unknown
//! ids and out-of-range indices are no-ops or `None`, never panics.

use crate::block::{Block, BlockKind};

/// Insert `block` at `index`. An index past the end appends.
pub fn insert_block_at(blocks: &[Block], index: usize, block: Block) -> Vec<Block> {
    let mut next = blocks.to_vec();
    let at = index.min(next.len());
    next.insert(at, block);
    next
}

/// Remove the block with `block_id`.
///
/// The result may be empty; the editing session owns the never-empty
/// fallback because only it knows the intended replacement type.
pub fn remove_block(blocks: &[Block], block_id: &str) -> Vec<Block> {
    blocks.iter().filter(|b| b.id != block_id).cloned().collect()
}

/// Move the block at `from` so it ends up at `to`, preserving the
/// relative order of every other block. Backs drag-reorder.
pub fn move_block(blocks: &[Block], from: usize, to: usize) -> Vec<Block> {
    let mut next = blocks.to_vec();
    if from >= next.len() {
        return next;
    }
    let moved = next.remove(from);
    let at = to.min(next.len());
    next.insert(at, moved);
    next
}

/// Index of the block with `block_id`, `None` if absent. Absence is a
/// caller error condition, not an expected state.
pub fn find_block_index(blocks: &[Block], block_id: &str) -> Option<usize> {
    blocks.iter().position(|b| b.id == block_id)
}

/// Displayed number of the numbered-list block at `index`, 1-based
/// within its contiguous run; `None` when the block at `index` is not a
/// numbered-list item.
///
/// Numbering is derived from the live list on every call: a run is a
/// maximal contiguous sequence of numbered-list blocks, and each run
/// restarts at 1.
pub fn list_number_at(blocks: &[Block], index: usize) -> Option<usize> {
    if blocks.get(index)?.kind() != BlockKind::NumberedList {
        return None;
    }

    let mut start = index;
    while start > 0 && blocks[start - 1].kind() == BlockKind::NumberedList {
        start -= 1;
    }
    Some(index - start + 1)
}
