//! Drag-and-drop reordering.
//!
//! A reorder is a stable single-element move: the element at `from` is
//! removed and reinserted at `to`, and every other element keeps its
//! relative order. For task lists the move is followed by a full priority
//! recomputation, so list position is the primary way to edit priority.
//!
//! ```text
//! [A, B, C, D]  --move(0 -> 3)-->  [B, C, D, A]
//!  1  2  3  4                       1  2  3  4
//! ```

use tracing::debug;

use super::{Priority, Task};
use crate::error::ReorderError;

/// Number of priority tiers positions are mapped onto.
pub const TIER_COUNT: usize = 4;

/// Move the element at `from` to `to`, preserving the order of the rest.
///
/// Returns a new vector; `items` is untouched, including on error.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, ReorderError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(ReorderError::InvalidIndex { index, len });
        }
    }

    let mut moved = items.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Ok(moved)
}

/// Priority tier for the element at `position` in a list of `len` elements.
///
/// The first quarter of the list maps to tier 1, the next to tier 2 and so
/// on: `clamp(ceil((p + 1) / (len / 4)), 1, 4)`. Lists shorter than four get
/// one element per tier. Computed as `ceil(4 (p + 1) / len)` in integers,
/// which is the same quantity without floating point rounding.
pub fn tier_for_position(position: usize, len: usize) -> Priority {
    if len < TIER_COUNT {
        return Priority::clamped(position + 1);
    }
    let scaled = (position + 1) * TIER_COUNT;
    Priority::clamped(scaled.div_ceil(len))
}

/// Overwrite every task's priority from its current position.
pub fn assign_priorities(tasks: &mut [Task]) {
    let len = tasks.len();
    for (position, task) in tasks.iter_mut().enumerate() {
        task.priority = tier_for_position(position, len);
    }
}

/// Apply a drag-and-drop move and recompute every priority.
///
/// `from == to` is a no-op apart from the recomputation. Out-of-range
/// indices fail with [`ReorderError::InvalidIndex`].
pub fn reorder(tasks: &[Task], from: usize, to: usize) -> Result<Vec<Task>, ReorderError> {
    let mut reordered = move_item(tasks, from, to)?;
    assign_priorities(&mut reordered);
    debug!(from, to, len = reordered.len(), "reordered task list");
    Ok(reordered)
}
