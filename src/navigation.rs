use crate::types::Side;

/// Tracks the current conflict and the tentatively selected side.
///
/// The cursor does not own the region list; transitions that depend on it
/// take the current region count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConflictCursor {
    pub index: usize,
    pub side: Side,
}

impl ConflictCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the first conflict with the top side selected.
    pub fn reset(&mut self) {
        self.index = 0;
        self.side = Side::Top;
    }

    pub fn select_top(&mut self) {
        self.side = Side::Top;
    }

    pub fn select_bottom(&mut self) {
        self.side = Side::Bottom;
    }

    /// Move to the next conflict. Saturates at the last one.
    pub fn next_conflict(&mut self, count: usize) -> bool {
        if self.index + 1 >= count {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move to the previous conflict. Saturates at zero.
    pub fn previous_conflict(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Keep the index valid after the region list was replaced.
    pub fn clamp(&mut self, count: usize) {
        if count == 0 {
            self.index = 0;
        } else if self.index > count - 1 {
            self.index = count - 1;
        }
    }
}
