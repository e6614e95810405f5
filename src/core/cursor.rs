use serde::{Deserialize, Serialize};

/// Direction of a cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards lower indices (conventionally left).
    Decrease,
    /// Towards higher indices (conventionally right).
    Increase,
}

impl Direction {
    pub fn delta(self) -> i64 {
        match self {
            Self::Decrease => -1,
            Self::Increase => 1,
        }
    }
}

/// Keyboard highlight over the currently visible choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    index: Option<usize>,
    len: usize,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the selection and track a new choice list of `len` entries.
    pub fn reset(&mut self, len: usize) {
        self.index = None;
        self.len = len;
    }

    /// Clear the selection, keeping the current list.
    pub fn clear(&mut self) {
        self.index = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move with wraparound. From no selection, increasing lands on the
    /// first entry and decreasing on the last. No-op on an empty list.
    pub fn move_by(&mut self, direction: Direction) -> Option<usize> {
        if self.len == 0 {
            return None;
        }

        let len = self.len as i64;
        let current = match (self.index, direction) {
            (Some(i), _) => i as i64,
            (None, Direction::Increase) => -1,
            (None, Direction::Decrease) => 0,
        };
        let next = (current + direction.delta() + len).rem_euclid(len) as usize;
        self.index = Some(next);
        self.index
    }
}
