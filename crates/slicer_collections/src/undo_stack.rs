use std::collections::VecDeque;

/// Default number of undo steps kept by an editing session.
pub const MAX_UNDO_STEPS: usize = 50;

/// A bounded LIFO history.
///
/// Pushing onto a full stack silently drops the oldest entry, so the stack
/// always holds the most recent `capacity` states.
#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> Default for UndoStack<T> {
    fn default() -> Self {
        Self::with_capacity(MAX_UNDO_STEPS)
    }
}

impl<T> UndoStack<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }

        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn peek(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
