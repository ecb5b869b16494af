//! Drill-down navigation: remembers the option lists shown before each level.

use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};

/// Stack of previously displayed option lists. Empty means root level.
#[derive(Debug, Clone)]
pub struct NavigationStack<T> {
    levels: Vec<T>,
}

impl<T> Default for NavigationStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NavigationStack<T> {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Remember `current` before drilling into a nested level.
    pub fn push_level(&mut self, current: T) {
        self.levels.push(current);
        trace!(depth = self.levels.len(), "push_level");
    }

    /// Restore the list shown before the last drill-down.
    ///
    /// # Errors
    /// `EmptyStack` when already at root level; callers should guard with
    /// `is_at_root`.
    pub fn pop_level(&mut self) -> DomainResult<T> {
        let previous = self.levels.pop().ok_or(DomainError::EmptyStack)?;
        trace!(depth = self.levels.len(), "pop_level");
        Ok(previous)
    }

    pub fn is_at_root(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of levels below the root currently drilled into.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_pushed_levels_when_popping_then_restores_in_reverse_order() {
        let mut stack = NavigationStack::new();
        assert!(stack.is_at_root());

        stack.push_level("root");
        stack.push_level("fruit");
        assert_eq!(stack.depth(), 2);

        assert_eq!(stack.pop_level(), Ok("fruit"));
        assert_eq!(stack.pop_level(), Ok("root"));
        assert!(stack.is_at_root());
    }

    #[test]
    fn given_empty_stack_when_popping_then_empty_stack_error() {
        let mut stack: NavigationStack<Vec<u8>> = NavigationStack::default();
        assert_eq!(stack.pop_level(), Err(DomainError::EmptyStack));
    }

    #[test]
    fn given_levels_when_clearing_then_back_at_root() {
        let mut stack = NavigationStack::new();
        stack.push_level(1);
        stack.clear();
        assert!(stack.is_at_root());
    }
}
