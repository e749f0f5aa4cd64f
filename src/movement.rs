//! Player locomotion lock shared by every inspectable item.

use std::cell::Cell;
use std::rc::Rc;

/// Counts how many things currently want the player to stand still.
///
/// Clones share the same counter. The player controller asks
/// [`MovementLock::is_locked`] each frame; items hold a [`MovementGuard`]
/// for as long as they are being inspected.
#[derive(Debug, Clone, Default)]
pub struct MovementLock {
    holders: Rc<Cell<usize>>,
}

impl MovementLock {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "the lock is released as soon as the guard is dropped"]
    pub fn acquire(&self) -> MovementGuard {
        self.holders.set(self.holders.get() + 1);
        MovementGuard {
            holders: Rc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.get()
    }
}

/// Keeps the player frozen until dropped.
#[derive(Debug)]
pub struct MovementGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for MovementGuard {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
    }
}
