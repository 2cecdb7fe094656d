//! Re-entrancy protection for the logging critical section.
//!
//! Each [`crate::Sentinel`] owns one guard. Entering records the current thread as owner;
//! a second entry from the same thread (a sink that logs, a panic raised mid-write)
//! is refused instead of recursing. Other threads wait for the section, which also keeps
//! records in call order on every sink.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

#[derive(Debug, Default)]
pub struct RecursionGuard {
    owner: Mutex<Option<ThreadId>>,
    section: Mutex<()>,
}

/// Held while a record is being routed. Dropping it clears the owner, including
/// when the section unwinds.
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a RecursionGuard,
    _section: MutexGuard<'a, ()>,
}

impl RecursionGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when the calling thread is already inside the section.
    #[must_use]
    pub fn enter(&self) -> Option<GuardToken<'_>> {
        let me = thread::current().id();
        if self.owner() == Some(me) {
            return None;
        }

        let section = self.section.lock().unwrap_or_else(PoisonError::into_inner);
        *self.owner.lock().unwrap_or_else(PoisonError::into_inner) = Some(me);
        Some(GuardToken {
            guard: self,
            _section: section,
        })
    }

    /// Whether any thread currently holds the section.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.owner().is_some()
    }

    #[must_use]
    pub fn is_held_by_current_thread(&self) -> bool {
        self.owner() == Some(thread::current().id())
    }

    fn owner(&self) -> Option<ThreadId> {
        *self.owner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        *self.guard.owner.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
