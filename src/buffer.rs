//! Swappable handle to the sequence the player is executing.
//!
//! The input side builds a complete [`OperationSequence`] off to the side and
//! publishes it with a single atomic pointer swap. Readers load an `Arc` to
//! whichever sequence was current at that instant and keep it alive for as
//! long as they hold it, so a half-written sequence is never observable.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use parking_lot::{Condvar, Mutex};

use crate::sequence::OperationSequence;

/// The single handoff point between compiler output and player input.
pub struct PatternBuffer {
    active: ArcSwap<OperationSequence>,
    // Only used to park an idle player; readers of `active` never lock it.
    installed: Mutex<()>,
    wakeup: Condvar,
}

impl PatternBuffer {
    /// Creates a buffer holding the idle sequence.
    pub fn new() -> Self {
        Self::with_sequence(OperationSequence::idle())
    }

    /// Creates a buffer holding `sequence`.
    pub fn with_sequence(sequence: OperationSequence) -> Self {
        Self {
            active: ArcSwap::from_pointee(sequence),
            installed: Mutex::new(()),
            wakeup: Condvar::new(),
        }
    }

    /// Publishes `sequence` as the active one. Safe while the player runs.
    pub fn install(&self, sequence: OperationSequence) {
        tracing::debug!(
            operations = sequence.len(),
            is_static = sequence.is_static(),
            "installing sequence"
        );
        self.active.store(Arc::new(sequence));
        self.wake_all();
    }

    /// Wakes every thread blocked in [`wait_for_install`](Self::wait_for_install).
    pub fn wake_all(&self) {
        let _guard = self.installed.lock();
        self.wakeup.notify_all();
    }

    /// Blocks until the active sequence is no longer `current`, a
    /// [`wake_all`](Self::wake_all), or `timeout`.
    ///
    /// Returns true if a different sequence is active.
    pub fn wait_for_install(&self, current: &Arc<OperationSequence>, timeout: Duration) -> bool {
        let mut guard = self.installed.lock();
        if Arc::ptr_eq(&self.active.load(), current) {
            self.wakeup.wait_for(&mut guard, timeout);
        }
        !Arc::ptr_eq(&self.active.load(), current)
    }

    /// Returns the active sequence. Wait-free.
    ///
    /// Compare successive results with [`Arc::ptr_eq`] to detect an install.
    pub fn load(&self) -> Arc<OperationSequence> {
        self.active.load_full()
    }

    /// Returns true if the active sequence contains no pause.
    pub fn is_static(&self) -> bool {
        self.active.load().is_static()
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for PatternBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PatternBuffer")
            .field("active", &*self.active.load())
            .finish()
    }
}
