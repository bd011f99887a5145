//! # Busy Cue
//!
//! Visual "transform in flight" flag carried by the Output pane's container.
//! Acquiring it hands out a guard; dropping the guard clears the flag, so
//! every exit path of an invocation releases it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared busy flag
#[derive(Debug, Clone, Default)]
pub struct BusyCue {
    flag: Arc<AtomicBool>,
}

impl BusyCue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag and return the guard that clears it
    pub fn acquire(&self) -> BusyGuard {
        self.flag.store(true, Ordering::SeqCst);
        tracing::debug!("Busy cue acquired");
        BusyGuard {
            flag: Arc::clone(&self.flag),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Clears the busy flag when dropped
///
/// The flag is a plain boolean: with overlapping invocations the first guard
/// dropped clears it even if another invocation is still in flight.
#[derive(Debug)]
#[must_use = "dropping the guard releases the busy cue immediately"]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        tracing::debug!("Busy cue released");
    }
}
