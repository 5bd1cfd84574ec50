// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Pending-transition latch written by the button callbacks.

use portable_atomic::{AtomicBool, Ordering};

/// Boolean latch, not a counter: any number of presses during one message
/// request a single transition.
pub struct TriggerLatch {
    pending: AtomicBool,
}

impl TriggerLatch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Button callback. Safe to call from several interrupt lines at once.
    pub fn on_trigger(&self) {
        self.pending.store(true, Ordering::Release);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consume the latch if set. Only the control loop calls this, and only
    /// at a message boundary.
    pub(crate) fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

impl Default for TriggerLatch {
    fn default() -> Self {
        Self::new()
    }
}
