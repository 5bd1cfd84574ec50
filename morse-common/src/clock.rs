// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Phase clock: the timer's fired-flag and the cadence gate.

use portable_atomic::{AtomicBool, Ordering};

/// One-bit semaphore set by the timer callback and cleared by the control loop.
///
/// Firings that land before the previous one is consumed collapse into one.
pub struct TickFlag {
    fired: AtomicBool,
}

impl TickFlag {
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Timer callback. Never blocks.
    pub fn on_tick(&self) {
        self.fired.store(true, Ordering::Release);
    }

    /// Read and clear in one step.
    pub fn take(&self) -> bool {
        self.fired.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Block until the next tick, calling `idle` between checks.
    ///
    /// `idle` is the platform's sleep primitive (`wfi`, `thread::park`); the
    /// caller does no work of its own between ticks.
    pub fn wait(&self, mut idle: impl FnMut()) {
        while !self.take() {
            idle();
        }
    }
}

impl Default for TickFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens once every `ticks_per_phase` ticks.
///
/// A plain modulo counter: a late tick delays one phase, it does not shorten
/// the next one.
#[derive(Debug, Clone)]
pub struct Cadence {
    ticks_per_phase: u32,
    elapsed: u32,
}

impl Cadence {
    /// `ticks_per_phase` of zero is treated as one.
    pub const fn new(ticks_per_phase: u32) -> Self {
        Self {
            ticks_per_phase: if ticks_per_phase == 0 { 1 } else { ticks_per_phase },
            elapsed: 0,
        }
    }

    /// Count one tick; `true` when a phase step is due.
    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.ticks_per_phase {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    /// Ticks counted toward the next step.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn ticks_per_phase(&self) -> u32 {
        self.ticks_per_phase
    }
}

/// Next alarm deadline for a fixed-rate tick, in timer microseconds.
///
/// Counts from the previous deadline so handler latency does not accumulate.
/// If the handler ran a full period late, restarts one period from `now_us`
/// instead of firing a burst of overdue ticks.
pub fn next_deadline(previous_us: u64, now_us: u64, period_us: u64) -> u64 {
    let next = previous_us.saturating_add(period_us);
    if next > now_us {
        next
    } else {
        now_us.saturating_add(period_us)
    }
}
