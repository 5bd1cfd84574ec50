// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Core logic for the two-LED Morse beacon.
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` mode for embedded targets
//! - `std` feature: Enables `std` support for the host simulator
//! - `embedded` feature: Enables the embedded-hal output driver and
//!   critical-section backed atomics for targets without CAS
//!
//! Interrupt handlers only touch [`SharedSignals`]; everything else is owned
//! by the control loop ([`Controller`]).

#![cfg_attr(not(feature = "std"), no_std)]

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod latch;
pub mod machine;
pub mod output;
pub mod pattern;
pub mod selftest;

pub use clock::{next_deadline, Cadence, TickFlag};
pub use config::{Timing, MAX_MESSAGES, SELF_TEST_CYCLES, TICKS_PER_PHASE, TICK_PERIOD_MS};
pub use controller::Controller;
pub use error::SetupError;
pub use latch::TriggerLatch;
pub use machine::{MessageMachine, MessageSet, Step};
pub use output::{OutputCombination, OutputDriver};
pub use pattern::{Message, Pattern, Span, OK, SOS};
pub use selftest::self_test;

/// The two one-bit flags shared between interrupt context and the control loop.
///
/// Lives in a `static` on the firmware; the timer callback calls
/// [`TickFlag::on_tick`], button callbacks call [`TriggerLatch::on_trigger`].
pub struct SharedSignals {
    pub tick: TickFlag,
    pub trigger: TriggerLatch,
}

impl SharedSignals {
    pub const fn new() -> Self {
        Self {
            tick: TickFlag::new(),
            trigger: TriggerLatch::new(),
        }
    }
}

impl Default for SharedSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Halt all forward progress after an unrecoverable setup failure.
///
/// No retry: a device with dark indicators is the failure signal.
pub fn fail_stop(mut idle: impl FnMut()) -> ! {
    loop {
        idle();
    }
}
