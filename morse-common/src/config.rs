// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Timing constants.

use crate::error::SetupError;

/// Period of the timer interrupt.
pub const TICK_PERIOD_MS: u32 = 100;
/// Ticks per displayed phase (500 ms per phase).
pub const TICKS_PER_PHASE: u32 = 5;
/// Both-on / both-off flashes before the first message.
pub const SELF_TEST_CYCLES: u32 = 3;
/// Capacity of a [`MessageSet`](crate::MessageSet).
pub const MAX_MESSAGES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub tick_period_ms: u32,
    pub ticks_per_phase: u32,
}

impl Timing {
    pub const DEFAULT: Self = Self {
        tick_period_ms: TICK_PERIOD_MS,
        ticks_per_phase: TICKS_PER_PHASE,
    };

    pub fn validate(self) -> Result<Self, SetupError> {
        if self.tick_period_ms == 0 || self.ticks_per_phase == 0 {
            return Err(SetupError::ZeroPeriod);
        }
        Ok(self)
    }

    /// Duration of one displayed phase.
    pub fn phase_period_ms(self) -> u32 {
        self.tick_period_ms.saturating_mul(self.ticks_per_phase)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}
