// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

use core::fmt;

/// Rejected configuration, reported before the control loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    EmptyMessageSet,
    /// More messages than `MAX_MESSAGES`.
    TooManyMessages,
    /// Index of the offending pattern in the requested set.
    MalformedPattern(usize),
    ZeroPeriod,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessageSet => write!(f, "message set is empty"),
            Self::TooManyMessages => write!(f, "message set exceeds capacity"),
            Self::MalformedPattern(index) => write!(f, "pattern {index} is malformed"),
            Self::ZeroPeriod => write!(f, "tick period and ticks per phase must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SetupError {}
