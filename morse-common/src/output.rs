// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Output driver for the two indicators (A and B).

/// The only four states the two indicators may be driven to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputCombination {
    /// A on, B off (dot).
    AOnly,
    /// B on, A off (dash).
    BOnly,
    Both,
    /// Gap between symbols, letters and words.
    #[default]
    Neither,
}

impl OutputCombination {
    /// Line levels as `(a, b)`.
    pub const fn levels(self) -> (bool, bool) {
        match self {
            Self::AOnly => (true, false),
            Self::BOnly => (false, true),
            Self::Both => (true, true),
            Self::Neither => (false, false),
        }
    }
}

/// Sink for output combinations.
///
/// Writes are unconditional and idempotent. A driver has no failure mode:
/// anything that can fail belongs to pin configuration, not here.
pub trait OutputDriver {
    fn apply(&mut self, output: OutputCombination);

    fn a_only(&mut self) {
        self.apply(OutputCombination::AOnly);
    }

    fn b_only(&mut self) {
        self.apply(OutputCombination::BOnly);
    }

    fn both(&mut self) {
        self.apply(OutputCombination::Both);
    }

    fn neither(&mut self) {
        self.apply(OutputCombination::Neither);
    }
}

impl<T: OutputDriver + ?Sized> OutputDriver for &mut T {
    fn apply(&mut self, output: OutputCombination) {
        (**self).apply(output);
    }
}

#[cfg(feature = "embedded")]
pub use pins::PinPair;

#[cfg(feature = "embedded")]
mod pins {
    use super::{OutputCombination, OutputDriver};
    use embedded_hal::digital::{OutputPin, PinState};

    /// Drives two active-high GPIO outputs.
    pub struct PinPair<A, B> {
        a: A,
        b: B,
    }

    impl<A: OutputPin, B: OutputPin> PinPair<A, B> {
        /// Takes ownership of both pins and switches them off.
        pub fn new(a: A, b: B) -> Self {
            let mut pair = Self { a, b };
            pair.neither();
            pair
        }
    }

    impl<A: OutputPin, B: OutputPin> OutputDriver for PinPair<A, B> {
        fn apply(&mut self, output: OutputCombination) {
            let (a, b) = output.levels();
            self.a.set_state(PinState::from(a)).ok();
            self.b.set_state(PinState::from(b)).ok();
        }
    }
}
