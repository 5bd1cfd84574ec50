// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Phase-to-output tables for each message.
//!
//! A dot is a single lit phase on A, a dash three lit phases on B. One dark
//! phase separates symbols, three separate letters, and the tail of each
//! table is the gap between words. Phase 0 is never displayed: the machine
//! increments before it looks up, so phase 1 is the first lit phase.

use crate::output::OutputCombination;

/// Inclusive run of phases sharing one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Span {
    pub first: u16,
    pub last: u16,
    pub output: OutputCombination,
}

impl Span {
    pub const fn new(first: u16, last: u16, output: OutputCombination) -> Self {
        Self {
            first,
            last,
            output,
        }
    }

    const fn dot(phase: u16) -> Self {
        Self::new(phase, phase, OutputCombination::AOnly)
    }

    const fn dash(first: u16) -> Self {
        Self::new(first, first + 2, OutputCombination::BOnly)
    }

    pub const fn contains(&self, phase: u16) -> bool {
        self.first <= phase && phase <= self.last
    }
}

/// One message as data: its length in phases and its lit spans.
#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub length: u16,
    spans: &'static [Span],
}

impl Pattern {
    pub const fn new(name: &'static str, length: u16, spans: &'static [Span]) -> Self {
        Self {
            name,
            length,
            spans,
        }
    }

    pub fn spans(&self) -> &'static [Span] {
        self.spans
    }

    /// Output for `phase`. Every phase outside a span is dark.
    pub fn lookup(&self, phase: u16) -> OutputCombination {
        self.spans
            .iter()
            .find(|span| span.contains(phase))
            .map_or(OutputCombination::Neither, |span| span.output)
    }

    /// Spans are ordered, disjoint, lit, and inside `1..=length`.
    pub fn is_well_formed(&self) -> bool {
        if self.length == 0 {
            return false;
        }
        let mut previous_last = 0u16;
        for span in self.spans {
            if span.first == 0
                || span.first <= previous_last
                || span.first > span.last
                || span.last > self.length
                || span.output == OutputCombination::Neither
            {
                return false;
            }
            previous_last = span.last;
        }
        true
    }
}

/// `... --- ...` followed by the word gap.
pub static SOS: Pattern = Pattern::new(
    "SOS",
    34,
    &[
        Span::dot(1),
        Span::dot(3),
        Span::dot(5),
        Span::dash(9),
        Span::dash(13),
        Span::dash(17),
        Span::dot(23),
        Span::dot(25),
        Span::dot(27),
    ],
);

/// `--- -.-` followed by the word gap.
pub static OK: Pattern = Pattern::new(
    "OK",
    30,
    &[
        Span::dash(1),
        Span::dash(5),
        Span::dash(9),
        Span::dash(15),
        Span::dot(19),
        Span::dash(21),
    ],
);

/// The built-in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    Sos,
    Ok,
}

impl Message {
    pub const ALL: [Self; 2] = [Self::Sos, Self::Ok];

    pub fn pattern(self) -> &'static Pattern {
        match self {
            Self::Sos => &SOS,
            Self::Ok => &OK,
        }
    }
}
