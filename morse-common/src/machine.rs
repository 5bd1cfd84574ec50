// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Message state machine.
//!
//! Each step advances the phase, drives the current message's output, and
//! at a message boundary either restarts the message or, if a trigger was
//! latched during it, moves to the next message of the set. A press never
//! cuts a message short.

use crate::{
    config::MAX_MESSAGES,
    error::SetupError,
    latch::TriggerLatch,
    output::{OutputCombination, OutputDriver},
    pattern::{Message, Pattern},
};
use heapless::Vec;

const _: () = assert!(Message::ALL.len() <= MAX_MESSAGES);

/// Ordered cycle of messages a trigger walks through.
#[derive(Debug, Clone)]
pub struct MessageSet {
    patterns: Vec<&'static Pattern, MAX_MESSAGES>,
}

impl MessageSet {
    pub fn new(patterns: &[&'static Pattern]) -> Result<Self, SetupError> {
        if patterns.is_empty() {
            return Err(SetupError::EmptyMessageSet);
        }
        if let Some(index) = patterns.iter().position(|p| !p.is_well_formed()) {
            return Err(SetupError::MalformedPattern(index));
        }
        let patterns = Vec::from_slice(patterns).map_err(|()| SetupError::TooManyMessages)?;
        Ok(Self { patterns })
    }

    /// SOS, then OK.
    pub fn builtin() -> Self {
        let patterns = Vec::from_slice(&Message::ALL.map(Message::pattern)).unwrap_or_default();
        debug_assert_eq!(patterns.len(), Message::ALL.len());
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static Pattern> {
        self.patterns.get(index).copied()
    }

    fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.patterns.len()
    }
}

impl Default for MessageSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// What one step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Phase that was displayed (before any wrap to 0).
    pub phase: u16,
    pub output: OutputCombination,
    pub message_ended: bool,
    pub transitioned: bool,
}

/// Boundary condition observed after advancing.
#[derive(Clone, Copy)]
enum FsmEvent {
    Advanced,
    MessageEnded,
    MessageEndedWithTrigger,
}

/// Change to apply for an event.
#[derive(Clone, Copy)]
enum FsmAction {
    None,
    Restart,
    SwitchMessage,
}

pub struct MessageMachine {
    messages: MessageSet,
    active: usize,
    phase: u16,
    length: u16,
}

impl MessageMachine {
    /// Starts on SOS, phase 0.
    pub fn new() -> Self {
        Self::with_messages(MessageSet::builtin())
    }

    /// Starts on the first message of `messages`, phase 0.
    pub fn with_messages(messages: MessageSet) -> Self {
        let length = messages.get(0).map_or(0, |p| p.length);
        Self {
            messages,
            active: 0,
            phase: 0,
            length,
        }
    }

    /// Current phase, always within `0..=length`.
    pub fn phase(&self) -> u16 {
        self.phase
    }

    /// Length of the active message.
    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn pattern(&self) -> &'static Pattern {
        // `active` only ever holds indices produced by `next_index`.
        self.messages.get(self.active).unwrap_or(Message::Sos.pattern())
    }

    /// Built-in identity of the active pattern, if it is one.
    pub fn message(&self) -> Option<Message> {
        let pattern = self.pattern();
        Message::ALL
            .into_iter()
            .find(|message| core::ptr::eq(message.pattern(), pattern))
    }

    /// Advance one phase, drive the output, and handle the message boundary.
    pub fn step(&mut self, trigger: &TriggerLatch, driver: &mut impl OutputDriver) -> Step {
        self.phase += 1;
        let shown = self.phase;
        let output = self.pattern().lookup(shown);
        driver.apply(output);

        let event = self.detect_event(trigger);
        let action = Self::transition(event);
        self.run_action(action);

        let step = Step {
            phase: shown,
            output,
            message_ended: !matches!(event, FsmEvent::Advanced),
            transitioned: matches!(action, FsmAction::SwitchMessage),
        };
        #[cfg(feature = "defmt")]
        defmt::trace!("Machine: {:?}", step);
        step
    }

    fn detect_event(&self, trigger: &TriggerLatch) -> FsmEvent {
        if self.phase < self.length {
            FsmEvent::Advanced
        } else if trigger.take() {
            FsmEvent::MessageEndedWithTrigger
        } else {
            FsmEvent::MessageEnded
        }
    }

    fn transition(event: FsmEvent) -> FsmAction {
        match event {
            FsmEvent::Advanced => FsmAction::None,
            FsmEvent::MessageEnded => FsmAction::Restart,
            FsmEvent::MessageEndedWithTrigger => FsmAction::SwitchMessage,
        }
    }

    fn run_action(&mut self, action: FsmAction) {
        match action {
            FsmAction::None => {}
            FsmAction::Restart => self.phase = 0,
            FsmAction::SwitchMessage => {
                self.phase = 0;
                self.active = self.messages.next_index(self.active);
                self.length = self.pattern().length;
                #[cfg(feature = "defmt")]
                defmt::println!("Switched to message {}", self.pattern().name);
            }
        }
    }
}

impl Default for MessageMachine {
    fn default() -> Self {
        Self::new()
    }
}
