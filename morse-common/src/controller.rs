// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Control loop: one tick in, at most one phase step out.

use crate::{
    clock::Cadence,
    config::Timing,
    latch::TriggerLatch,
    machine::{MessageMachine, Step},
    output::OutputDriver,
    SharedSignals,
};

pub struct Controller {
    cadence: Cadence,
    machine: MessageMachine,
}

impl Controller {
    pub fn new(timing: Timing, machine: MessageMachine) -> Self {
        Self {
            cadence: Cadence::new(timing.ticks_per_phase),
            machine,
        }
    }

    pub fn machine(&self) -> &MessageMachine {
        &self.machine
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    /// Consume one tick. Steps the machine only when the cadence gate opens;
    /// the other ticks only keep time.
    pub fn on_tick(
        &mut self,
        trigger: &TriggerLatch,
        driver: &mut impl OutputDriver,
    ) -> Option<Step> {
        if !self.cadence.tick() {
            return None;
        }
        Some(self.machine.step(trigger, driver))
    }

    /// Run forever, sleeping with `idle` between ticks.
    pub fn run(
        &mut self,
        signals: &SharedSignals,
        driver: &mut impl OutputDriver,
        mut idle: impl FnMut(),
    ) -> ! {
        loop {
            signals.tick.wait(&mut idle);
            self.on_tick(&signals.trigger, driver);
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Timing::DEFAULT, MessageMachine::new())
    }
}
