// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Runs the beacon core against threads standing in for the interrupts.
//!
//! A ticker thread plays the timer callback and a stdin thread the button
//! callback. The control loop parks between ticks.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use morse_common::{
    self_test, Controller, MessageMachine, OutputCombination, OutputDriver, SharedSignals, Step,
    Timing, SELF_TEST_CYCLES,
};

/// Tick numbers at which a press is injected.
#[derive(Debug)]
pub struct PressSchedule {
    ticks: Vec<u64>,
}

impl PressSchedule {
    pub fn new(mut ticks: Vec<u64>) -> Self {
        ticks.sort_unstable();
        ticks.dedup();
        Self { ticks }
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// `true` if a press is scheduled at `tick`. Earlier entries are dropped.
    pub fn is_due(&mut self, tick: u64) -> bool {
        let passed = self.ticks.partition_point(|&t| t < tick);
        self.ticks.drain(..passed);
        if self.ticks.first() == Some(&tick) {
            self.ticks.remove(0);
            true
        } else {
            false
        }
    }
}

/// Terminal stand-in for the two LEDs.
#[derive(Default)]
pub struct TerminalLeds {
    current: OutputCombination,
}

impl TerminalLeds {
    pub fn lamps(&self) -> &'static str {
        match self.current {
            OutputCombination::AOnly => "A[#] B[ ]",
            OutputCombination::BOnly => "A[ ] B[#]",
            OutputCombination::Both => "A[#] B[#]",
            OutputCombination::Neither => "A[ ] B[ ]",
        }
    }
}

impl OutputDriver for TerminalLeds {
    fn apply(&mut self, output: OutputCombination) {
        self.current = output;
    }
}

/// Timer stand-in: fires the tick flag every period until stopped.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking; each tick unparks the calling thread.
    pub fn spawn(signals: Arc<SharedSignals>, period: Duration) -> Result<Self> {
        let control = thread::current();
        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("ticker".into())
                .spawn(move || {
                    while !stop.load(Ordering::Acquire) {
                        thread::sleep(period);
                        signals.tick.on_tick();
                        control.unpark();
                    }
                })
                .context("Failed to spawn ticker thread")?
        };
        Ok(Self { stop, handle })
    }

    /// Stop ticking and wait for the thread to exit.
    pub fn stop(self) -> Result<()> {
        self.stop.store(true, Ordering::Release);
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("ticker thread panicked"))
    }
}

/// Stdin presses only make sense for an open-ended, unscripted run.
fn reads_stdin(limit: Option<u64>, schedule: &PressSchedule) -> bool {
    limit.is_none() && schedule.is_empty()
}

fn spawn_button(signals: Arc<SharedSignals>) -> Result<()> {
    thread::Builder::new()
        .name("button".into())
        .spawn(move || {
            for _ in io::stdin().lock().lines().map_while(|line| line.ok()) {
                signals.trigger.on_trigger();
                println!("  (button)");
            }
        })
        .context("Failed to spawn button thread")?;
    Ok(())
}

fn describe(tick: u64, controller: &Controller, step: &Step, leds: &TerminalLeds) -> String {
    let note = if step.transitioned {
        format!("  -> {}", controller.machine().pattern().name)
    } else if step.message_ended {
        String::from("  (repeat)")
    } else {
        String::new()
    };
    format!("tick {tick:>6}  phase {:>2}  {}{note}", step.phase, leds.lamps())
}

/// Run the control loop for `limit` ticks, or forever.
pub fn simulate(
    timing: Timing,
    limit: Option<u64>,
    mut schedule: PressSchedule,
    run_self_test: bool,
) -> Result<()> {
    let signals = Arc::new(SharedSignals::new());
    let mut leds = TerminalLeds::default();

    let ticker = Ticker::spawn(
        Arc::clone(&signals),
        Duration::from_millis(u64::from(timing.tick_period_ms)),
    )?;
    let interactive = reads_stdin(limit, &schedule);
    if interactive {
        spawn_button(Arc::clone(&signals))?;
    }

    if run_self_test {
        println!("Self-test: {SELF_TEST_CYCLES} flashes");
        self_test(&mut leds, &signals.tick, SELF_TEST_CYCLES, thread::park);
    }

    let mut controller = Controller::new(timing, MessageMachine::new());
    println!(
        "Flashing {}, phase every {} ms.",
        controller.machine().pattern().name,
        timing.phase_period_ms()
    );
    if interactive {
        println!("Press Enter to switch message.");
    }

    let mut tick = 0u64;
    while limit.map_or(true, |limit| tick < limit) {
        signals.tick.wait(thread::park);
        tick += 1;

        if schedule.is_due(tick) {
            signals.trigger.on_trigger();
            println!("  (button, scripted)");
        }

        if let Some(step) = controller.on_tick(&signals.trigger, &mut leds) {
            println!("{}", describe(tick, &controller, &step, &leds));
        }
    }

    ticker.stop()
}
