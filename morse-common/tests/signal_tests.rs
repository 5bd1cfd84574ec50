// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Tests for the tick flag, the cadence gate and the trigger latch.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use morse_common::{
    next_deadline, Cadence, Message, MessageMachine, OutputCombination, OutputDriver, SharedSignals,
    TickFlag, TriggerLatch,
};

struct Discard;

impl OutputDriver for Discard {
    fn apply(&mut self, _output: OutputCombination) {}
}

#[test]
fn test_tick_flag_take_clears() {
    let tick = TickFlag::new();
    assert!(!tick.take());

    tick.on_tick();
    assert!(tick.is_pending());
    assert!(tick.take());
    assert!(!tick.is_pending());
    assert!(!tick.take());
}

#[test]
fn test_unconsumed_ticks_collapse() {
    let tick = TickFlag::new();
    tick.on_tick();
    tick.on_tick();
    tick.on_tick();

    assert!(tick.take());
    assert!(!tick.take());
}

#[test]
fn test_wait_idles_until_tick_fires() {
    let tick = TickFlag::new();
    let mut idle_calls = 0;

    tick.wait(|| {
        idle_calls += 1;
        if idle_calls == 3 {
            tick.on_tick();
        }
    });

    assert_eq!(idle_calls, 3);
    assert!(!tick.is_pending());
}

#[test]
fn test_wait_returns_immediately_when_pending() {
    let tick = TickFlag::new();
    tick.on_tick();

    tick.wait(|| panic!("should not idle"));
}

#[test]
fn test_wait_wakes_on_tick_from_another_thread() {
    let signals = Arc::new(SharedSignals::new());
    let waiter = thread::current();
    let ticker = {
        let signals = Arc::clone(&signals);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            signals.tick.on_tick();
            waiter.unpark();
        })
    };

    signals.tick.wait(thread::park);

    ticker.join().expect("ticker thread");
    assert!(!signals.tick.is_pending());
}

#[test]
fn test_cadence_opens_every_fifth_tick() {
    let mut cadence = Cadence::new(5);
    let opened: Vec<bool> = (0..15).map(|_| cadence.tick()).collect();

    let expected: Vec<bool> = (1..=15).map(|n| n % 5 == 0).collect();
    assert_eq!(opened, expected);
    assert_eq!(cadence.elapsed(), 0);
}

#[test]
fn test_cadence_counts_partial_progress() {
    let mut cadence = Cadence::new(5);
    cadence.tick();
    cadence.tick();

    assert_eq!(cadence.elapsed(), 2);
    assert_eq!(cadence.ticks_per_phase(), 5);
}

#[test]
fn test_cadence_of_zero_opens_every_tick() {
    let mut cadence = Cadence::new(0);

    assert_eq!(cadence.ticks_per_phase(), 1);
    assert!(cadence.tick());
    assert!(cadence.tick());
}

#[test]
fn test_latch_starts_clear() {
    let latch = TriggerLatch::new();
    assert!(!latch.is_pending());

    latch.on_trigger();
    latch.on_trigger();
    assert!(latch.is_pending());
}

#[test]
fn test_concurrent_triggers_request_one_transition() {
    let signals = Arc::new(SharedSignals::new());
    let presses: Vec<_> = (0..4)
        .map(|_| {
            let signals = Arc::clone(&signals);
            thread::spawn(move || {
                for _ in 0..100 {
                    signals.trigger.on_trigger();
                }
            })
        })
        .collect();
    for press in presses {
        press.join().expect("press thread");
    }

    let mut machine = MessageMachine::new();
    let mut transitions = 0;
    for _ in 0..34 * 3 {
        if machine.step(&signals.trigger, &mut Discard).transitioned {
            transitions += 1;
        }
    }

    assert_eq!(transitions, 1);
    assert_eq!(machine.message(), Some(Message::Ok));
    assert!(!signals.trigger.is_pending());
}

#[test]
fn test_deadline_counts_from_previous_deadline() {
    // Handler ran 70 us after the 100_000 us deadline.
    assert_eq!(next_deadline(100_000, 100_070, 100_000), 200_000);

    let mut deadline = 0;
    for tick in 1..=10u64 {
        let now = deadline + 250;
        deadline = next_deadline(deadline, now, 100_000);
        assert_eq!(deadline, tick * 100_000);
    }
}

#[test]
fn test_deadline_resyncs_after_missed_period() {
    assert_eq!(next_deadline(100_000, 350_000, 100_000), 450_000);
    assert_eq!(next_deadline(100_000, 200_000, 100_000), 300_000);
}
