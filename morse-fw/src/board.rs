// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Board bring-up and interrupt handlers.
//!
//! Handlers only set flags in [`SharedSignals`]; the pattern work stays in
//! the main loop.

use core::cell::RefCell;
use cortex_m::interrupt::Mutex;
use embedded_hal::digital::PinState;
use morse_common::{next_deadline, output::PinPair, SharedSignals, TICK_PERIOD_MS};
use rp2040_hal::{
    self as hal,
    gpio::{
        bank0::{Gpio14, Gpio15, Gpio16, Gpio17},
        FunctionSioInput, FunctionSioOutput, Interrupt, Pin, PinId, PullDown, PullUp,
    },
    pac::{self, interrupt},
    timer::{Alarm, Alarm0, Instant},
};

/// External crystal on the Pico.
const XTAL_FREQ_HZ: u32 = 12_000_000;

const TICK_PERIOD_US: u64 = TICK_PERIOD_MS as u64 * 1_000;

type LedA = Pin<Gpio14, FunctionSioOutput, PullDown>;
type LedB = Pin<Gpio15, FunctionSioOutput, PullDown>;
type ButtonA = Pin<Gpio16, FunctionSioInput, PullUp>;
type ButtonB = Pin<Gpio17, FunctionSioInput, PullUp>;

/// Indicator A (dots) and B (dashes).
pub type Leds = PinPair<LedA, LedB>;

/// Bring-up failures. All of them are fatal.
#[derive(Debug, Clone, Copy, defmt::Format)]
pub enum InitError {
    Peripherals,
    Clocks,
    /// The alarm was already claimed.
    TimerUnavailable,
    /// The first countdown could not be scheduled.
    TimerStart,
}

struct TimerIrq {
    timer: hal::Timer,
    alarm: Alarm0,
    /// Timer microseconds of the armed deadline.
    deadline_us: u64,
    signals: &'static SharedSignals,
}

struct ButtonIrq {
    buttons: (ButtonA, ButtonB),
    signals: &'static SharedSignals,
}

static TIMER_IRQ: Mutex<RefCell<Option<TimerIrq>>> = Mutex::new(RefCell::new(None));
static BUTTON_IRQ: Mutex<RefCell<Option<ButtonIrq>>> = Mutex::new(RefCell::new(None));

/// Configure LEDs (off), buttons (falling edge) and the periodic tick, and
/// register `signals` with both interrupt handlers.
pub fn init(signals: &'static SharedSignals) -> Result<Leds, InitError> {
    let mut pac = pac::Peripherals::take().ok_or(InitError::Peripherals)?;
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    let clocks = hal::clocks::init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .map_err(|_| InitError::Clocks)?;

    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let leds = PinPair::new(
        pins.gpio14.into_push_pull_output_in_state(PinState::Low),
        pins.gpio15.into_push_pull_output_in_state(PinState::Low),
    );

    let button_a: ButtonA = pins.gpio16.into_pull_up_input();
    let button_b: ButtonB = pins.gpio17.into_pull_up_input();
    button_a.set_interrupt_enabled(Interrupt::EdgeLow, true);
    button_b.set_interrupt_enabled(Interrupt::EdgeLow, true);
    cortex_m::interrupt::free(|cs| {
        BUTTON_IRQ.borrow(cs).replace(Some(ButtonIrq {
            buttons: (button_a, button_b),
            signals,
        }));
    });

    let mut timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let mut alarm = timer.alarm_0().ok_or(InitError::TimerUnavailable)?;
    alarm.enable_interrupt();
    let deadline_us = timer.get_counter().ticks() + TICK_PERIOD_US;
    alarm
        .schedule_at(Instant::from_ticks(deadline_us))
        .map_err(|_| InitError::TimerStart)?;
    cortex_m::interrupt::free(|cs| {
        TIMER_IRQ.borrow(cs).replace(Some(TimerIrq {
            timer,
            alarm,
            deadline_us,
            signals,
        }));
    });

    // SAFETY: both handlers only touch state registered above.
    unsafe {
        pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
        pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0);
    }

    defmt::println!(
        "Board ready: tick {} ms, LEDs GPIO14/15, buttons GPIO16/17",
        TICK_PERIOD_MS
    );
    Ok(leds)
}

#[allow(non_snake_case)]
#[interrupt]
fn TIMER_IRQ_0() {
    cortex_m::interrupt::free(|cs| {
        if let Some(irq) = TIMER_IRQ.borrow(cs).borrow_mut().as_mut() {
            irq.alarm.clear_interrupt();
            let now_us = irq.timer.get_counter().ticks();
            irq.deadline_us = next_deadline(irq.deadline_us, now_us, TICK_PERIOD_US);
            if irq
                .alarm
                .schedule_at(Instant::from_ticks(irq.deadline_us))
                .is_err()
            {
                defmt::error!("Timer: failed to re-arm alarm");
            }
            irq.signals.tick.on_tick();
        }
    });
}

#[allow(non_snake_case)]
#[interrupt]
fn IO_IRQ_BANK0() {
    cortex_m::interrupt::free(|cs| {
        if let Some(irq) = BUTTON_IRQ.borrow(cs).borrow_mut().as_mut() {
            let (button_a, button_b) = &mut irq.buttons;
            // Evaluate both so each line's status is cleared.
            let pressed_a = take_falling_edge(button_a);
            let pressed_b = take_falling_edge(button_b);
            if pressed_a || pressed_b {
                irq.signals.trigger.on_trigger();
            }
        }
    });
}

fn take_falling_edge<I: PinId>(button: &mut Pin<I, FunctionSioInput, PullUp>) -> bool {
    if button.interrupt_status(Interrupt::EdgeLow) {
        button.clear_interrupt(Interrupt::EdgeLow);
        true
    } else {
        false
    }
}
