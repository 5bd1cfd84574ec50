// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

#![no_std]
#![no_main]

mod board;

use defmt_rtt as _;
use panic_probe as _;

defmt::timestamp!("{=u64:us}", { 0 });

use cortex_m_rt::entry;
use morse_common::{
    fail_stop, self_test, Controller, MessageMachine, SharedSignals, Timing, SELF_TEST_CYCLES,
};

#[unsafe(link_section = ".boot2")]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

static SIGNALS: SharedSignals = SharedSignals::new();

#[entry]
fn main() -> ! {
    defmt::println!("Morse beacon init");

    let mut leds = match board::init(&SIGNALS) {
        Ok(leds) => leds,
        Err(e) => {
            defmt::error!("Board init failed: {:?}", e);
            fail_stop(cortex_m::asm::nop)
        }
    };

    defmt::println!("Self-test: {} flashes", SELF_TEST_CYCLES);
    self_test(&mut leds, &SIGNALS.tick, SELF_TEST_CYCLES, cortex_m::asm::wfi);

    let mut controller = Controller::new(Timing::DEFAULT, MessageMachine::new());
    defmt::println!(
        "Flashing {}, phase every {} ms",
        controller.machine().pattern().name,
        Timing::DEFAULT.phase_period_ms()
    );

    controller.run(&SIGNALS, &mut leds, cortex_m::asm::wfi)
}
