// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

use crate::{clock::TickFlag, output::OutputDriver};

/// Flash both indicators on for one tick and off for one tick, `cycles` times.
///
/// Leaves both indicators off.
pub fn self_test(
    driver: &mut impl OutputDriver,
    tick: &TickFlag,
    cycles: u32,
    mut idle: impl FnMut(),
) {
    for _ in 0..cycles {
        driver.both();
        tick.wait(&mut idle);
        driver.neither();
        tick.wait(&mut idle);
    }
}
