// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use anyhow::{Context, Result};
use clap::Parser;
use morse_common::{Timing, TICKS_PER_PHASE, TICK_PERIOD_MS};

use crate::sim::{self, PressSchedule};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "morse-sim")]
#[command(about = "Simulate the two-LED SOS/OK beacon in the terminal")]
#[command(after_help = "Press Enter to simulate a button press.")]
pub struct Cli {
    /// Timer period in milliseconds
    #[arg(long, default_value_t = TICK_PERIOD_MS)]
    pub tick_ms: u32,

    /// Timer ticks per displayed phase
    #[arg(long, default_value_t = TICKS_PER_PHASE)]
    pub ticks_per_phase: u32,

    /// Stop after this many ticks (runs forever when omitted)
    #[arg(long, value_name = "N")]
    pub ticks: Option<u64>,

    /// Press the button at these tick numbers (e.g. 20,200)
    #[arg(long, value_name = "TICK,...", value_delimiter = ',')]
    pub press_at: Vec<u64>,

    /// Skip the start-up flashes
    #[arg(long)]
    pub skip_self_test: bool,
}

impl Cli {
    fn timing(&self) -> Result<Timing> {
        Timing {
            tick_period_ms: self.tick_ms,
            ticks_per_phase: self.ticks_per_phase,
        }
        .validate()
        .context("invalid timing")
    }
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    let timing = cli.timing()?;
    let schedule = PressSchedule::new(cli.press_at);
    sim::simulate(timing, cli.ticks, schedule, !cli.skip_self_test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_firmware_timing() {
        let cli = Cli::try_parse_from(["morse-sim"]).expect("parse");

        assert_eq!(cli.timing().expect("timing"), Timing::DEFAULT);
        assert_eq!(cli.ticks, None);
        assert!(cli.press_at.is_empty());
        assert!(!cli.skip_self_test);
    }

    #[test]
    fn test_press_list_is_comma_separated() {
        let cli = Cli::try_parse_from(["morse-sim", "--press-at", "20,200,20", "--ticks", "400"])
            .expect("parse");

        assert_eq!(cli.press_at, vec![20, 200, 20]);
        assert_eq!(cli.ticks, Some(400));
    }

    #[test]
    fn test_zero_period_is_rejected() {
        let cli = Cli::try_parse_from(["morse-sim", "--tick-ms", "0"]).expect("parse");

        assert!(cli.timing().is_err());
    }

    #[test]
    fn test_bad_press_value_is_rejected() {
        assert!(Cli::try_parse_from(["morse-sim", "--press-at", "ten"]).is_err());
    }
}
