use core::time::Duration;

use anyhow::bail;
use bizid::SequencerConfig;
use clap::{Args, Parser, ValueEnum};

use crate::command::Command;

/// Largest backtrack that may be configured as recoverable.
const MAX_BACKTRACK_MS_LIMIT: u64 = 1_000;
/// Largest number of backtrack waits per call.
const MAX_BACKTRACK_RETRIES_LIMIT: u32 = 100;
/// Longest pause after an exhausted millisecond.
const MAX_OVERFLOW_PAUSE: Duration = Duration::from_secs(1);

#[derive(Parser, Debug, Clone)]
#[command(
    name = "bizid",
    version,
    about = "Generate, decode, and inspect business identifiers"
)]
pub struct Cli {
    #[command(flatten)]
    pub args: CliArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Generator tuning shared by every subcommand.
///
/// All values are parsed from CLI arguments or environment variables (after
/// loading `.env`), and validated by [`GeneratorSettings::try_from`].
#[derive(Args, Debug, Clone)]
pub struct CliArgs {
    /// Largest backward clock jump, in milliseconds, that is waited out
    /// instead of failing.
    ///
    /// Environment variable: `BIZID_MAX_BACKTRACK_MS`
    #[arg(long, global = true, env = "BIZID_MAX_BACKTRACK_MS", default_value_t = bizid::MAX_CLOCK_BACKTRACK_MS)]
    pub max_backtrack_ms: u64,

    /// How many times a single call may wait for a backtracked clock.
    ///
    /// Environment variable: `BIZID_MAX_BACKTRACK_RETRIES`
    #[arg(long, global = true, env = "BIZID_MAX_BACKTRACK_RETRIES", default_value_t = bizid::MAX_CLOCK_BACKTRACK_RETRIES)]
    pub max_backtrack_retries: u32,

    /// Pause, in microseconds, after 4096 identifiers were issued within one
    /// millisecond.
    ///
    /// Environment variable: `BIZID_OVERFLOW_PAUSE_US`
    #[arg(long, global = true, env = "BIZID_OVERFLOW_PAUSE_US", default_value_t = 1_000)]
    pub overflow_pause_us: u64,

    /// Time source for generated identifiers.
    ///
    /// Environment variable: `BIZID_CLOCK`
    #[arg(long, global = true, env = "BIZID_CLOCK", value_enum, default_value_t = ClockKind::System)]
    pub clock: ClockKind,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// The wall clock, read on every call.
    System,
    /// Anchored to the wall clock at startup, then only moves forward.
    Monotonic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub sequencer: SequencerConfig,
    pub clock: ClockKind,
}

impl TryFrom<CliArgs> for GeneratorSettings {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.overflow_pause_us == 0 {
            bail!("BIZID_OVERFLOW_PAUSE_US must be greater than 0");
        }

        let overflow_pause = Duration::from_micros(args.overflow_pause_us);
        if overflow_pause > MAX_OVERFLOW_PAUSE {
            bail!(
                "BIZID_OVERFLOW_PAUSE_US ({}) exceeds the maximum of {}",
                args.overflow_pause_us,
                MAX_OVERFLOW_PAUSE.as_micros()
            );
        }

        if args.max_backtrack_ms > MAX_BACKTRACK_MS_LIMIT {
            bail!(
                "BIZID_MAX_BACKTRACK_MS ({}) exceeds the maximum of {}",
                args.max_backtrack_ms,
                MAX_BACKTRACK_MS_LIMIT
            );
        }

        if args.max_backtrack_retries > MAX_BACKTRACK_RETRIES_LIMIT {
            bail!(
                "BIZID_MAX_BACKTRACK_RETRIES ({}) exceeds the maximum of {}",
                args.max_backtrack_retries,
                MAX_BACKTRACK_RETRIES_LIMIT
            );
        }

        Ok(Self {
            sequencer: SequencerConfig::default()
                .with_max_backtrack_ms(args.max_backtrack_ms)
                .with_max_backtrack_retries(args.max_backtrack_retries)
                .with_overflow_pause(overflow_pause),
            clock: args.clock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            max_backtrack_ms: 5,
            max_backtrack_retries: 5,
            overflow_pause_us: 1_000,
            clock: ClockKind::System,
        }
    }

    #[test]
    fn defaults_match_the_library() {
        let settings = GeneratorSettings::try_from(args()).unwrap();
        assert_eq!(settings.sequencer, SequencerConfig::default());
        assert_eq!(settings.clock, ClockKind::System);
    }

    #[test]
    fn zero_pause_is_rejected() {
        let err = GeneratorSettings::try_from(CliArgs {
            overflow_pause_us: 0,
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("greater than 0"), "{err}");
    }

    #[test]
    fn pause_is_capped_at_one_second() {
        assert!(
            GeneratorSettings::try_from(CliArgs {
                overflow_pause_us: 1_000_000,
                ..args()
            })
            .is_ok()
        );
        assert!(
            GeneratorSettings::try_from(CliArgs {
                overflow_pause_us: 1_000_001,
                ..args()
            })
            .is_err()
        );
    }

    #[test]
    fn backtrack_limits_are_bounded() {
        assert!(
            GeneratorSettings::try_from(CliArgs {
                max_backtrack_ms: 1_001,
                ..args()
            })
            .is_err()
        );
        assert!(
            GeneratorSettings::try_from(CliArgs {
                max_backtrack_retries: 101,
                ..args()
            })
            .is_err()
        );

        let settings = GeneratorSettings::try_from(CliArgs {
            max_backtrack_ms: 1_000,
            max_backtrack_retries: 0,
            overflow_pause_us: 250,
            clock: ClockKind::Monotonic,
        })
        .unwrap();
        assert_eq!(settings.sequencer.max_backtrack_ms, 1_000);
        assert_eq!(settings.sequencer.max_backtrack_retries, 0);
        assert_eq!(settings.sequencer.overflow_pause, Duration::from_micros(250));
        assert_eq!(settings.clock, ClockKind::Monotonic);
    }

    #[test]
    fn flags_parse_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "bizid",
            "types",
            "--clock",
            "monotonic",
            "--max-backtrack-ms",
            "20",
        ])
        .unwrap();
        assert_eq!(cli.args.clock, ClockKind::Monotonic);
        assert_eq!(cli.args.max_backtrack_ms, 20);
        assert!(matches!(cli.command, Command::Types { .. }));
    }
}
