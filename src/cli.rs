//! Command-line interface for tui-lightup.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use tui_lightup::core::{CompletionRule, PuzzleConfig};
use tui_lightup::types::{RotationMode, COMPLETION_THRESHOLD, REQUIRED_TILE_COUNT};

/// Circuit puzzle: rotate wire tiles until current reaches the bulb
#[derive(Parser, Debug)]
#[command(name = "tui-lightup")]
#[command(about = "Rotate wire tiles to light the bulb", long_about = None)]
#[command(version)]
pub struct Cli {
    /// RNG seed; a fresh one is drawn from the clock when omitted
    #[arg(long, env = "LIGHTUP_SEED")]
    pub seed: Option<u32>,

    /// How starting angles are drawn
    #[arg(long, value_enum, env = "LIGHTUP_ROTATION", default_value = "quantized")]
    pub rotation: RotationArg,

    /// How completion is decided
    #[arg(long, value_enum, env = "LIGHTUP_COMPLETION", default_value = "threshold")]
    pub completion: CompletionArg,

    /// Correct tiles needed under the threshold rule
    #[arg(
        long,
        env = "LIGHTUP_THRESHOLD",
        default_value_t = COMPLETION_THRESHOLD,
        value_parser = clap::value_parser!(u8).range(1..=REQUIRED_TILE_COUNT as i64)
    )]
    pub threshold: u8,

    /// Speak the JSON-lines protocol on stdin/stdout instead of drawing
    #[arg(long)]
    pub headless: bool,

    /// Log file for interactive mode (headless mode logs to stderr)
    #[arg(long, env = "LIGHTUP_LOG", default_value = "tui-lightup.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RotationArg {
    /// Any angle in [0, 360)
    Continuous,
    /// Multiples of 90 only
    Quantized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionArg {
    /// Enough required tiles at their target angle
    Threshold,
    /// A connected path from battery to bulb
    Connected,
}

impl Cli {
    pub fn puzzle_config(&self) -> PuzzleConfig {
        let rotation_mode = match self.rotation {
            RotationArg::Continuous => RotationMode::Continuous,
            RotationArg::Quantized => RotationMode::Quantized,
        };
        let completion = match self.completion {
            CompletionArg::Threshold => CompletionRule::threshold(self.threshold),
            CompletionArg::Connected => CompletionRule::connected(),
        };
        PuzzleConfig::default()
            .with_rotation_mode(rotation_mode)
            .with_completion(completion)
    }
}
