//! Command-line argument types.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tilt",
    version,
    about = "Heads-up Texas Hold'em against a tilting bot"
)]
pub struct TiltCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a bot-vs-bot match and record hand histories
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        level: Option<u8>,
        /// Preset for the bot seat
        #[arg(long)]
        opponent: Option<String>,
        /// Preset for the engine playing the human seat
        #[arg(long)]
        stand_in: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Monte-Carlo equity of a hand against a range
    Equity {
        #[arg(long)]
        hero: String,
        #[arg(long)]
        board: Option<String>,
        #[arg(long, default_value = "random")]
        range: String,
        #[arg(long, default_value_t = 5_000)]
        trials: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
    /// List built-in personalities
    Presets,
}
