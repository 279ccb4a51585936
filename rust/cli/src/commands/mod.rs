//! Command handlers.
//!
//! Each subcommand lives in its own module with a public
//! `handle_COMMAND_command(...) -> Result<(), CliError>` entry point that
//! writes to injected `&mut dyn Write` streams.

pub mod cfg;
pub mod equity;
pub mod presets;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use equity::handle_equity_command;
pub use presets::handle_presets_command;
pub use sim::{SimArgs, handle_sim_command};
