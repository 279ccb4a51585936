//! `cfg`: prints the resolved configuration with the source of each value.
//!
//! ```json
//! {
//!   "buy_in": { "value": 1000, "source": "default" },
//!   "level": { "value": 2, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "buy_in": {
            "value": config.buy_in,
            "source": sources.buy_in,
        },
        "level": {
            "value": config.level,
            "source": sources.level,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "opponent": {
            "value": config.opponent,
            "source": sources.opponent,
        },
        "stand_in": {
            "value": config.stand_in,
            "source": sources.stand_in,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
