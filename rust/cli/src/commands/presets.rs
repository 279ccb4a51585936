//! `presets`: lists the built-in personalities.

use std::io::Write;

use tilt_ai::personality::builtin_presets;

use crate::error::CliError;

pub fn handle_presets_command(out: &mut dyn Write) -> Result<(), CliError> {
    let presets = builtin_presets()?;
    writeln!(
        out,
        "{:<16} {:<16} {:>5} {:>5} {:>5} {:>6} {:>6}",
        "id", "name", "aggr", "bluff", "fold", "tilt", "quit"
    )?;
    for p in presets {
        writeln!(
            out,
            "{:<16} {:<16} {:>5.2} {:>5.2} {:>5.2} {:>6.1} {:>6.0}",
            p.id,
            p.name,
            p.aggression,
            p.bluff_frequency,
            p.fold_threshold,
            p.tilt_sensitivity,
            p.rage_quit_threshold
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_preset() {
        let mut out = Vec::new();
        handle_presets_command(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for id in ["gto", "pro", "nit", "calling_station", "maniac", "hothead"] {
            assert!(text.contains(id), "missing {}", id);
        }
    }
}
