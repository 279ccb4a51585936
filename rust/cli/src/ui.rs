//! Terminal output helpers shared by the commands.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Signed chip amount, e.g. `+120` or `-35`.
pub fn signed(amount: i64) -> String {
    if amount > 0 {
        format!("+{}", amount)
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_amounts() {
        assert_eq!(signed(120), "+120");
        assert_eq!(signed(-35), "-35");
        assert_eq!(signed(0), "0");
    }
}
