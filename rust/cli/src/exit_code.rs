//! Process exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Any failure: bad arguments, bad configuration, or an engine/AI error.
pub const ERROR: i32 = 2;
