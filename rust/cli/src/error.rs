//! Error types for the CLI application.

use std::fmt;

use tilt_ai::errors::AiError;
use tilt_engine::errors::GameError;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    Config(String),

    Engine(GameError),

    Ai(AiError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Ai(e) => write!(f, "AI error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Ai(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<AiError> for CliError {
    fn from(error: AiError) -> Self {
        match error {
            AiError::Engine(e) => CliError::Engine(e),
            other => CliError::Ai(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_inside_ai_errors_are_unwrapped() {
        let err: CliError = AiError::Engine(GameError::NoHandInProgress).into();
        assert!(matches!(err, CliError::Engine(GameError::NoHandInProgress)));
        let err: CliError = AiError::UnknownPreset("x".into()).into();
        assert_eq!(err.to_string(), "AI error: Unknown personality preset: x");
    }
}
