use thiserror::Error;

use tilt_engine::errors::GameError;

use crate::personality::EarlyExit;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AiError {
    #[error("Invalid hand notation: {0}")]
    InvalidNotation(String),
    #[error("Unknown personality preset: {0}")]
    UnknownPreset(String),
    #[error("Failed to load personality presets: {0}")]
    PresetLoad(String),
    #[error("Unknown AI type: {0}")]
    UnknownAi(String),
    #[error("Invalid AI config: {0}")]
    InvalidConfig(String),
    #[error("Opponent left the match: {0:?}")]
    OpponentLeft(EarlyExit),
    #[error("It is not the bot's turn")]
    NotBotsTurn,
    #[error(transparent)]
    Engine(#[from] GameError),
}
