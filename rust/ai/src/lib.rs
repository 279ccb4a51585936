//! # tilt-ai: the heads-up bot
//!
//! Decides the opponent seat's actions for a Texas Hold'em match and keeps
//! the state that makes it feel human: a personality, a tilt meter, and a
//! running model of the player it is facing.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait every bot implements
//! - [`decision`] - Threshold decision engine (equity vs. adjusted threshold)
//! - [`equity`] - Monte-Carlo equity against a weighted range
//! - [`personality`] - Presets, tilt meter and early exits
//! - [`opponent`] - Frequencies and range estimation for the human seat
//! - [`session`] - Wires an engine, a bot and the models into one match
//! - [`create_ai`] - Factory by type string
//!
//! ## Quick Start
//!
//! ```rust
//! use tilt_ai::config::AiConfig;
//! use tilt_ai::personality::{preset, PersonalityState};
//! use tilt_ai::opponent::OpponentModel;
//! use tilt_ai::{create_ai, DecisionContext};
//! use tilt_engine::engine::Engine;
//! use tilt_engine::game::TableConfig;
//! use tilt_engine::player::Seat;
//!
//! let mut engine = Engine::new(TableConfig::default(), Some(42)).unwrap();
//! engine.start_hand().unwrap();
//!
//! let mut bot = create_ai("threshold", AiConfig::default(), 7).unwrap();
//! let personality = PersonalityState::new(preset("pro").unwrap(), 1_000);
//! let model = OpponentModel::new();
//! let ctx = DecisionContext { opponent: &model, personality: &personality };
//!
//! let decision = bot.decide(&engine.view(Seat::Opponent), &ctx);
//! println!("{} chose {:?}", bot.name(), decision.action);
//! ```

use tilt_engine::engine::SeatView;

pub mod config;
pub mod decision;
pub mod equity;
pub mod errors;
pub mod notation;
pub mod opponent;
pub mod personality;
pub mod session;
pub mod thresholds;

pub use config::AiConfig;
pub use decision::{Decision, DecisionContext, DecisionEngine, DecisionPath, Mistake};
pub use errors::AiError;
pub use session::MatchSession;

/// Interface for bots.
///
/// # Example Implementation
///
/// ```rust
/// use tilt_ai::{AIOpponent, Decision, DecisionContext, DecisionEngine};
/// use tilt_engine::engine::SeatView;
///
/// struct AlwaysThinking(DecisionEngine);
///
/// impl AIOpponent for AlwaysThinking {
///     fn decide(&mut self, view: &SeatView, ctx: &DecisionContext<'_>) -> Decision {
///         let mut d = self.0.decide(view, ctx);
///         d.think_delay_ms = 5_000;
///         d
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysThinking"
///     }
/// }
/// ```
pub trait AIOpponent: Send {
    /// Chooses an action for the seat described by `view`.
    ///
    /// The returned action may still be illegal in edge cases; the engine
    /// coerces it.
    fn decide(&mut self, view: &SeatView, ctx: &DecisionContext<'_>) -> Decision;

    fn name(&self) -> &str;
}

/// Creates a bot by type string.
///
/// # Supported AI Types
///
/// - `"threshold"` - [`DecisionEngine`]
///
/// ```rust
/// use tilt_ai::{create_ai, AiConfig, AiError};
///
/// let ai = create_ai("threshold", AiConfig::default(), 1).unwrap();
/// assert_eq!(ai.name(), "ThresholdAI");
/// assert!(matches!(create_ai("oracle", AiConfig::default(), 1), Err(AiError::UnknownAi(_))));
/// ```
pub fn create_ai(ai_type: &str, config: AiConfig, seed: u64) -> Result<Box<dyn AIOpponent>, AiError> {
    match ai_type {
        "threshold" => {
            config.validate()?;
            Ok(Box::new(DecisionEngine::new(config, seed)))
        }
        other => Err(AiError::UnknownAi(other.to_string())),
    }
}
