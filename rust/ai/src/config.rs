use serde::{Deserialize, Serialize};

use tilt_engine::logger::Street;

use crate::errors::AiError;

/// Tuning knobs for the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub trials_preflop: u32,
    pub trials_flop: u32,
    pub trials_turn: u32,
    pub trials_river: u32,
    /// Effective stack (in big blinds) at or below which a facing-bet
    /// decision gets extra trials
    pub short_stack_bb: f64,
    pub short_stack_multiplier: f64,
    /// Attempts to draw a villain hand from the range before falling back
    pub sample_attempts: u32,
    /// Effective stack (in big blinds) at or below which the preflop
    /// push/fold chart is consulted
    pub push_fold_bb: f64,
    pub think_min_ms: u64,
    pub think_max_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            trials_preflop: 300,
            trials_flop: 500,
            trials_turn: 600,
            trials_river: 800,
            short_stack_bb: 20.0,
            short_stack_multiplier: 2.0,
            sample_attempts: 100,
            push_fold_bb: 12.0,
            think_min_ms: 600,
            think_max_ms: 1_800,
        }
    }
}

impl AiConfig {
    /// Monte-Carlo trials for one decision.
    ///
    /// ```
    /// use tilt_ai::config::AiConfig;
    /// use tilt_engine::logger::Street;
    ///
    /// let cfg = AiConfig::default();
    /// assert_eq!(cfg.trials_for(Street::Flop, false, 100.0), 500);
    /// assert_eq!(cfg.trials_for(Street::Flop, true, 10.0), 1_000);
    /// ```
    pub fn trials_for(&self, street: Street, facing_bet: bool, effective_bb: f64) -> u32 {
        let base = match street {
            Street::Preflop => self.trials_preflop,
            Street::Flop => self.trials_flop,
            Street::Turn => self.trials_turn,
            Street::River => self.trials_river,
        };
        if facing_bet && effective_bb <= self.short_stack_bb {
            (base as f64 * self.short_stack_multiplier).round() as u32
        } else {
            base
        }
    }

    pub fn validate(&self) -> Result<(), AiError> {
        let trials = [
            self.trials_preflop,
            self.trials_flop,
            self.trials_turn,
            self.trials_river,
        ];
        if trials.contains(&0) {
            return Err(AiError::InvalidConfig("trial counts must be > 0".into()));
        }
        if self.sample_attempts == 0 {
            return Err(AiError::InvalidConfig("sample_attempts must be > 0".into()));
        }
        if self.short_stack_multiplier < 1.0 {
            return Err(AiError::InvalidConfig(
                "short_stack_multiplier must be >= 1".into(),
            ));
        }
        if self.think_min_ms > self.think_max_ms {
            return Err(AiError::InvalidConfig(
                "think_min_ms must not exceed think_max_ms".into(),
            ));
        }
        Ok(())
    }
}
