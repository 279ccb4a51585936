//! Opponent personalities and the tilt meter.
//!
//! A [`Personality`] is static data loaded from the embedded preset file.
//! [`PersonalityState`] carries the mutable side for one match: the tilt
//! meter, the losing streak and the starting stack used for surrender.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AiError;

const BUILTIN_PRESETS: &str = include_str!("../presets/personalities.toml");

pub const MAX_TILT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub id: String,
    pub name: String,
    pub aggression: f64,
    pub bluff_frequency: f64,
    /// Bias toward folding marginal hands
    pub fold_threshold: f64,
    pub risk_tolerance: f64,
    /// Multiplier applied to every tilt increase
    pub tilt_sensitivity: f64,
    pub call_tendency: f64,
    /// Scales relief from winning hands
    pub composure: f64,
    /// Base bet size as a fraction of the pot
    pub bet_size_factor: f64,
    /// Above 1.0 the bot makes deliberate exploitable errors
    pub mistake_factor: f64,
    pub rage_quit_threshold: f64,
    pub surrender_chip_percent: f64,
}

impl Personality {
    /// How wide the bot plays, from its calling and folding traits.
    pub fn looseness(&self) -> f64 {
        ((self.call_tendency + (1.0 - self.fold_threshold)) / 2.0).clamp(0.0, 1.0)
    }
}

#[derive(Deserialize)]
struct PresetFile {
    personality: Vec<Personality>,
}

/// Parses a preset document (`[[personality]]` tables).
pub fn load_presets(src: &str) -> Result<Vec<Personality>, AiError> {
    let file: PresetFile = toml::from_str(src).map_err(|e| AiError::PresetLoad(e.to_string()))?;
    Ok(file.personality)
}

pub fn builtin_presets() -> Result<&'static [Personality], AiError> {
    static PRESETS: OnceLock<Result<Vec<Personality>, AiError>> = OnceLock::new();
    PRESETS
        .get_or_init(|| load_presets(BUILTIN_PRESETS))
        .as_ref()
        .map(Vec::as_slice)
        .map_err(Clone::clone)
}

/// Looks up a built-in preset by id, case-insensitively.
pub fn preset(id: &str) -> Result<Personality, AiError> {
    builtin_presets()?
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id))
        .cloned()
        .ok_or_else(|| AiError::UnknownPreset(id.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TiltState {
    Zen,
    Annoyed,
    Steaming,
    Monkey,
}

impl TiltState {
    pub fn from_meter(meter: f64) -> Self {
        if meter < 10.0 {
            TiltState::Zen
        } else if meter < 25.0 {
            TiltState::Annoyed
        } else if meter < 50.0 {
            TiltState::Steaming
        } else {
            TiltState::Monkey
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EarlyExit {
    /// Left angry once the tilt meter passed the preset's limit
    RageQuit,
    /// Calmly gave up when short-stacked
    Surrender,
}

/// How a finished hand went for the bot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFeedback {
    pub won: bool,
    pub lost: bool,
    /// Pot size in big blinds
    pub pot_bb: f64,
    /// Lost at showdown holding a strong made hand
    pub bad_beat: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalityState {
    base: Personality,
    tilt_meter: f64,
    consecutive_losses: u32,
    starting_chips: u32,
}

impl PersonalityState {
    pub fn new(base: Personality, starting_chips: u32) -> Self {
        Self {
            base,
            tilt_meter: 0.0,
            consecutive_losses: 0,
            starting_chips,
        }
    }

    pub fn base(&self) -> &Personality {
        &self.base
    }
    pub fn tilt_meter(&self) -> f64 {
        self.tilt_meter
    }
    pub fn consecutive_losses(&self) -> u32 {
        self.consecutive_losses
    }
    pub fn tilt_state(&self) -> TiltState {
        TiltState::from_meter(self.tilt_meter)
    }

    /// Tilt resets when a new match starts.
    pub fn reset_for_match(&mut self, starting_chips: u32) {
        self.tilt_meter = 0.0;
        self.consecutive_losses = 0;
        self.starting_chips = starting_chips;
    }

    pub fn add_tilt(&mut self, base_amount: f64) {
        let before = self.tilt_meter;
        self.tilt_meter =
            (self.tilt_meter + base_amount.max(0.0) * self.base.tilt_sensitivity).clamp(0.0, MAX_TILT);
        if TiltState::from_meter(before) != self.tilt_state() {
            info!(from = ?TiltState::from_meter(before), to = ?self.tilt_state(), meter = self.tilt_meter, "tilt state changed");
        }
    }

    pub fn reduce_tilt(&mut self, amount: f64) {
        self.tilt_meter = (self.tilt_meter - amount.max(0.0)).clamp(0.0, MAX_TILT);
    }

    /// Traits after tilt: aggression, bluffing and mistakes grow by
    /// `1 + tilt/100`, the fold threshold shrinks by the same factor.
    pub fn current(&self) -> Personality {
        let scale = 1.0 + self.tilt_meter / 100.0;
        let b = &self.base;
        Personality {
            aggression: (b.aggression * scale).min(1.0),
            bluff_frequency: (b.bluff_frequency * scale).min(1.0),
            fold_threshold: b.fold_threshold / scale,
            mistake_factor: b.mistake_factor * scale,
            ..b.clone()
        }
    }

    /// Applies a finished hand: losses add tilt (scaled by the pot, more
    /// for a bad beat and for a losing streak), wins bring relief.
    pub fn record_hand(&mut self, feedback: &HandFeedback) {
        let pot_bb = feedback.pot_bb.clamp(0.0, 60.0);
        if feedback.lost {
            self.consecutive_losses += 1;
            let mut amount = 3.0 + pot_bb * 0.5;
            if feedback.bad_beat {
                amount += 15.0;
            }
            amount += 4.0 * (self.consecutive_losses - 1).min(5) as f64;
            self.add_tilt(amount);
        } else if feedback.won {
            self.consecutive_losses = 0;
            self.reduce_tilt((2.0 + pot_bb * 0.3) * (0.5 + self.base.composure));
        }
        debug!(
            meter = self.tilt_meter,
            streak = self.consecutive_losses,
            "tilt after hand"
        );
    }

    /// Checked before each hand.
    pub fn early_exit(&self, chips: u32) -> Option<EarlyExit> {
        if self.tilt_meter >= self.base.rage_quit_threshold {
            return Some(EarlyExit::RageQuit);
        }
        let pct = self.base.surrender_chip_percent;
        if pct > 0.0
            && (chips as f64) <= self.starting_chips as f64 * pct
            && self.tilt_state() == TiltState::Zen
        {
            return Some(EarlyExit::Surrender);
        }
        None
    }
}
