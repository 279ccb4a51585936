//! The threshold decision engine.
//!
//! Each decision runs the same pipeline: the short-stack push/fold chart,
//! Monte-Carlo equity against the estimated range, a base threshold from
//! the tables, personality and opponent adjustments, optional injected
//! mistakes, then either an all-in call/fold or a randomized mixed
//! strategy with pot-relative sizing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::debug;

use tilt_engine::engine::SeatView;
use tilt_engine::logger::Street;
use tilt_engine::player::PlayerAction;

use crate::AIOpponent;
use crate::config::AiConfig;
use crate::equity::EquityEngine;
use crate::notation::HandClass;
use crate::opponent::{OpponentModel, RangeProfile};
use crate::personality::{Personality, PersonalityState};
use crate::thresholds::{all_in_threshold, base_threshold, push_fold_max_bb};

pub const MIN_THRESHOLD: f64 = 0.15;
pub const MAX_THRESHOLD: f64 = 0.90;
/// Mistakes are never injected at or above this equity.
pub const PREMIUM_EQUITY: f64 = 0.80;

/// What the bot knows besides the table view.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub opponent: &'a OpponentModel,
    pub personality: &'a PersonalityState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mistake {
    Overfold,
    Overcall,
    BadBluff,
    MissedValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionPath {
    /// No hole cards to reason about
    NoCards,
    PushFold,
    AllIn,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub action: PlayerAction,
    /// How long the host should wait before showing the action
    pub think_delay_ms: u64,
    pub path: DecisionPath,
    pub equity: Option<f64>,
    pub threshold: Option<f64>,
    pub range: Option<RangeProfile>,
    pub mistake: Option<Mistake>,
    pub bluff: bool,
    pub slow_play: bool,
}

impl Decision {
    fn simple(action: PlayerAction, path: DecisionPath, think_delay_ms: u64) -> Self {
        Self {
            action,
            think_delay_ms,
            path,
            equity: None,
            threshold: None,
            range: None,
            mistake: None,
            bluff: false,
            slow_play: false,
        }
    }
}

/// Stack-to-pot ratio from `view`'s side.
pub fn spr(view: &SeatView) -> f64 {
    view.stack as f64 / view.pot.max(1) as f64
}

/// Steps 3 and 4 of the pipeline: personality looseness widens, a maniac
/// opponent widens, a strong-looking opponent tightens, and cheap prices
/// can only widen further.
pub fn adjusted_threshold(
    base: f64,
    personality: &Personality,
    opponent: &OpponentModel,
    view: &SeatView,
) -> f64 {
    let mut t = base - (personality.looseness() - 0.5) * 0.12;
    if opponent.is_maniac() {
        t -= 0.06;
    }
    if view.facing_bet() && view.street != Street::Preflop {
        t += (opponent.strength() - 0.5).max(0.0) * 0.2;
    }
    if view.facing_bet() && view.to_call as f64 <= view.pot as f64 * 0.5 {
        let price = view.to_call as f64 / (view.pot + view.to_call) as f64;
        t = t.min(price + 0.10);
    }
    t
}

#[derive(Debug, Clone)]
pub struct DecisionEngine {
    config: AiConfig,
    equity: EquityEngine,
    rng: ChaCha20Rng,
}

impl DecisionEngine {
    pub fn new(config: AiConfig, seed: u64) -> Self {
        Self {
            equity: EquityEngine::new(config.sample_attempts),
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    fn think_delay(&mut self, quick: bool) -> u64 {
        if quick {
            self.config.think_min_ms
        } else {
            self.rng
                .random_range(self.config.think_min_ms..=self.config.think_max_ms)
        }
    }

    pub fn decide(&mut self, view: &SeatView, ctx: &DecisionContext<'_>) -> Decision {
        let Some(hole) = view.hole else {
            let action = if view.facing_bet() {
                PlayerAction::Fold
            } else {
                PlayerAction::Check
            };
            return Decision::simple(action, DecisionPath::NoCards, self.config.think_min_ms);
        };
        let personality = ctx.personality.current();
        let facing = view.facing_bet();
        let effective_bb = view.effective_stack() as f64 / view.big_blind.max(1) as f64;

        // 1. short-stack chart
        if view.street == Street::Preflop && facing && effective_bb <= self.config.push_fold_bb {
            let class = HandClass::from_cards(hole[0], hole[1]);
            if let Some(max_bb) = push_fold_max_bb(&class) {
                let action = if effective_bb > max_bb {
                    PlayerAction::Fold
                } else if view.opponent_all_in || !view.may_raise {
                    PlayerAction::Call
                } else {
                    PlayerAction::AllIn
                };
                debug!(%class, effective_bb, max_bb, ?action, "push/fold chart");
                let delay = self.think_delay(true);
                return Decision::simple(action, DecisionPath::PushFold, delay);
            }
        }

        // 2. equity against the estimated range
        let profile = ctx.opponent.estimate_range(view.street, facing);
        let trials = self.config.trials_for(view.street, facing, effective_bb);
        let equity = self
            .equity
            .calculate(hole, &view.board, &profile.range(), trials, &mut self.rng);

        // 3-6. threshold
        let spr = spr(view);
        let base = base_threshold(view.street, facing, spr);
        let adjusted = adjusted_threshold(base, &personality, ctx.opponent, view);
        let (perturbed, mistake) = self.inject_mistake(adjusted, equity, facing, &personality);
        let threshold = perturbed.clamp(MIN_THRESHOLD, MAX_THRESHOLD);

        let mut decision = Decision {
            equity: Some(equity),
            threshold: Some(threshold),
            range: Some(profile),
            mistake,
            ..Decision::simple(PlayerAction::Check, DecisionPath::Mixed, 0)
        };

        // 7. all-in pressure
        let commitment = view.to_call as f64 / view.stack.max(1) as f64;
        if facing && (commitment > 0.75 || spr < 2.5 || view.opponent_all_in) {
            let line = (all_in_threshold(view.street, spr) - (personality.risk_tolerance - 0.5) * 0.10)
                .clamp(MIN_THRESHOLD, MAX_THRESHOLD);
            decision.path = DecisionPath::AllIn;
            decision.threshold = Some(line);
            decision.action = if equity < line {
                PlayerAction::Fold
            } else if equity >= line + 0.20 && view.may_raise && !view.opponent_all_in {
                PlayerAction::AllIn
            } else {
                PlayerAction::Call
            };
        } else {
            // 8-9. mixed strategy and sizing
            self.mixed_strategy(view, &personality, equity, threshold, &mut decision);
        }

        decision.think_delay_ms = self.think_delay(false);
        debug!(
            street = ?view.street,
            equity,
            threshold = decision.threshold.unwrap_or(threshold),
            range = ?profile,
            trials,
            ?mistake,
            action = ?decision.action,
            path = ?decision.path,
            "ai decision"
        );
        decision
    }

    fn inject_mistake(
        &mut self,
        threshold: f64,
        equity: f64,
        facing: bool,
        p: &Personality,
    ) -> (f64, Option<Mistake>) {
        let intensity = (p.mistake_factor - 1.0).max(0.0);
        if intensity == 0.0 || equity >= PREMIUM_EQUITY {
            return (threshold, None);
        }
        let chance = (intensity * 0.25).min(0.5);
        if self.rng.random::<f64>() >= chance {
            return (threshold, None);
        }
        let shift = 0.08 + 0.07 * intensity.min(1.0);
        let first = self.rng.random_bool(0.5);
        match (facing, first) {
            (true, true) => (threshold + shift, Some(Mistake::Overfold)),
            (true, false) => (threshold - shift, Some(Mistake::Overcall)),
            (false, true) => (threshold - shift, Some(Mistake::BadBluff)),
            (false, false) => (threshold + shift, Some(Mistake::MissedValue)),
        }
    }

    fn mixed_strategy(
        &mut self,
        view: &SeatView,
        p: &Personality,
        equity: f64,
        threshold: f64,
        decision: &mut Decision,
    ) {
        // independent draws so bluffing and slow-playing do not correlate
        let bluff_roll: f64 = self.rng.random();
        let slow_roll: f64 = self.rng.random();
        let can_raise = view.may_raise;

        if view.facing_bet() {
            let raise_line = threshold + 0.18 - 0.10 * p.aggression;
            if equity >= raise_line && can_raise {
                if equity >= PREMIUM_EQUITY && slow_roll < 0.25 * (1.0 - p.aggression) {
                    decision.action = PlayerAction::Call;
                    decision.slow_play = true;
                } else {
                    decision.action = size_bet(view, p, equity, false);
                }
            } else if equity >= threshold {
                if can_raise && bluff_roll < p.bluff_frequency * 0.3 {
                    decision.action = size_bet(view, p, equity, true);
                    decision.bluff = true;
                } else {
                    decision.action = PlayerAction::Call;
                }
            } else if can_raise && view.street != Street::River && bluff_roll < p.bluff_frequency * 0.5
            {
                decision.action = size_bet(view, p, equity, true);
                decision.bluff = true;
            } else {
                decision.action = PlayerAction::Fold;
            }
            return;
        }

        if equity >= threshold {
            if equity >= PREMIUM_EQUITY && slow_roll < 0.30 * (1.0 - p.aggression) {
                decision.action = PlayerAction::Check;
                decision.slow_play = true;
            } else if can_raise {
                decision.action = size_bet(view, p, equity, false);
            }
        } else if can_raise && bluff_roll < p.bluff_frequency {
            decision.action = size_bet(view, p, equity, true);
            decision.bluff = true;
        } else {
            decision.action = PlayerAction::Check;
        }
    }
}

/// Pot-relative bet or raise, floored at the legal minimum and turned into
/// a shove when it would leave almost nothing behind.
///
/// ```
/// use tilt_ai::decision::size_bet;
/// use tilt_ai::personality::preset;
/// use tilt_engine::engine::Engine;
/// use tilt_engine::game::TableConfig;
/// use tilt_engine::player::{PlayerAction, Seat};
///
/// let mut engine = Engine::new(TableConfig::default(), Some(1)).unwrap();
/// engine.start_hand().unwrap();
/// let view = engine.view(Seat::Player);
/// let p = preset("gto").unwrap();
/// match size_bet(&view, &p, 0.7, false) {
///     PlayerAction::Raise(to) => assert!(to >= view.min_raise_total),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn size_bet(view: &SeatView, p: &Personality, equity: f64, bluff: bool) -> PlayerAction {
    let strength = if bluff {
        0.75
    } else if equity >= PREMIUM_EQUITY {
        1.25
    } else if equity >= 0.60 {
        1.0
    } else {
        0.85
    };
    let street = match view.street {
        Street::Preflop => 1.5,
        Street::Flop => 1.0,
        Street::Turn => 1.1,
        Street::River => 1.2,
    };
    let pot_after_call = (view.pot + view.to_call) as f64;
    let bet = ((pot_after_call * p.bet_size_factor * strength * street).round() as u32).max(view.big_blind);
    let target = (view.current_bet + bet)
        .max(view.min_raise_total)
        .min(view.max_raise_total);
    if target as f64 >= view.max_raise_total as f64 * 0.85 {
        PlayerAction::AllIn
    } else {
        PlayerAction::Raise(target)
    }
}

impl AIOpponent for DecisionEngine {
    fn decide(&mut self, view: &SeatView, ctx: &DecisionContext<'_>) -> Decision {
        DecisionEngine::decide(self, view, ctx)
    }

    fn name(&self) -> &str {
        "ThresholdAI"
    }
}
