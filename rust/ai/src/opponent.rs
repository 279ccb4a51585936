//! What the bot has learned about the human seat.

use std::collections::VecDeque;

use serde::Serialize;

use tilt_engine::logger::Street;
use tilt_engine::player::PlayerAction;

use crate::notation::HandRange;

/// Preflop decisions needed before frequencies mean anything.
pub const MIN_SAMPLE: u32 = 5;
/// Returned for every frequency until [`MIN_SAMPLE`] is reached.
pub const NEUTRAL_FREQUENCY: f64 = 0.45;
pub const HISTORY_LEN: usize = 30;
const RECENCY_DECAY: f64 = 0.8;

/// Range the bot assumes for the human seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RangeProfile {
    Maniac,
    Loose,
    Balanced,
    Tight,
    PostflopWeak,
    PostflopMedium,
    PostflopStrong,
    RiverShove,
}

impl RangeProfile {
    pub fn range(self) -> HandRange {
        match self {
            RangeProfile::Maniac => HandRange::top_percent(0.85),
            RangeProfile::Loose => HandRange::top_percent(0.50),
            RangeProfile::Balanced => HandRange::top_percent(0.35),
            RangeProfile::Tight => HandRange::top_percent(0.15),
            RangeProfile::PostflopWeak => HandRange::top_percent(0.60),
            RangeProfile::PostflopMedium => HandRange::top_percent(0.30),
            RangeProfile::PostflopStrong => HandRange::top_percent(0.12),
            RangeProfile::RiverShove => {
                HandRange::parse("QQ+,AKs").unwrap_or_else(|_| HandRange::top_percent(0.03))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObservedAction {
    pub street: Street,
    pub action: PlayerAction,
    /// Chips moved by the action
    pub amount: u32,
    /// Effective pot before the action
    pub pot: u32,
    pub all_in: bool,
}

impl ObservedAction {
    /// 0.0 for a fold up to 1.0 for an all-in.
    pub fn strength(&self) -> f64 {
        if self.all_in && self.action.is_aggressive() {
            return 1.0;
        }
        match self.action {
            PlayerAction::Fold => 0.0,
            PlayerAction::Check => 0.3,
            PlayerAction::Call => 0.5,
            PlayerAction::AllIn => 1.0,
            PlayerAction::Raise(_) => {
                let ratio = self.amount as f64 / self.pot.max(1) as f64;
                if ratio < 0.5 {
                    0.65
                } else if ratio < 1.0 {
                    0.8
                } else {
                    0.95
                }
            }
        }
    }

    fn is_big_bet(&self) -> bool {
        self.all_in || (self.action.is_aggressive() && self.amount >= self.pot)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpponentModel {
    preflop_raises: u32,
    preflop_calls: u32,
    preflop_folds: u32,
    preflop_decisions: u32,
    all_ins: u32,
    hands_observed: u32,
    history: VecDeque<ObservedAction>,
}

impl OpponentModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, seen: ObservedAction) {
        if seen.street == Street::Preflop {
            self.preflop_decisions += 1;
            match seen.action {
                PlayerAction::Fold => self.preflop_folds += 1,
                PlayerAction::Call | PlayerAction::Check => self.preflop_calls += 1,
                PlayerAction::Raise(_) | PlayerAction::AllIn => self.preflop_raises += 1,
            }
        }
        if seen.all_in {
            self.all_ins += 1;
        }
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(seen);
    }

    pub fn end_hand(&mut self) {
        self.hands_observed += 1;
    }

    pub fn hands_observed(&self) -> u32 {
        self.hands_observed
    }
    pub fn all_ins(&self) -> u32 {
        self.all_ins
    }
    pub fn history(&self) -> &VecDeque<ObservedAction> {
        &self.history
    }

    fn frequency(&self, count: u32) -> f64 {
        if self.preflop_decisions < MIN_SAMPLE {
            NEUTRAL_FREQUENCY
        } else {
            count as f64 / self.preflop_decisions as f64
        }
    }

    pub fn raise_frequency(&self) -> f64 {
        self.frequency(self.preflop_raises)
    }
    pub fn call_frequency(&self) -> f64 {
        self.frequency(self.preflop_calls)
    }
    pub fn fold_frequency(&self) -> f64 {
        self.frequency(self.preflop_folds)
    }

    pub fn is_maniac(&self) -> bool {
        self.raise_frequency() >= 0.85
    }

    fn preflop_profile(&self) -> RangeProfile {
        let f = self.raise_frequency();
        if f >= 0.85 {
            RangeProfile::Maniac
        } else if f >= 0.60 {
            RangeProfile::Loose
        } else if f < 0.30 {
            RangeProfile::Tight
        } else {
            RangeProfile::Balanced
        }
    }

    /// Recency-weighted strength of the latest postflop actions, 0.5 when
    /// nothing has been seen.
    pub fn strength(&self) -> f64 {
        let mut weight = 1.0;
        let (mut sum, mut total) = (0.0, 0.0);
        for seen in self.history.iter().rev().filter(|a| a.street != Street::Preflop) {
            sum += seen.strength() * weight;
            total += weight;
            weight *= RECENCY_DECAY;
        }
        if total == 0.0 { 0.5 } else { sum / total }
    }

    /// Which range to simulate against for a decision on `street`.
    pub fn estimate_range(&self, street: Street, facing_bet: bool) -> RangeProfile {
        if street == Street::Preflop || !facing_bet {
            return self.preflop_profile();
        }
        let last = self.history.back();
        if street == Street::River && last.is_some_and(|a| a.street == Street::River && a.is_big_bet()) {
            return RangeProfile::RiverShove;
        }
        if self.is_maniac() {
            return RangeProfile::Maniac;
        }
        let s = self.strength();
        if s >= 0.75 {
            RangeProfile::PostflopStrong
        } else if s >= 0.55 {
            RangeProfile::PostflopMedium
        } else {
            RangeProfile::PostflopWeak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seen(street: Street, action: PlayerAction, amount: u32, pot: u32) -> ObservedAction {
        ObservedAction {
            street,
            action,
            amount,
            pot,
            all_in: false,
        }
    }

    #[test]
    fn neutral_until_sample_is_reached() {
        let mut m = OpponentModel::new();
        for _ in 0..4 {
            m.observe(seen(Street::Preflop, PlayerAction::Raise(30), 25, 15));
        }
        assert_eq!(m.raise_frequency(), NEUTRAL_FREQUENCY);
        assert_eq!(m.estimate_range(Street::Preflop, true), RangeProfile::Balanced);
        m.observe(seen(Street::Preflop, PlayerAction::Raise(30), 25, 15));
        assert_eq!(m.raise_frequency(), 1.0);
        assert!(m.is_maniac());
        assert_eq!(m.estimate_range(Street::Preflop, true), RangeProfile::Maniac);
    }

    #[test]
    fn preflop_buckets() {
        let mut m = OpponentModel::new();
        for _ in 0..10 {
            m.observe(seen(Street::Preflop, PlayerAction::Call, 5, 15));
        }
        assert_eq!(m.estimate_range(Street::Preflop, true), RangeProfile::Tight);
        for _ in 0..20 {
            m.observe(seen(Street::Preflop, PlayerAction::Raise(30), 25, 15));
        }
        assert_eq!(m.estimate_range(Street::Preflop, false), RangeProfile::Loose);
    }

    #[test]
    fn history_is_bounded() {
        let mut m = OpponentModel::new();
        for _ in 0..(HISTORY_LEN + 10) {
            m.observe(seen(Street::Flop, PlayerAction::Check, 0, 20));
        }
        assert_eq!(m.history().len(), HISTORY_LEN);
    }

    #[test]
    fn recent_big_bets_read_strong() {
        let mut m = OpponentModel::new();
        m.observe(seen(Street::Flop, PlayerAction::Check, 0, 20));
        assert!(m.strength() < 0.5);
        m.observe(seen(Street::Flop, PlayerAction::Raise(20), 20, 20));
        m.observe(seen(Street::Turn, PlayerAction::Raise(40), 40, 40));
        assert!(m.strength() > 0.75);
        assert_eq!(m.estimate_range(Street::Turn, true), RangeProfile::PostflopStrong);

        m.observe(ObservedAction {
            all_in: true,
            ..seen(Street::River, PlayerAction::AllIn, 500, 100)
        });
        assert_eq!(m.estimate_range(Street::River, true), RangeProfile::RiverShove);
    }

    #[test]
    fn pot_sized_raises_count_as_strong() {
        let mut m = OpponentModel::new();
        m.observe(seen(Street::Flop, PlayerAction::Check, 0, 20));
        m.observe(seen(Street::Flop, PlayerAction::Raise(20), 20, 20));
        m.observe(seen(Street::Turn, PlayerAction::Raise(60), 60, 60));
        assert_eq!(m.estimate_range(Street::Turn, true), RangeProfile::PostflopStrong);

        let small = seen(Street::Flop, PlayerAction::Raise(5), 5, 20).strength();
        let half = seen(Street::Flop, PlayerAction::Raise(10), 10, 20).strength();
        let pot = seen(Street::Flop, PlayerAction::Raise(20), 20, 20).strength();
        assert!(small < half && half < pot && pot < 1.0);
    }

    #[test]
    fn profiles_narrow_with_strength() {
        let widths: Vec<f64> = [
            RangeProfile::Maniac,
            RangeProfile::Loose,
            RangeProfile::Balanced,
            RangeProfile::Tight,
            RangeProfile::RiverShove,
        ]
        .iter()
        .map(|p| p.range().fraction())
        .collect();
        assert!(widths.windows(2).all(|w| w[0] > w[1]));
    }
}
