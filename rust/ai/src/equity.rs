//! Monte-Carlo equity against a hand range.

use rand::Rng;
use tracing::{trace, warn};

use tilt_engine::cards::{Card, full_deck};
use tilt_engine::hand::{compare_hands, evaluate_hand};

use crate::notation::HandRange;

pub const MIN_EQUITY: f64 = 0.01;
pub const MAX_EQUITY: f64 = 0.99;

/// Raw tallies from a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EquityCounts {
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
    /// Trials whose villain hand came from the fallback draw
    pub fallbacks: u32,
}

impl EquityCounts {
    pub fn trials(&self) -> u32 {
        self.wins + self.ties + self.losses
    }

    /// Win rate counting ties as half, clamped to `[0.01, 0.99]`.
    pub fn equity(&self) -> f64 {
        let n = self.trials();
        if n == 0 {
            return 0.5;
        }
        let raw = (self.wins as f64 + 0.5 * self.ties as f64) / n as f64;
        raw.clamp(MIN_EQUITY, MAX_EQUITY)
    }
}

/// Estimates how often `hero` beats a hand drawn from `range`.
#[derive(Debug, Clone, Copy)]
pub struct EquityEngine {
    sample_attempts: u32,
}

impl Default for EquityEngine {
    fn default() -> Self {
        Self::new(100)
    }
}

impl EquityEngine {
    pub fn new(sample_attempts: u32) -> Self {
        Self {
            sample_attempts: sample_attempts.max(1),
        }
    }

    /// Equity in `[0.01, 0.99]`.
    pub fn calculate<R: Rng>(
        &self,
        hero: [Card; 2],
        board: &[Card],
        range: &HandRange,
        trials: u32,
        rng: &mut R,
    ) -> f64 {
        self.simulate(hero, board, range, trials, rng).equity()
    }

    pub fn simulate<R: Rng>(
        &self,
        hero: [Card; 2],
        board: &[Card],
        range: &HandRange,
        trials: u32,
        rng: &mut R,
    ) -> EquityCounts {
        let board = &board[..board.len().min(5)];
        let dead: Vec<Card> = hero.iter().chain(board.iter()).copied().collect();
        let live: Vec<Card> = full_deck().into_iter().filter(|c| !dead.contains(c)).collect();
        let combos = range.combos();
        let mut counts = EquityCounts::default();

        for _ in 0..trials {
            let villain = match self.sample_villain(&combos, &dead, rng) {
                Some(v) => v,
                None => {
                    counts.fallbacks += 1;
                    any_pair(&live, rng)
                }
            };
            let mut stub: Vec<Card> = live
                .iter()
                .copied()
                .filter(|c| !villain.contains(c))
                .collect();
            let needed = 5 - board.len();
            // partial Fisher-Yates over the first `needed` slots
            for i in 0..needed {
                let j = rng.random_range(i..stub.len());
                stub.swap(i, j);
            }
            let runout = &stub[..needed];
            let full: Vec<Card> = board.iter().chain(runout.iter()).copied().collect();
            let hero_hand = evaluate_hand(&[hero[0], hero[1], full[0], full[1], full[2], full[3], full[4]]);
            let villain_hand = evaluate_hand(&[
                villain[0], villain[1], full[0], full[1], full[2], full[3], full[4],
            ]);
            match compare_hands(&hero_hand, &villain_hand) {
                std::cmp::Ordering::Greater => counts.wins += 1,
                std::cmp::Ordering::Equal => counts.ties += 1,
                std::cmp::Ordering::Less => counts.losses += 1,
            }
        }

        if counts.fallbacks > 0 {
            warn!(
                range = %range,
                fallbacks = counts.fallbacks,
                trials,
                "range sampling fell back to random hands"
            );
        }
        trace!(wins = counts.wins, ties = counts.ties, losses = counts.losses, "equity run");
        counts
    }

    /// Draws a combo from the range that does not collide with known cards.
    fn sample_villain<R: Rng>(
        &self,
        combos: &[[Card; 2]],
        dead: &[Card],
        rng: &mut R,
    ) -> Option<[Card; 2]> {
        if combos.is_empty() {
            return None;
        }
        (0..self.sample_attempts)
            .map(|_| combos[rng.random_range(0..combos.len())])
            .find(|[a, b]| !dead.contains(a) && !dead.contains(b))
    }
}

fn any_pair<R: Rng>(live: &[Card], rng: &mut R) -> [Card; 2] {
    let i = rng.random_range(0..live.len());
    let mut j = rng.random_range(0..live.len() - 1);
    if j >= i {
        j += 1;
    }
    [live[i], live[j]]
}

/// Convenience wrapper with the default sampling bound.
pub fn calculate_equity<R: Rng>(
    hero: [Card; 2],
    board: &[Card],
    range: &HandRange,
    trials: u32,
    rng: &mut R,
) -> f64 {
    EquityEngine::default().calculate(hero, board, range, trials, rng)
}
