//! Per-street action bookkeeping.
//!
//! Tracks, for each seat, whether it has acted since betting was last
//! (re)opened for it, and whether a full raise has given it the right to
//! raise again. Chip amounts live in [`crate::pot::PotManager`].

use crate::player::Seat;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BettingRound {
    has_acted: [bool; 2],
    can_reopen: [bool; 2],
}

/// Inputs to the round-completion predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundStatus {
    pub has_acted: [bool; 2],
    pub can_reopen: [bool; 2],
    pub bets_equal: bool,
    pub all_in: [bool; 2],
}

/// The betting round is over when both seats have acted with equal bets
/// and neither may reopen, when both are all-in, or when one is all-in
/// and the bets are level.
///
/// ```
/// use tilt_engine::betting::{is_round_complete, RoundStatus};
///
/// let status = RoundStatus {
///     has_acted: [true, true],
///     can_reopen: [false, false],
///     bets_equal: true,
///     all_in: [false, false],
/// };
/// assert!(is_round_complete(&status));
/// ```
pub fn is_round_complete(s: &RoundStatus) -> bool {
    let both_acted = s.has_acted[0] && s.has_acted[1];
    let neither_can_reopen = !s.can_reopen[0] && !s.can_reopen[1];
    let both_all_in = s.all_in[0] && s.all_in[1];
    let one_all_in = s.all_in[0] || s.all_in[1];
    (both_acted && s.bets_equal && neither_can_reopen) || both_all_in || (one_all_in && s.bets_equal)
}

impl BettingRound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears both seats' flags for a fresh street.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_acted(&self, seat: Seat) -> bool {
        self.has_acted[seat.index()]
    }

    pub fn can_reopen(&self, seat: Seat) -> bool {
        self.can_reopen[seat.index()]
    }

    /// A seat may raise until it has acted, and again after a full raise.
    pub fn may_raise(&self, seat: Seat) -> bool {
        !self.has_acted(seat) || self.can_reopen(seat)
    }

    /// Check, call or fold.
    pub fn record_passive(&mut self, seat: Seat) {
        self.has_acted[seat.index()] = true;
        self.can_reopen[seat.index()] = false;
    }

    /// A bet or raise. Only a full raise puts the other seat back in action
    /// with the right to re-raise.
    pub fn record_raise(&mut self, seat: Seat, full_raise: bool) {
        self.record_passive(seat);
        if full_raise {
            let other = seat.other().index();
            self.has_acted[other] = false;
            self.can_reopen[other] = true;
        }
    }

    pub fn status(&self, bets_equal: bool, all_in: [bool; 2]) -> RoundStatus {
        RoundStatus {
            has_acted: self.has_acted,
            can_reopen: self.can_reopen,
            bets_equal,
            all_in,
        }
    }
}
