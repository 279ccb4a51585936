//! Per-hand chip accounting for a heads-up pot.
//!
//! The pot manager never touches stacks. The controller moves chips out of
//! a stack and hands the same amount to [`PotManager::add_bet`], and moves
//! refunds the other way, so `stacks + main_pot + street bets` stays fixed
//! for the whole hand.

use serde::{Deserialize, Serialize};

use crate::player::Seat;
use crate::rules::{calculate_refund, Refund};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotManager {
    main_pot: u32,
    street_bets: [u32; 2],
    current_bet: u32,
    previous_bet: u32,
    last_raise_amount: u32,
    total_contributed: [u32; 2],
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_for_new_hand(&mut self) {
        *self = Self::default();
    }

    pub fn main_pot(&self) -> u32 {
        self.main_pot
    }
    pub fn street_bet(&self, seat: Seat) -> u32 {
        self.street_bets[seat.index()]
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn previous_bet(&self) -> u32 {
        self.previous_bet
    }
    pub fn last_raise_amount(&self) -> u32 {
        self.last_raise_amount
    }
    pub fn total_contributed(&self, seat: Seat) -> u32 {
        self.total_contributed[seat.index()]
    }

    /// Chips still owed by `seat` to match the current bet.
    pub fn to_call(&self, seat: Seat) -> u32 {
        self.current_bet.saturating_sub(self.street_bet(seat))
    }

    /// Settled pot plus both unsettled street bets. Used for pot odds and
    /// sizing; payouts use [`main_pot`](Self::main_pot) after settlement.
    pub fn effective_pot(&self) -> u32 {
        self.main_pot + self.street_bets[0] + self.street_bets[1]
    }

    pub fn bets_equal(&self) -> bool {
        self.street_bets[0] == self.street_bets[1]
    }

    pub fn add_bet(&mut self, seat: Seat, amount: u32) {
        let i = seat.index();
        self.street_bets[i] += amount;
        self.total_contributed[i] += amount;
        let new_total = self.street_bets[i];
        if new_total > self.current_bet {
            self.previous_bet = self.current_bet;
            self.current_bet = new_total;
            self.last_raise_amount = new_total - self.previous_bet;
        }
    }

    /// Inverse of [`add_bet`](Self::add_bet) for chips still on the street.
    /// Returns the amount actually removed.
    pub fn remove_bet(&mut self, seat: Seat, amount: u32) -> u32 {
        let i = seat.index();
        let removed = amount.min(self.street_bets[i]);
        self.street_bets[i] -= removed;
        self.total_contributed[i] -= removed;
        self.current_bet = self.street_bets[0].max(self.street_bets[1]);
        if self.previous_bet > self.current_bet {
            self.previous_bet = self.current_bet;
        }
        removed
    }

    /// Returns settled chips to `seat`. Only refunds may draw on the pot.
    fn remove_from_pot(&mut self, seat: Seat, amount: u32) -> u32 {
        let removed = amount
            .min(self.main_pot)
            .min(self.total_contributed[seat.index()]);
        self.main_pot -= removed;
        self.total_contributed[seat.index()] -= removed;
        removed
    }

    /// Moves both street bets into the main pot and clears the street trackers.
    pub fn settle_street_into_pot(&mut self) {
        self.main_pot += self.street_bets[0] + self.street_bets[1];
        self.street_bets = [0, 0];
        self.current_bet = 0;
        self.previous_bet = 0;
        self.last_raise_amount = 0;
    }

    /// Returns the uncalled part of one seat's street bet when the other
    /// seat cannot add more. The caller credits the returned chips to the stack.
    pub fn refund_street_excess(&mut self, seat: Seat) -> Refund {
        let excess = self.street_bet(seat) as i64 - self.street_bet(seat.other()) as i64;
        let refund = calculate_refund(excess, self.street_bet(seat));
        self.remove_bet(seat, refund.from_street);
        refund
    }

    /// Levels total contributions: whichever seat put in more gets the
    /// difference back, first from its unsettled street bet, then from the
    /// main pot. The caller credits the refund to that seat's stack.
    pub fn calculate_and_process_refunds(&mut self) -> Option<(Seat, Refund)> {
        let diff = self.total_contributed[0] as i64 - self.total_contributed[1] as i64;
        let seat = match diff {
            0 => return None,
            d if d > 0 => Seat::Player,
            _ => Seat::Opponent,
        };
        let refund = calculate_refund(diff.abs(), self.street_bet(seat));
        let from_street = self.remove_bet(seat, refund.from_street);
        let from_pot = self.remove_from_pot(seat, refund.from_pot);
        Some((
            seat,
            Refund {
                amount: from_street + from_pot,
                from_street,
                from_pot,
            },
        ))
    }

    /// Empties the main pot, returning its size. Street bets must be settled first.
    pub fn take_main_pot(&mut self) -> u32 {
        std::mem::take(&mut self.main_pot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blinds_set_current_previous_and_increment() {
        let mut pm = PotManager::new();
        pm.add_bet(Seat::Player, 5);
        pm.add_bet(Seat::Opponent, 10);
        assert_eq!(pm.current_bet(), 10);
        assert_eq!(pm.previous_bet(), 5);
        assert_eq!(pm.last_raise_amount(), 5);
        assert_eq!(pm.to_call(Seat::Player), 5);
        assert_eq!(pm.effective_pot(), 15);
    }

    #[test]
    fn settle_moves_street_chips_once() {
        let mut pm = PotManager::new();
        pm.add_bet(Seat::Player, 10);
        pm.add_bet(Seat::Opponent, 10);
        pm.settle_street_into_pot();
        assert_eq!(pm.main_pot(), 20);
        assert_eq!(pm.street_bet(Seat::Player), 0);
        assert_eq!(pm.current_bet(), 0);
        pm.settle_street_into_pot();
        assert_eq!(pm.main_pot(), 20);
    }

    #[test]
    fn refunds_draw_from_street_before_pot() {
        let mut pm = PotManager::new();
        pm.add_bet(Seat::Player, 40);
        pm.add_bet(Seat::Opponent, 20);
        pm.settle_street_into_pot();
        pm.add_bet(Seat::Player, 5);
        let (seat, refund) = pm.calculate_and_process_refunds().unwrap();
        assert_eq!(seat, Seat::Player);
        assert_eq!(refund.amount, 25);
        assert_eq!(refund.from_street, 5);
        assert_eq!(refund.from_pot, 20);
        assert_eq!(pm.main_pot(), 40);
        assert_eq!(pm.total_contributed(Seat::Player), 20);
        assert!(pm.calculate_and_process_refunds().is_none());
    }

    #[test]
    fn street_excess_refund_levels_bets() {
        let mut pm = PotManager::new();
        pm.add_bet(Seat::Player, 50);
        pm.add_bet(Seat::Opponent, 15);
        let refund = pm.refund_street_excess(Seat::Player);
        assert_eq!(refund.amount, 35);
        assert_eq!(refund.from_pot, 0);
        assert!(pm.bets_equal());
        assert_eq!(pm.current_bet(), 15);
    }
}
