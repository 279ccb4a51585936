use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// One of the two seats at a heads-up table.
///
/// `Player` is the externally driven (human) seat and `Opponent` is the
/// AI seat. Arrays indexed by seat use [`Seat::index`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::Player, Seat::Opponent];

    pub fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent => 1,
        }
    }

    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }
}

/// Represents a player action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid if no bet to call)
    Check,
    /// Call the current bet, or as much of it as the stack allows
    Call,
    /// Bet or raise so the seat's street contribution totals this amount
    Raise(u32),
    /// Commit every remaining chip
    AllIn,
}

impl PlayerAction {
    pub fn is_aggressive(&self) -> bool {
        matches!(self, PlayerAction::Raise(_) | PlayerAction::AllIn)
    }
}

/// Default buy-in for each seat in chips
pub const STARTING_STACK: u32 = 1_000;

/// A seat's chip stack and hole cards.
#[derive(Debug, Clone)]
pub struct Player {
    stack: u32,
    hole: [Option<Card>; 2],
    folded: bool,
}

impl Player {
    pub fn new(stack: u32) -> Self {
        Self {
            stack,
            hole: [None, None],
            folded: false,
        }
    }

    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn fold(&mut self) {
        self.folded = true;
    }

    /// Both hole cards, once dealt.
    pub fn hand(&self) -> Option<[Card; 2]> {
        match self.hole {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), String> {
        if self.hole[0].is_none() {
            self.hole[0] = Some(c);
            Ok(())
        } else if self.hole[1].is_none() {
            self.hole[1] = Some(c);
            Ok(())
        } else {
            Err("Hole cards already full".to_string())
        }
    }

    pub fn reset_for_hand(&mut self) {
        self.hole = [None, None];
        self.folded = false;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Removes up to `amount` chips and returns how many actually moved.
    pub fn take_chips(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.stack);
        self.stack -= moved;
        moved
    }
}
