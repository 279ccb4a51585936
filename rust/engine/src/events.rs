//! Presentation-facing record of every state transition.
//!
//! The controller returns these from each call instead of firing callbacks;
//! a host renders them in order and honours any `delay_ms` before the next one.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::logger::Street;
use crate::player::{PlayerAction, Seat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HandEvent {
    HandStarted {
        hand_no: u64,
        button: Seat,
        stacks: [u32; 2],
    },
    BlindPosted {
        seat: Seat,
        amount: u32,
        all_in: bool,
    },
    HoleCardsDealt {
        seat: Seat,
    },
    ActionApplied {
        seat: Seat,
        action: PlayerAction,
        amount: u32,
        street_total: u32,
        all_in: bool,
    },
    UncalledBetReturned {
        seat: Seat,
        amount: u32,
    },
    RoundComplete {
        street: Street,
        pot: u32,
    },
    StreetDealt {
        street: Street,
        cards: Vec<Card>,
        delay_ms: u64,
    },
    Showdown {
        player_rank: u16,
        opponent_rank: u16,
        winners: Vec<Seat>,
    },
    PotAwarded {
        seat: Seat,
        amount: u32,
    },
    HandEnded {
        net: [i64; 2],
    },
}
