use serde::{Deserialize, Serialize};

use crate::player::{Player, Seat, STARTING_STACK};

const BLIND_LEVELS: [(u32, u32); 10] = [
    (5, 10),
    (10, 20),
    (15, 30),
    (25, 50),
    (50, 100),
    (75, 150),
    (100, 200),
    (150, 300),
    (200, 400),
    (300, 600),
];

/// Small and big blind for a 1-based blind level; levels past the table
/// stay at the top level.
pub fn blinds_for_level(level: u8) -> (u32, u32) {
    let idx = (level.max(1) as usize - 1).min(BLIND_LEVELS.len() - 1);
    BLIND_LEVELS[idx]
}

/// Table stakes and pacing for a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Chips each seat starts the match with
    pub buy_in: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Pause the host should leave before showing a newly dealt street
    pub street_delay_ms: u64,
    /// Pause between streets when the board runs out after an all-in
    pub runout_delay_ms: u64,
    /// Deal the next street as soon as a betting round closes
    pub auto_advance: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            buy_in: STARTING_STACK,
            small_blind: 5,
            big_blind: 10,
            street_delay_ms: 600,
            runout_delay_ms: 1_200,
            auto_advance: true,
        }
    }
}

impl TableConfig {
    pub fn for_level(level: u8, buy_in: u32) -> Self {
        let (small_blind, big_blind) = blinds_for_level(level);
        Self {
            buy_in,
            small_blind,
            big_blind,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.big_blind == 0 || self.small_blind == 0 {
            return Err("blinds must be > 0".into());
        }
        if self.small_blind > self.big_blind {
            return Err("small blind must not exceed big blind".into());
        }
        if self.buy_in < self.big_blind {
            return Err("buy-in must cover at least one big blind".into());
        }
        Ok(())
    }
}

/// Match-level seating: who holds the button and how many hands were played.
#[derive(Debug, Clone)]
pub struct GameState {
    button: Seat,
    hands_started: u64,
    players: [Player; 2],
}

impl GameState {
    pub fn new(buy_in: u32) -> Self {
        Self {
            button: Seat::Player,
            hands_started: 0,
            players: [
                Player::new(buy_in),
                Player::new(buy_in),
            ],
        }
    }

    pub fn button(&self) -> Seat {
        self.button
    }

    pub fn big_blind_seat(&self) -> Seat {
        self.button.other()
    }

    pub fn hands_started(&self) -> u64 {
        self.hands_started
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    /// Advances to the next hand. The button alternates every hand after the first.
    pub fn begin_hand(&mut self) {
        if self.hands_started > 0 {
            self.rotate_button();
        }
        self.hands_started += 1;
        for p in &mut self.players {
            p.reset_for_hand();
        }
    }

    pub fn rotate_button(&mut self) {
        self.button = self.button.other();
    }
}
