use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// 52-card deck dealt sequentially from the top.
///
/// The shuffle is rand's in-place Fisher-Yates over a fresh 52-card set,
/// driven by a seeded ChaCha20 stream so a match is reproducible from its seed.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        let c = *self
            .cards
            .get(self.position)
            .ok_or(GameError::DeckExhausted)?;
        self.position += 1;
        Ok(c)
    }

    pub fn deal_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        (0..n).map(|_| self.deal_card()).collect()
    }

    pub fn burn_card(&mut self) -> Result<(), GameError> {
        self.deal_card().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
