//! # tilt-engine: heads-up no-limit hold'em core
//!
//! Deals, validates and settles hands between two seats: the externally
//! driven `Player` and the AI `Opponent`. Every chip movement goes through
//! [`engine::Engine`], which checks chip conservation after each step and
//! halts on the first violation.
//!
//! ## Modules
//!
//! - [`cards`] - Card, rank and suit types with text notation
//! - [`deck`] - Seeded ChaCha20 deck with burn and deal
//! - [`hand`] - Seven-card evaluator producing a dense rank (1 = royal flush)
//! - [`rules`] - Min-raise, full-raise, refund and action legality rules
//! - [`pot`] - Per-hand chip accounting
//! - [`betting`] - Per-street action flags and round completion
//! - [`engine`] - The betting round controller
//! - [`events`] - Events returned to the host for presentation
//! - [`game`] - Table config, blind levels and button rotation
//! - [`logger`] - Hand history records written as JSONL
//!
//! ## Quick Start
//!
//! ```rust
//! use tilt_engine::cards::parse_cards;
//! use tilt_engine::hand::{evaluate7, Category};
//!
//! let c = parse_cards("AhKhQhJhTh2c3d").unwrap();
//! let cards: [_; 7] = c.try_into().unwrap();
//! let rank = evaluate7(&cards);
//! assert_eq!(rank, 1);
//! assert_eq!(Category::from_rank(rank), Category::StraightFlush);
//! ```
//!
//! ## Deterministic Dealing
//!
//! ```rust
//! use tilt_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.deal_n(5).unwrap(), b.deal_n(5).unwrap());
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;

pub use engine::{ActionOutcome, Engine, HandPhase, HandResult, SeatView, ShowdownResult};
pub use errors::{GameError, GameResult};
pub use player::{PlayerAction, Seat};
