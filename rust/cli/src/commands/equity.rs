//! `equity`: Monte-Carlo equity of a hand against a range.

use std::io::Write;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use tilt_ai::equity::EquityEngine;
use tilt_ai::notation::HandRange;
use tilt_engine::cards::{parse_cards, Card};

use crate::error::CliError;
use crate::ui;

fn parse_hero(s: &str) -> Result<[Card; 2], CliError> {
    let cards = parse_cards(s)?;
    cards
        .try_into()
        .map_err(|_| CliError::InvalidInput(format!("hero must be two cards, got '{}'", s)))
}

fn parse_board(s: Option<&str>) -> Result<Vec<Card>, CliError> {
    let cards = match s {
        Some(s) if !s.trim().is_empty() => parse_cards(s)?,
        _ => Vec::new(),
    };
    if !matches!(cards.len(), 0 | 3 | 4 | 5) {
        return Err(CliError::InvalidInput(format!(
            "board must have 0, 3, 4 or 5 cards, got {}",
            cards.len()
        )));
    }
    Ok(cards)
}

fn parse_range(s: &str) -> Result<HandRange, CliError> {
    if s.eq_ignore_ascii_case("random") || s.eq_ignore_ascii_case("any") {
        return Ok(HandRange::top_percent(1.0));
    }
    Ok(HandRange::parse(s)?)
}

pub fn handle_equity_command(
    hero: &str,
    board: Option<&str>,
    range: &str,
    trials: u32,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if trials == 0 {
        ui::write_error(err, "trials must be >= 1")?;
        return Err(CliError::InvalidInput("trials must be >= 1".into()));
    }
    let hero_cards = parse_hero(hero)?;
    let board_cards = parse_board(board)?;
    let mut known: Vec<Card> = hero_cards.iter().chain(board_cards.iter()).copied().collect();
    known.sort();
    if known.windows(2).any(|w| w[0] == w[1]) {
        return Err(CliError::InvalidInput("duplicate card in hero/board".into()));
    }
    let villain = parse_range(range)?;

    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let counts = EquityEngine::default().simulate(hero_cards, &board_cards, &villain, trials, &mut rng);
    if counts.fallbacks > 0 {
        ui::display_warning(
            err,
            &format!(
                "{} of {} trials drew a random hand because the range was blocked",
                counts.fallbacks, trials
            ),
        )?;
    }

    writeln!(
        out,
        "Hero: {}  Board: {}  Range: {} ({} combos)",
        hero,
        board.filter(|b| !b.trim().is_empty()).unwrap_or("-"),
        range,
        villain.combo_count()
    )?;
    writeln!(
        out,
        "Equity: {:.4}  (wins {}, ties {}, losses {} over {} trials, seed {})",
        counts.equity(),
        counts.wins,
        counts.ties,
        counts.losses,
        counts.trials(),
        seed
    )?;
    Ok(())
}
