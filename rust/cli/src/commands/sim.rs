//! `sim`: a full match between the bot and a stand-in engine.
//!
//! The human seat is played by a second decision engine with its own
//! personality, so a run exercises the whole stack: betting, tilt, the
//! opponent model and early exits. Each finished hand is written as one
//! JSONL record when `--output` is given.
//!
//! ```no_run
//! use tilt_cli::commands::sim::{handle_sim_command, SimArgs};
//! use std::io;
//!
//! let args = SimArgs { hands: 100, seed: Some(42), ..SimArgs::default() };
//! handle_sim_command(args, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use std::io::Write;

use tracing::{debug, info};

use tilt_ai::config::AiConfig;
use tilt_ai::decision::{DecisionContext, DecisionEngine};
use tilt_ai::errors::AiError;
use tilt_ai::opponent::{ObservedAction, OpponentModel};
use tilt_ai::personality::{preset, EarlyExit, PersonalityState};
use tilt_ai::session::{feedback_for, MatchSession};
use tilt_engine::engine::HandPhase;
use tilt_engine::errors::GameError;
use tilt_engine::game::TableConfig;
use tilt_engine::logger::HandLogger;
use tilt_engine::player::Seat;

use crate::config;
use crate::error::CliError;
use crate::ui;

/// Flags for `sim`; `None` falls back to the layered configuration.
#[derive(Debug, Clone, Default)]
pub struct SimArgs {
    pub hands: u64,
    pub seed: Option<u64>,
    pub level: Option<u8>,
    pub opponent: Option<String>,
    pub stand_in: Option<String>,
    pub output: Option<String>,
}

/// The engine playing the human seat, with its own memory of the bot.
struct StandIn {
    engine: DecisionEngine,
    personality: PersonalityState,
    model: OpponentModel,
}

#[derive(Debug, Default)]
struct Totals {
    hands: u64,
    showdowns: u64,
    bot_wins: u64,
    stand_in_wins: u64,
    splits: u64,
}

pub fn handle_sim_command(
    args: SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if args.hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let resolved = config::load_with_sources().map_err(|e| {
        let msg = format!("Invalid configuration: {}", e);
        let _ = ui::write_error(err, &msg);
        CliError::Config(msg)
    })?;
    let cfg = resolved.config;

    let level = args.level.unwrap_or(cfg.level);
    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let opponent_id = args.opponent.unwrap_or(cfg.opponent);
    let stand_in_id = args.stand_in.unwrap_or(cfg.stand_in);

    let table = TableConfig::for_level(level, cfg.buy_in);
    let big_blind = table.big_blind;
    let ai_config = AiConfig::default();
    let mut session = MatchSession::new(table, preset(&opponent_id)?, ai_config.clone(), Some(seed))?;
    let mut stand_in = StandIn {
        engine: DecisionEngine::new(ai_config, seed.wrapping_add(1)),
        personality: PersonalityState::new(preset(&stand_in_id)?, cfg.buy_in),
        model: OpponentModel::new(),
    };
    let mut logger = match &args.output {
        Some(path) => Some(HandLogger::create(path).map_err(|e| {
            let _ = ui::write_error(err, &format!("Failed to open output file: {}", e));
            CliError::Io(e)
        })?),
        None => None,
    };

    info!(hands = args.hands, seed, level, opponent = %opponent_id, stand_in = %stand_in_id, "simulation started");
    let mut totals = Totals::default();
    let mut stop_reason: Option<String> = None;

    for _ in 0..args.hands {
        match session.start_hand() {
            Ok(_) => {}
            Err(AiError::OpponentLeft(exit)) => {
                let what = match exit {
                    EarlyExit::RageQuit => "rage-quit",
                    EarlyExit::Surrender => "surrendered",
                };
                stop_reason = Some(format!(
                    "Bot {} before hand {} (tilt {:.1})",
                    what,
                    totals.hands + 1,
                    session.personality().tilt_meter()
                ));
                break;
            }
            Err(AiError::Engine(GameError::MatchOver(broke))) => {
                stop_reason = Some(format!("{} is out of chips", seat_name(broke)));
                break;
            }
            Err(e) => return Err(e.into()),
        }
        play_out_hand(&mut session, &mut stand_in)?;

        let Some(result) = session.last_result().cloned() else {
            return Err(CliError::Engine(GameError::InvariantViolation(
                "hand finished without a result".into(),
            )));
        };
        stand_in
            .personality
            .record_hand(&feedback_for(&result, Seat::Player, big_blind));
        stand_in.model.end_hand();
        totals.hands += 1;
        if result.showdown.is_some() {
            totals.showdowns += 1;
        }
        match result.winners.as_slice() {
            [Seat::Opponent] => totals.bot_wins += 1,
            [Seat::Player] => totals.stand_in_wins += 1,
            _ => totals.splits += 1,
        }

        if let Some(logger) = logger.as_mut() {
            let id = logger.next_id();
            if let Some(record) = session.hand_record(id) {
                logger.write(&record)?;
            }
        }
    }

    let engine = session.engine();
    let bot_stack = engine.stack(Seat::Opponent);
    let stand_in_stack = engine.stack(Seat::Player);
    writeln!(out, "Simulated: {} hands", totals.hands)?;
    writeln!(
        out,
        "Seed: {}  Level: {} (blinds {}/{})",
        seed,
        level,
        engine.config().small_blind,
        big_blind
    )?;
    writeln!(
        out,
        "Pots won: bot {} / stand-in {} / split {}  ({} showdowns)",
        totals.bot_wins, totals.stand_in_wins, totals.splits, totals.showdowns
    )?;
    writeln!(
        out,
        "Final stacks: bot ({}) {} [{}], stand-in ({}) {} [{}]",
        opponent_id,
        bot_stack,
        ui::signed(bot_stack as i64 - cfg.buy_in as i64),
        stand_in_id,
        stand_in_stack,
        ui::signed(stand_in_stack as i64 - cfg.buy_in as i64)
    )?;
    writeln!(
        out,
        "Bot tilt: {:.1} ({:?})",
        session.personality().tilt_meter(),
        session.personality().tilt_state()
    )?;
    if let Some(reason) = stop_reason {
        writeln!(out, "Match ended early: {}", reason)?;
    }
    Ok(())
}

fn seat_name(seat: Seat) -> &'static str {
    match seat {
        Seat::Opponent => "Bot",
        Seat::Player => "Stand-in",
    }
}

fn play_out_hand(session: &mut MatchSession, stand_in: &mut StandIn) -> Result<(), CliError> {
    loop {
        match session.engine().phase() {
            HandPhase::Complete => return Ok(()),
            HandPhase::RoundComplete => {
                session.advance_street()?;
            }
            HandPhase::Idle => {
                return Err(CliError::Engine(GameError::NoHandInProgress));
            }
            HandPhase::Betting if session.bot_to_act() => {
                let street = session.engine().street();
                let pot = session.engine().pot();
                let turn = session.play_bot_turn()?;
                debug!(action = ?turn.outcome.action, equity = ?turn.decision.equity, "bot acted");
                stand_in.model.observe(ObservedAction {
                    street,
                    action: turn.outcome.action,
                    amount: turn.outcome.amount,
                    pot,
                    all_in: turn.outcome.became_all_in,
                });
            }
            HandPhase::Betting => {
                let view = session.engine().view(Seat::Player);
                let ctx = DecisionContext {
                    opponent: &stand_in.model,
                    personality: &stand_in.personality,
                };
                let decision = stand_in.engine.decide(&view, &ctx);
                session.apply_player_action(decision.action)?;
            }
        }
    }
}
