use tilt_ai::config::AiConfig;
use tilt_ai::decision::{Decision, DecisionContext, DecisionPath};
use tilt_ai::errors::AiError;
use tilt_ai::personality::{preset, EarlyExit, Personality};
use tilt_ai::session::MatchSession;
use tilt_ai::AIOpponent;
use tilt_engine::engine::{HandPhase, SeatView};
use tilt_engine::game::TableConfig;
use tilt_engine::player::{PlayerAction, Seat};

fn quick_config() -> AiConfig {
    AiConfig {
        trials_preflop: 100,
        trials_flop: 100,
        trials_turn: 100,
        trials_river: 100,
        ..AiConfig::default()
    }
}

struct FoldBot;

impl AIOpponent for FoldBot {
    fn decide(&mut self, _view: &SeatView, _ctx: &DecisionContext<'_>) -> Decision {
        Decision {
            action: PlayerAction::Fold,
            think_delay_ms: 0,
            path: DecisionPath::Mixed,
            equity: None,
            threshold: None,
            range: None,
            mistake: None,
            bluff: false,
            slow_play: false,
        }
    }

    fn name(&self) -> &str {
        "FoldBot"
    }
}

/// Plays one hand with the human seat always calling.
fn play_hand(session: &mut MatchSession) -> Result<(), AiError> {
    session.start_hand()?;
    while session.engine().phase() != HandPhase::Complete {
        if session.bot_to_act() {
            session.play_bot_turn()?;
        } else {
            session.apply_player_action(PlayerAction::Call)?;
        }
    }
    Ok(())
}

#[test]
fn threshold_bot_plays_a_match_without_losing_chips() {
    let mut session =
        MatchSession::new(TableConfig::default(), preset("pro").unwrap(), quick_config(), Some(31))
            .unwrap();
    assert_eq!(session.bot_name(), "ThresholdAI");
    let mut completed = 0;
    for _ in 0..25 {
        match play_hand(&mut session) {
            Ok(()) => completed += 1,
            Err(AiError::OpponentLeft(_)) | Err(AiError::Engine(_)) => break,
            Err(other) => panic!("unexpected error {:?}", other),
        }
        let total = session.engine().stack(Seat::Player) + session.engine().stack(Seat::Opponent);
        assert_eq!(total, 2_000);
        assert!(session.hand_record(format!("h{}", completed)).is_some());
    }
    assert!(completed > 0);
    assert_eq!(session.opponent_model().hands_observed(), completed);
}

#[test]
fn human_actions_feed_the_opponent_model() {
    let mut session =
        MatchSession::new(TableConfig::default(), preset("gto").unwrap(), quick_config(), Some(8))
            .unwrap();
    session.start_hand().unwrap();
    // hand 1: the human seat has the button and acts first
    assert!(!session.bot_to_act());
    assert!(matches!(session.play_bot_turn(), Err(AiError::NotBotsTurn)));
    session.apply_player_action(PlayerAction::Raise(30)).unwrap();
    let seen = session.opponent_model().history().back().copied().unwrap();
    assert_eq!(seen.action, PlayerAction::Raise(30));
    assert_eq!(seen.amount, 25);
    assert_eq!(seen.pot, 15);
}

#[test]
fn a_folding_bot_tilts_until_it_rage_quits() {
    let mut session = MatchSession::with_bot(
        TableConfig::default(),
        preset("hothead").unwrap(),
        quick_config(),
        Some(5),
        Box::new(FoldBot),
    )
    .unwrap();
    let mut previous = 0.0;
    let mut exit = None;
    for _ in 0..20 {
        match play_hand(&mut session) {
            Ok(()) => {
                let tilt = session.personality().tilt_meter();
                assert!(tilt > previous);
                previous = tilt;
            }
            Err(AiError::OpponentLeft(reason)) => {
                exit = Some(reason);
                break;
            }
            Err(other) => panic!("unexpected error {:?}", other),
        }
    }
    assert_eq!(exit, Some(EarlyExit::RageQuit));
    assert_eq!(session.early_exit(), Some(EarlyExit::RageQuit));
    assert!(session.is_over());
    assert!(matches!(session.start_hand(), Err(AiError::OpponentLeft(EarlyExit::RageQuit))));
}

#[test]
fn calm_short_stack_surrenders() {
    let quitter = Personality {
        surrender_chip_percent: 1.0,
        ..preset("nit").unwrap()
    };
    let mut session =
        MatchSession::new(TableConfig::default(), quitter, quick_config(), Some(2)).unwrap();
    assert!(matches!(session.start_hand(), Err(AiError::OpponentLeft(EarlyExit::Surrender))));
    assert_eq!(session.engine().hand_no(), 0);
}

#[test]
fn invalid_ai_config_is_rejected() {
    let config = AiConfig {
        think_min_ms: 5_000,
        think_max_ms: 10,
        ..AiConfig::default()
    };
    let err = MatchSession::new(TableConfig::default(), preset("gto").unwrap(), config, None).unwrap_err();
    assert!(matches!(err, AiError::InvalidConfig(_)));
}
