use tilt_ai::personality::{preset, EarlyExit, HandFeedback, PersonalityState, TiltState, MAX_TILT};
use tilt_ai::session::feedback_for;
use tilt_engine::engine::{HandResult, ShowdownResult};
use tilt_engine::player::Seat;

fn loss(pot_bb: f64, bad_beat: bool) -> HandFeedback {
    HandFeedback {
        won: false,
        lost: true,
        pot_bb,
        bad_beat,
    }
}

fn win(pot_bb: f64) -> HandFeedback {
    HandFeedback {
        won: true,
        lost: false,
        pot_bb,
        bad_beat: false,
    }
}

#[test]
fn bigger_pots_hurt_more() {
    let mut small = PersonalityState::new(preset("pro").unwrap(), 1_000);
    let mut big = small.clone();
    small.record_hand(&loss(2.0, false));
    big.record_hand(&loss(40.0, false));
    assert!(big.tilt_meter() > small.tilt_meter());
}

#[test]
fn bad_beats_hurt_most() {
    let mut plain = PersonalityState::new(preset("pro").unwrap(), 1_000);
    let mut beat = plain.clone();
    plain.record_hand(&loss(20.0, false));
    beat.record_hand(&loss(20.0, true));
    assert!(beat.tilt_meter() > plain.tilt_meter());
}

#[test]
fn sensitivity_scales_every_increase() {
    let mut calm = PersonalityState::new(preset("gto").unwrap(), 1_000);
    let mut hot = PersonalityState::new(preset("hothead").unwrap(), 1_000);
    calm.add_tilt(10.0);
    hot.add_tilt(10.0);
    assert!((calm.tilt_meter() - 10.0 * calm.base().tilt_sensitivity).abs() < 1e-9);
    assert!((hot.tilt_meter() - 10.0 * hot.base().tilt_sensitivity).abs() < 1e-9);
}

#[test]
fn meter_is_clamped() {
    let mut s = PersonalityState::new(preset("hothead").unwrap(), 1_000);
    s.add_tilt(1_000.0);
    assert_eq!(s.tilt_meter(), MAX_TILT);
    s.reduce_tilt(1_000.0);
    assert_eq!(s.tilt_meter(), 0.0);
    s.add_tilt(-5.0);
    assert_eq!(s.tilt_meter(), 0.0);
}

#[test]
fn losing_streak_walks_up_the_states() {
    let mut s = PersonalityState::new(preset("hothead").unwrap(), 1_000);
    let mut seen = vec![s.tilt_state()];
    let mut last = s.tilt_meter();
    for _ in 0..8 {
        s.record_hand(&loss(3.0, false));
        assert!(s.tilt_meter() >= last);
        last = s.tilt_meter();
        seen.push(s.tilt_state());
    }
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(s.tilt_state(), TiltState::Monkey);
    assert_eq!(s.early_exit(1_000), Some(EarlyExit::RageQuit));
}

#[test]
fn tilted_traits_move_the_right_way() {
    let mut s = PersonalityState::new(preset("pro").unwrap(), 1_000);
    let zen = s.current();
    s.add_tilt(40.0);
    let steaming = s.current();
    assert!(steaming.aggression >= zen.aggression);
    assert!(steaming.bluff_frequency >= zen.bluff_frequency);
    assert!(steaming.fold_threshold < zen.fold_threshold);
    assert!(steaming.mistake_factor > zen.mistake_factor);
    assert!(steaming.aggression <= 1.0);
}

#[test]
fn wins_relieve_by_composure() {
    let mut steady = PersonalityState::new(preset("gto").unwrap(), 1_000);
    let mut volatile = PersonalityState::new(preset("hothead").unwrap(), 1_000);
    steady.add_tilt(40.0 / steady.base().tilt_sensitivity);
    volatile.add_tilt(40.0 / volatile.base().tilt_sensitivity);
    steady.record_hand(&win(10.0));
    volatile.record_hand(&win(10.0));
    assert!(steady.tilt_meter() < volatile.tilt_meter());
}

#[test]
fn new_match_resets_tilt() {
    let mut s = PersonalityState::new(preset("hothead").unwrap(), 1_000);
    s.record_hand(&loss(30.0, true));
    assert!(s.tilt_meter() > 0.0);
    s.reset_for_match(2_000);
    assert_eq!(s.tilt_meter(), 0.0);
    assert_eq!(s.consecutive_losses(), 0);
}

#[test]
fn showdown_loss_with_two_pair_is_a_bad_beat() {
    // rank 3000 is two pair, 1000 a flush
    let result = HandResult {
        winners: vec![Seat::Player],
        pot: 400,
        net: [200, -200],
        showdown: Some(ShowdownResult {
            player_rank: 1_000,
            opponent_rank: 3_000,
            winners: vec![Seat::Player],
        }),
        folded: None,
    };
    let fb = feedback_for(&result, Seat::Opponent, 10);
    assert!(fb.lost && !fb.won);
    assert!(fb.bad_beat);
    assert_eq!(fb.pot_bb, 40.0);

    let weak = HandResult {
        showdown: Some(ShowdownResult {
            player_rank: 1_000,
            opponent_rank: 5_000,
            winners: vec![Seat::Player],
        }),
        ..result.clone()
    };
    assert!(!feedback_for(&weak, Seat::Opponent, 10).bad_beat);

    let split = HandResult {
        winners: vec![Seat::Player, Seat::Opponent],
        net: [0, 0],
        ..result
    };
    let fb = feedback_for(&split, Seat::Opponent, 10);
    assert!(!fb.won && !fb.lost);
}
