use tilt_engine::betting::{is_round_complete, RoundStatus};
use tilt_engine::player::PlayerAction;
use tilt_engine::rules::{
    calculate_refund, is_full_raise, legalize, min_raise_total, LegalContext, ValidatedAction,
};

fn ctx(stack: u32, street_bet: u32, current_bet: u32, min_total: u32) -> LegalContext {
    LegalContext {
        stack,
        street_bet,
        current_bet,
        min_raise_total: min_total,
        may_raise: true,
    }
}

#[test]
fn min_raise_cases() {
    // opening bet is one big blind
    assert_eq!(min_raise_total(0, 0, 0, 20), 20);
    // preflop after blinds 5/10: raise to at least 20
    assert_eq!(min_raise_total(10, 5, 5, 10), 20);
    // after a raise 10 -> 30 the next raise must add 20
    assert_eq!(min_raise_total(30, 10, 20, 10), 50);
    // a short raise never shrinks the increment below the big blind
    assert_eq!(min_raise_total(45, 40, 5, 10), 55);
}

#[test]
fn full_raise_is_monotonic_in_increment() {
    let min_inc = 20;
    let mut seen_full = false;
    for inc in 0..100 {
        let full = is_full_raise(inc, min_inc);
        if seen_full {
            assert!(full, "increment {} lost full-raise status", inc);
        }
        seen_full |= full;
        assert_eq!(full, inc >= min_inc);
    }
}

#[test]
fn refund_splits_street_then_pot() {
    for (excess, street, want_street, want_pot) in
        [(35i64, 50u32, 35u32, 0u32), (25, 5, 5, 20), (0, 40, 0, 0), (-10, 40, 0, 0)]
    {
        let r = calculate_refund(excess, street);
        assert_eq!(r.from_street, want_street);
        assert_eq!(r.from_pot, want_pot);
        assert_eq!(r.amount, r.from_street + r.from_pot);
        assert!(r.from_street <= street);
    }
}

#[test]
fn check_facing_bet_becomes_fold() {
    let (a, from) = legalize(&ctx(990, 10, 30, 50), PlayerAction::Check);
    assert_eq!(a, ValidatedAction::Fold);
    assert_eq!(from, Some(PlayerAction::Check));
}

#[test]
fn call_with_nothing_owed_becomes_check() {
    let (a, from) = legalize(&ctx(990, 10, 10, 20), PlayerAction::Call);
    assert_eq!(a, ValidatedAction::Check);
    assert_eq!(from, Some(PlayerAction::Call));
}

#[test]
fn short_raise_lifts_to_minimum() {
    let (a, from) = legalize(&ctx(990, 5, 10, 20), PlayerAction::Raise(12));
    assert_eq!(a, ValidatedAction::Raise(20));
    assert_eq!(from, Some(PlayerAction::Raise(12)));
}

#[test]
fn raise_beyond_stack_is_all_in() {
    let (a, from) = legalize(&ctx(100, 10, 20, 30), PlayerAction::Raise(500));
    assert_eq!(a, ValidatedAction::AllIn(110));
    assert_eq!(from, None);
}

#[test]
fn raise_when_closed_becomes_call() {
    let closed = LegalContext {
        may_raise: false,
        ..ctx(500, 30, 45, 60)
    };
    let (a, from) = legalize(&closed, PlayerAction::Raise(100));
    assert_eq!(a, ValidatedAction::Call(15));
    assert_eq!(from, Some(PlayerAction::Raise(100)));
}

#[test]
fn short_stack_call_moves_whole_stack() {
    let (a, from) = legalize(&ctx(15, 0, 50, 100), PlayerAction::Call);
    assert_eq!(a, ValidatedAction::Call(15));
    assert_eq!(from, None);
    let (b, from) = legalize(&ctx(15, 0, 50, 100), PlayerAction::AllIn);
    assert_eq!(b, ValidatedAction::Call(15));
    assert_eq!(from, None);
}

#[test]
fn round_completion_table() {
    let base = RoundStatus {
        has_acted: [true, true],
        can_reopen: [false, false],
        bets_equal: true,
        all_in: [false, false],
    };
    assert!(is_round_complete(&base));
    assert!(!is_round_complete(&RoundStatus {
        can_reopen: [false, true],
        ..base
    }));
    assert!(is_round_complete(&RoundStatus {
        has_acted: [false, false],
        all_in: [true, false],
        ..base
    }));
    assert!(!is_round_complete(&RoundStatus {
        bets_equal: false,
        all_in: [true, false],
        ..base
    }));
}
