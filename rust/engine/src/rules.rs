//! Stateless no-limit betting rules.
//!
//! Chip amounts are street totals ("raise to"), never increments, unless a
//! parameter name says otherwise.

use serde::{Deserialize, Serialize};

use crate::player::PlayerAction as A;

/// Minimum legal street total for a bet or raise.
///
/// Opening a street (`current_bet == 0`) costs exactly one big blind.
/// Otherwise the raise must add at least the largest of the last raise
/// increment, the size of the last bet step, and the big blind.
///
/// ```
/// use tilt_engine::rules::min_raise_total;
///
/// assert_eq!(min_raise_total(0, 0, 0, 10), 10);
/// assert_eq!(min_raise_total(100, 50, 50, 10), 150);
/// ```
pub fn min_raise_total(
    current_bet: u32,
    previous_bet: u32,
    last_raise_increment: u32,
    big_blind: u32,
) -> u32 {
    if current_bet == 0 {
        return big_blind;
    }
    let step = current_bet.saturating_sub(previous_bet);
    current_bet + last_raise_increment.max(step).max(big_blind)
}

/// A full raise reopens betting for the other seat; a short all-in does not.
pub fn is_full_raise(raise_increment: u32, min_raise_increment: u32) -> bool {
    raise_increment >= min_raise_increment
}

/// How an uncalled excess is returned: unsettled street chips first, then
/// the settled pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Refund {
    pub amount: u32,
    pub from_street: u32,
    pub from_pot: u32,
}

pub fn calculate_refund(excess_amount: i64, unsettled_street_bet: u32) -> Refund {
    let amount = excess_amount.clamp(0, u32::MAX as i64) as u32;
    let from_street = amount.min(unsettled_street_bet);
    Refund {
        amount,
        from_street,
        from_pot: amount - from_street,
    }
}

/// What a seat is allowed to do at the moment it acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalContext {
    /// Chips behind
    pub stack: u32,
    /// Chips already committed this street
    pub street_bet: u32,
    /// Highest street total so far
    pub current_bet: u32,
    /// Minimum legal raise-to total
    pub min_raise_total: u32,
    /// False when betting was not reopened for this seat or the other seat is all-in
    pub may_raise: bool,
}

impl LegalContext {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.street_bet)
    }

    pub fn max_total(&self) -> u32 {
        self.street_bet + self.stack
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips moved by the call (may be the whole stack)
    Call(u32),
    /// Street total after the raise
    Raise(u32),
    /// Street total after committing the whole stack
    AllIn(u32),
}

/// Maps a requested action onto the nearest legal one.
///
/// Returns the legal action and, when it differs from the request, the
/// original request so the caller can report the coercion.
///
/// ```
/// use tilt_engine::player::PlayerAction;
/// use tilt_engine::rules::{legalize, LegalContext, ValidatedAction};
///
/// let ctx = LegalContext {
///     stack: 990,
///     street_bet: 10,
///     current_bet: 30,
///     min_raise_total: 50,
///     may_raise: true,
/// };
/// let (action, coerced) = legalize(&ctx, PlayerAction::Check);
/// assert_eq!(action, ValidatedAction::Fold);
/// assert_eq!(coerced, Some(PlayerAction::Check));
/// ```
pub fn legalize(ctx: &LegalContext, action: A) -> (ValidatedAction, Option<A>) {
    let to_call = ctx.to_call();
    let passive = || {
        if to_call == 0 {
            ValidatedAction::Check
        } else {
            ValidatedAction::Call(to_call.min(ctx.stack))
        }
    };

    let validated = match action {
        A::Fold => ValidatedAction::Fold,
        A::Check if to_call == 0 => ValidatedAction::Check,
        A::Check => ValidatedAction::Fold,
        A::Call => passive(),
        A::Raise(_) | A::AllIn if !ctx.may_raise || ctx.max_total() <= ctx.current_bet => {
            passive()
        }
        A::AllIn => ValidatedAction::AllIn(ctx.max_total()),
        A::Raise(to) => {
            let max_total = ctx.max_total();
            if to <= ctx.current_bet {
                passive()
            } else {
                let target = to.max(ctx.min_raise_total);
                if target >= max_total {
                    ValidatedAction::AllIn(max_total)
                } else {
                    ValidatedAction::Raise(target)
                }
            }
        }
    };

    let honoured = match (&action, &validated) {
        (A::Fold, ValidatedAction::Fold)
        | (A::Check, ValidatedAction::Check)
        | (A::Call, ValidatedAction::Call(_))
        | (A::AllIn, ValidatedAction::AllIn(_)) => true,
        (A::Raise(to), ValidatedAction::Raise(t)) => to == t,
        // a raise sized at or beyond the stack is a shove
        (A::Raise(to), ValidatedAction::AllIn(t)) => to >= t,
        // shoving for no more than the current bet is an all-in call
        (A::AllIn, ValidatedAction::Call(moved)) => *moved == ctx.stack,
        _ => false,
    };
    (validated, if honoured { None } else { Some(action) })
}
