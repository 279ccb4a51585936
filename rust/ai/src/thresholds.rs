//! Static lookup tables: continue thresholds, all-in thresholds and the
//! short-stack push/fold chart. Built once on first use.

use std::collections::HashMap;
use std::sync::OnceLock;

use tilt_engine::logger::Street;

use crate::notation::HandClass;

/// Stack-to-pot ratio band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SprBucket {
    Low,
    Medium,
    High,
}

impl SprBucket {
    pub fn from_spr(spr: f64) -> Self {
        if spr < 3.0 {
            SprBucket::Low
        } else if spr < 8.0 {
            SprBucket::Medium
        } else {
            SprBucket::High
        }
    }
}

type ThresholdKey = (Street, bool, SprBucket);

// (street, facing bet, [low, medium, high] spr)
const BASE_ROWS: [(Street, bool, [f64; 3]); 8] = [
    (Street::Preflop, true, [0.42, 0.46, 0.50]),
    (Street::Preflop, false, [0.48, 0.52, 0.55]),
    (Street::Flop, true, [0.40, 0.45, 0.50]),
    (Street::Flop, false, [0.55, 0.58, 0.62]),
    (Street::Turn, true, [0.42, 0.48, 0.54]),
    (Street::Turn, false, [0.57, 0.60, 0.64]),
    (Street::River, true, [0.45, 0.52, 0.58]),
    (Street::River, false, [0.60, 0.63, 0.66]),
];

const ALL_IN_ROWS: [(Street, f64); 4] = [
    (Street::Preflop, 0.50),
    (Street::Flop, 0.48),
    (Street::Turn, 0.47),
    (Street::River, 0.50),
];

// Largest effective stack, in big blinds, at which the hand calls a shove.
const PUSH_FOLD_ROWS: &[(&str, f64)] = &[
    ("AA", 99.0),
    ("KK", 99.0),
    ("QQ", 99.0),
    ("JJ", 99.0),
    ("TT", 99.0),
    ("99", 14.0),
    ("88", 12.0),
    ("77", 11.0),
    ("66", 9.0),
    ("55", 8.0),
    ("44", 7.0),
    ("33", 6.0),
    ("22", 5.0),
    ("AKs", 99.0),
    ("AKo", 99.0),
    ("AQs", 99.0),
    ("AQo", 14.0),
    ("AJs", 14.0),
    ("AJo", 11.0),
    ("ATs", 12.0),
    ("ATo", 9.0),
    ("A9s", 10.0),
    ("A9o", 7.0),
    ("A8s", 9.0),
    ("A7s", 8.0),
    ("A5s", 8.0),
    ("A4s", 7.0),
    ("KQs", 10.0),
    ("KQo", 8.0),
    ("KJs", 8.0),
    ("QJs", 6.0),
    ("T9s", 4.0),
    ("72o", 0.0),
    ("32o", 0.0),
    ("82o", 0.0),
    ("92o", 0.0),
];

fn base_table() -> &'static HashMap<ThresholdKey, f64> {
    static TABLE: OnceLock<HashMap<ThresholdKey, f64>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let buckets = [SprBucket::Low, SprBucket::Medium, SprBucket::High];
        BASE_ROWS
            .iter()
            .flat_map(|(street, facing, values)| {
                buckets
                    .iter()
                    .zip(values.iter())
                    .map(move |(b, v)| ((*street, *facing, *b), *v))
            })
            .collect()
    })
}

fn push_fold_table() -> &'static HashMap<HandClass, f64> {
    static TABLE: OnceLock<HashMap<HandClass, f64>> = OnceLock::new();
    TABLE.get_or_init(|| {
        PUSH_FOLD_ROWS
            .iter()
            .filter_map(|(notation, max_bb)| {
                HandClass::parse(notation).ok().map(|c| (c, *max_bb))
            })
            .collect()
    })
}

/// Equity needed to continue (facing a bet) or to bet (checked to).
///
/// ```
/// use tilt_ai::thresholds::base_threshold;
/// use tilt_engine::logger::Street;
///
/// assert_eq!(base_threshold(Street::River, true, 10.0), 0.58);
/// ```
pub fn base_threshold(street: Street, facing_bet: bool, spr: f64) -> f64 {
    base_table()
        .get(&(street, facing_bet, SprBucket::from_spr(spr)))
        .copied()
        .unwrap_or(0.5)
}

/// Equity needed to call (or make) an all-in. Very low SPR pots are
/// already committed and call wider.
pub fn all_in_threshold(street: Street, spr: f64) -> f64 {
    let base = ALL_IN_ROWS
        .iter()
        .find(|(s, _)| *s == street)
        .map(|(_, t)| *t)
        .unwrap_or(0.5);
    let adjust = if spr < 1.0 {
        -0.05
    } else if spr < 2.5 {
        -0.02
    } else {
        0.03
    };
    base + adjust
}

/// Max effective stack in big blinds at which `class` calls a shove, or
/// `None` when the chart has no entry for it.
pub fn push_fold_max_bb(class: &HandClass) -> Option<f64> {
    push_fold_table().get(class).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cell_is_populated() {
        for street in Street::ALL {
            for facing in [true, false] {
                for spr in [1.0, 5.0, 20.0] {
                    let t = base_threshold(street, facing, spr);
                    assert!((0.3..0.7).contains(&t), "{:?} {} {}", street, facing, spr);
                }
            }
        }
    }

    #[test]
    fn deeper_stacks_need_more_equity() {
        for street in Street::ALL {
            assert!(base_threshold(street, true, 1.0) < base_threshold(street, true, 20.0));
        }
        assert!(all_in_threshold(Street::Flop, 0.5) < all_in_threshold(Street::Flop, 4.0));
    }

    #[test]
    fn chart_entries_parse() {
        assert_eq!(push_fold_table().len(), PUSH_FOLD_ROWS.len());
        assert_eq!(push_fold_max_bb(&HandClass::parse("22").unwrap()), Some(5.0));
        assert_eq!(push_fold_max_bb(&HandClass::parse("J4o").unwrap()), None);
    }
}
