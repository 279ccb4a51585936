//! Seven-card hand ranking.
//!
//! [`evaluate_hand`] classifies the best five-card hand into a [`Category`]
//! plus ordered kickers. [`evaluate7`] maps that onto a dense rank in
//! `1..=7462` where a lower number is a stronger hand, so callers only need
//! integer comparison and the fixed category boundaries below.

use std::cmp::Ordering;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

pub const WORST_RANK: u16 = 7462;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    /// Names a dense rank produced by [`evaluate7`].
    pub fn from_rank(rank: u16) -> Category {
        match rank {
            0..=10 => Category::StraightFlush,
            11..=166 => Category::FourOfAKind,
            167..=322 => Category::FullHouse,
            323..=1599 => Category::Flush,
            1600..=1609 => Category::Straight,
            1610..=2467 => Category::ThreeOfAKind,
            2468..=3325 => Category::TwoPair,
            3326..=6185 => Category::OnePair,
            _ => Category::HighCard,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    /// Position in the strongest-first class table, found by binary search.
    pub fn rank(&self) -> u16 {
        class_table()
            .binary_search_by(|class| compare_hands(self, class))
            .map(|i| i as u16 + 1)
            .unwrap_or(WORST_RANK)
    }
}

/// Dense rank of the best five-card hand in `cards`; lower is stronger.
pub fn evaluate7(cards: &[Card; 7]) -> u16 {
    evaluate_hand(cards).rank()
}

pub fn evaluate_hand(cards: &[Card; 7]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for &c in cards.iter() {
        let r = rank_val(c.rank);
        rank_counts[r as usize] += 1;
        let s = c.suit.index();
        suit_counts[s] += 1;
        by_suit[s].push(r);
    }

    let flush_suit = suit_counts.iter().position(|&count| count >= 5);

    if let Some(s) = flush_suit {
        by_suit[s].sort_unstable();
        by_suit[s].dedup();
        if let Some(high) = detect_straight_high(&by_suit[s]) {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    if let Some(s) = flush_suit {
        let mut ranks = by_suit[s].clone();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks[..5]);
        return HandStrength {
            category: Category::Flush,
            kickers: k,
        };
    }

    let uniq: Vec<u8> = (2..=14u8).filter(|&r| rank_counts[r as usize] > 0).collect();
    if let Some(high) = detect_straight_high(&uniq) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    let (trip_ranks, pair_ranks, singles) = classify_multiples(&rank_counts);
    if let Some(t) = trip_ranks.first().copied() {
        let mut k = [t, 0, 0, 0, 0];
        k[1] = singles.first().copied().unwrap_or(0);
        k[2] = singles.get(1).copied().unwrap_or(0);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pair_ranks.len() >= 2 {
        // a third pair can outkick every single card
        let kicker = pair_ranks
            .get(2)
            .copied()
            .into_iter()
            .chain(singles.first().copied())
            .max()
            .unwrap_or(0);
        return HandStrength {
            category: Category::TwoPair,
            kickers: [pair_ranks[0], pair_ranks[1], kicker, 0, 0],
        };
    }
    if let Some(p) = pair_ranks.first().copied() {
        let mut k = [p, 0, 0, 0, 0];
        for i in 0..3 {
            k[i + 1] = singles.get(i).copied().unwrap_or(0);
        }
        return HandStrength {
            category: Category::OnePair,
            kickers: k,
        };
    }

    let mut k = [0u8; 5];
    for (i, item) in k.iter_mut().enumerate() {
        *item = singles.get(i).copied().unwrap_or(0);
    }
    HandStrength {
        category: Category::HighCard,
        kickers: k,
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn rank_val(r: Rank) -> u8 {
    r as u8
}

fn detect_straight_high(sorted_unique_ranks: &[u8]) -> Option<u8> {
    let mut mask: u16 = 0;
    for &r in sorted_unique_ranks {
        mask |= 1 << r;
    }
    straight_high_from_mask(mask)
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    for high in (5..=14u16).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high as u8);
        }
    }
    None
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    let top = *trips.first()?;
    if let Some(&second) = trips.get(1) {
        return Some((top, second.max(pairs.first().copied().unwrap_or(0))));
    }
    pairs.first().map(|&p| (top, p))
}

/// Trips, pairs and singles, each ordered high to low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}

fn is_straight_set(ranks: &[u8; 5]) -> bool {
    let mut mask: u16 = 0;
    for &r in ranks {
        mask |= 1 << r;
    }
    straight_high_from_mask(mask).is_some()
}

/// Five distinct ranks that do not form a straight, strongest first.
fn distinct_non_straight_sets() -> Vec<[u8; 5]> {
    let mut out = Vec::with_capacity(1277);
    for a in (2..=14u8).rev() {
        for b in (2..a).rev() {
            for c in (2..b).rev() {
                for d in (2..c).rev() {
                    for e in (2..d).rev() {
                        let set = [a, b, c, d, e];
                        if !is_straight_set(&set) {
                            out.push(set);
                        }
                    }
                }
            }
        }
    }
    out
}

/// Every distinct five-card hand class, enumerated strongest first.
fn enumerate_classes() -> Vec<HandStrength> {
    let mut out = Vec::with_capacity(WORST_RANK as usize);
    let hs = |category, kickers| HandStrength { category, kickers };
    let plain = distinct_non_straight_sets();

    for high in (5..=14u8).rev() {
        out.push(hs(Category::StraightFlush, [high, 0, 0, 0, 0]));
    }
    for q in (2..=14u8).rev() {
        for k in (2..=14u8).rev().filter(|&k| k != q) {
            out.push(hs(Category::FourOfAKind, [q, k, 0, 0, 0]));
        }
    }
    for t in (2..=14u8).rev() {
        for p in (2..=14u8).rev().filter(|&p| p != t) {
            out.push(hs(Category::FullHouse, [t, p, 0, 0, 0]));
        }
    }
    for set in &plain {
        out.push(hs(Category::Flush, *set));
    }
    for high in (5..=14u8).rev() {
        out.push(hs(Category::Straight, [high, 0, 0, 0, 0]));
    }
    for t in (2..=14u8).rev() {
        for k1 in (2..=14u8).rev().filter(|&k| k != t) {
            for k2 in (2..k1).rev().filter(|&k| k != t) {
                out.push(hs(Category::ThreeOfAKind, [t, k1, k2, 0, 0]));
            }
        }
    }
    for h in (2..=14u8).rev() {
        for l in (2..h).rev() {
            for k in (2..=14u8).rev().filter(|&k| k != h && k != l) {
                out.push(hs(Category::TwoPair, [h, l, k, 0, 0]));
            }
        }
    }
    for p in (2..=14u8).rev() {
        for k1 in (2..=14u8).rev().filter(|&k| k != p) {
            for k2 in (2..k1).rev().filter(|&k| k != p) {
                for k3 in (2..k2).rev().filter(|&k| k != p) {
                    out.push(hs(Category::OnePair, [p, k1, k2, k3, 0]));
                }
            }
        }
    }
    for set in &plain {
        out.push(hs(Category::HighCard, *set));
    }
    out
}

fn class_table() -> &'static [HandStrength] {
    static TABLE: OnceLock<Vec<HandStrength>> = OnceLock::new();
    TABLE.get_or_init(enumerate_classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_enumeration_matches_category_boundaries() {
        let classes = enumerate_classes();
        assert_eq!(classes.len(), WORST_RANK as usize);
        for (i, class) in classes.iter().enumerate() {
            assert_eq!(
                Category::from_rank(i as u16 + 1),
                class.category,
                "rank {} misnamed",
                i + 1
            );
        }
    }

    #[test]
    fn rank_matches_table_position() {
        for (i, class) in enumerate_classes().iter().enumerate().step_by(37) {
            assert_eq!(class.rank(), i as u16 + 1);
        }
        let worst = HandStrength {
            category: Category::HighCard,
            kickers: [7, 5, 4, 3, 2],
        };
        assert_eq!(worst.rank(), WORST_RANK);
        let royal = HandStrength {
            category: Category::StraightFlush,
            kickers: [14, 0, 0, 0, 0],
        };
        assert_eq!(royal.rank(), 1);
    }

    #[test]
    fn enumeration_is_strictly_descending() {
        let classes = enumerate_classes();
        for w in classes.windows(2) {
            assert!(compare_hands(&w[0], &w[1]).is_gt(), "{:?} !> {:?}", w[0], w[1]);
        }
    }
}
