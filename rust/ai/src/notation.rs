//! Starting-hand classes and ranges in the usual shorthand.
//!
//! A [`HandClass`] is one of the 169 preflop classes (`"AA"`, `"AKs"`,
//! `"Q9o"`); a [`HandRange`] is a set of them. Ranges parse from comma
//! lists with `+` shorthand (`"77+"`, `"ATs+"`) or are cut from the top
//! of the Chen-score ordering with [`HandRange::top_percent`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tilt_engine::cards::{Card, Rank, all_ranks, all_suits};

use crate::errors::AiError;

/// Number of distinct two-card starting hands.
pub const TOTAL_COMBOS: u32 = 1326;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suitedness {
    Pair,
    Suited,
    Offsuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandClass {
    high: Rank,
    low: Rank,
    kind: Suitedness,
}

impl HandClass {
    /// Builds a class; ranks are reordered high first. Pairs are always `Pair`.
    pub fn new(a: Rank, b: Rank, suited: bool) -> Self {
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        let kind = if high == low {
            Suitedness::Pair
        } else if suited {
            Suitedness::Suited
        } else {
            Suitedness::Offsuit
        };
        Self { high, low, kind }
    }

    pub fn from_cards(a: Card, b: Card) -> Self {
        Self::new(a.rank, b.rank, a.suit == b.suit)
    }

    pub fn high(&self) -> Rank {
        self.high
    }
    pub fn low(&self) -> Rank {
        self.low
    }
    pub fn kind(&self) -> Suitedness {
        self.kind
    }
    pub fn is_pair(&self) -> bool {
        self.kind == Suitedness::Pair
    }

    /// Concrete two-card combinations of this class.
    pub fn combo_count(&self) -> u32 {
        match self.kind {
            Suitedness::Pair => 6,
            Suitedness::Suited => 4,
            Suitedness::Offsuit => 12,
        }
    }

    pub fn matches(&self, a: Card, b: Card) -> bool {
        Self::from_cards(a, b) == *self
    }

    /// Every concrete combo of the class.
    pub fn combos(&self) -> Vec<[Card; 2]> {
        let suits = all_suits();
        let mut out = Vec::with_capacity(self.combo_count() as usize);
        for (i, &s1) in suits.iter().enumerate() {
            for (j, &s2) in suits.iter().enumerate() {
                let keep = match self.kind {
                    Suitedness::Pair => j > i,
                    Suitedness::Suited => i == j,
                    Suitedness::Offsuit => i != j,
                };
                if keep {
                    out.push([Card::new(self.high, s1), Card::new(self.low, s2)]);
                }
            }
        }
        out
    }

    /// Bill Chen's preflop score. Higher is stronger; AA scores 20.
    pub fn chen_score(&self) -> f64 {
        let points = |r: Rank| match r {
            Rank::Ace => 10.0,
            Rank::King => 8.0,
            Rank::Queen => 7.0,
            Rank::Jack => 6.0,
            other => other.value() as f64 / 2.0,
        };
        let mut score = points(self.high);
        if self.is_pair() {
            return (score * 2.0).max(5.0);
        }
        if self.kind == Suitedness::Suited {
            score += 2.0;
        }
        let gap = self.high.value() - self.low.value() - 1;
        score -= match gap {
            0 => 0.0,
            1 => 1.0,
            2 => 2.0,
            3 => 4.0,
            _ => 5.0,
        };
        if gap <= 1 && self.high < Rank::Queen {
            score += 1.0;
        }
        score
    }

    /// All 169 classes, strongest first by Chen score.
    pub fn ranked() -> &'static [HandClass] {
        static RANKED: OnceLock<Vec<HandClass>> = OnceLock::new();
        RANKED.get_or_init(|| {
            let mut all = Vec::with_capacity(169);
            let ranks = all_ranks();
            for (i, &a) in ranks.iter().enumerate() {
                all.push(HandClass::new(a, a, false));
                for &b in &ranks[..i] {
                    all.push(HandClass::new(a, b, true));
                    all.push(HandClass::new(a, b, false));
                }
            }
            all.sort_by(|x, y| {
                y.chen_score()
                    .total_cmp(&x.chen_score())
                    .then(y.high.cmp(&x.high))
                    .then(y.low.cmp(&x.low))
                    .then(x.kind.cmp(&y.kind))
            });
            all
        })
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.kind {
            Suitedness::Pair => "",
            Suitedness::Suited => "s",
            Suitedness::Offsuit => "o",
        };
        write!(f, "{}{}{}", self.high.to_char(), self.low.to_char(), suffix)
    }
}

impl FromStr for HandClass {
    type Err = AiError;

    /// Parses `"AA"`, `"AKs"` or `"AKo"`. A bare non-pair such as `"AK"`
    /// is ambiguous here; use [`HandRange::parse`] for that.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || AiError::InvalidNotation(s.to_string());
        let chars: Vec<char> = s.trim().chars().collect();
        let (a, b) = match chars.as_slice() {
            [a, b, ..] => (
                Rank::from_char(*a).ok_or_else(bad)?,
                Rank::from_char(*b).ok_or_else(bad)?,
            ),
            _ => return Err(bad()),
        };
        match (chars.get(2).copied(), a == b) {
            (None, true) => Ok(HandClass::new(a, b, false)),
            (Some('s' | 'S'), false) if chars.len() == 3 => Ok(HandClass::new(a, b, true)),
            (Some('o' | 'O'), false) if chars.len() == 3 => Ok(HandClass::new(a, b, false)),
            _ => Err(bad()),
        }
    }
}

impl HandClass {
    pub fn parse(s: &str) -> Result<Self, AiError> {
        s.parse()
    }
}

/// A set of starting-hand classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandRange {
    classes: Vec<HandClass>,
}

impl HandRange {
    pub fn new(classes: Vec<HandClass>) -> Self {
        let mut r = Self::default();
        for c in classes {
            r.insert(c);
        }
        r
    }

    fn insert(&mut self, class: HandClass) {
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    /// Parses a comma separated range such as `"TT+, AQs+, KQo, AK"`.
    ///
    /// ```
    /// use tilt_ai::notation::HandRange;
    ///
    /// let r = HandRange::parse("QQ+,AKs").unwrap();
    /// assert_eq!(r.combo_count(), 6 * 3 + 4);
    /// ```
    pub fn parse(s: &str) -> Result<Self, AiError> {
        let mut range = Self::default();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (body, plus) = match token.strip_suffix('+') {
                Some(b) => (b, true),
                None => (token, false),
            };
            let kinds: Vec<HandClass> = match HandClass::parse(body) {
                Ok(c) => vec![c],
                // "AK" means both the suited and offsuit class
                Err(_) if body.chars().count() == 2 => vec![
                    HandClass::parse(&format!("{}s", body))?,
                    HandClass::parse(&format!("{}o", body))?,
                ],
                Err(e) => return Err(e),
            };
            for class in kinds {
                if !plus {
                    range.insert(class);
                } else if class.is_pair() {
                    for r in all_ranks().into_iter().filter(|r| *r >= class.low) {
                        range.insert(HandClass::new(r, r, false));
                    }
                } else {
                    let suited = class.kind == Suitedness::Suited;
                    for r in all_ranks()
                        .into_iter()
                        .filter(|r| *r >= class.low && *r < class.high)
                    {
                        range.insert(HandClass::new(class.high, r, suited));
                    }
                }
            }
        }
        if range.classes.is_empty() {
            return Err(AiError::InvalidNotation(s.to_string()));
        }
        Ok(range)
    }

    /// The strongest classes (by Chen score) covering at least `fraction`
    /// of all 1326 combos.
    pub fn top_percent(fraction: f64) -> Self {
        let target = (fraction.clamp(0.0, 1.0) * TOTAL_COMBOS as f64).round() as u32;
        let mut range = Self::default();
        let mut combos = 0;
        for class in HandClass::ranked() {
            if combos >= target {
                break;
            }
            combos += class.combo_count();
            range.classes.push(*class);
        }
        range
    }

    pub fn classes(&self) -> &[HandClass] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, a: Card, b: Card) -> bool {
        self.contains_class(&HandClass::from_cards(a, b))
    }

    pub fn contains_class(&self, class: &HandClass) -> bool {
        self.classes.contains(class)
    }

    pub fn combo_count(&self) -> u32 {
        self.classes.iter().map(HandClass::combo_count).sum()
    }

    /// Share of all starting hands in the range.
    pub fn fraction(&self) -> f64 {
        self.combo_count() as f64 / TOTAL_COMBOS as f64
    }

    /// Every concrete combo in the range.
    pub fn combos(&self) -> Vec<[Card; 2]> {
        self.classes.iter().flat_map(HandClass::combos).collect()
    }
}

impl fmt::Display for HandRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.classes.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_notation() {
        for s in ["AA", "AKs", "Q9o", "72o", "T8s"] {
            assert_eq!(HandClass::parse(s).unwrap().to_string(), s);
        }
        assert_eq!(HandClass::parse("9Qo").unwrap().to_string(), "Q9o");
        assert!(HandClass::parse("AAs").is_err());
        assert!(HandClass::parse("AK").is_err());
        assert!(HandClass::parse("Z2o").is_err());
    }

    #[test]
    fn there_are_169_classes_covering_1326_combos() {
        let all = HandClass::ranked();
        assert_eq!(all.len(), 169);
        let combos: u32 = all.iter().map(HandClass::combo_count).sum();
        assert_eq!(combos, TOTAL_COMBOS);
        assert_eq!(all[0].to_string(), "AA");
    }

    #[test]
    fn chen_scores() {
        assert_eq!(HandClass::parse("AA").unwrap().chen_score(), 20.0);
        assert_eq!(HandClass::parse("AKs").unwrap().chen_score(), 12.0);
        assert_eq!(HandClass::parse("22").unwrap().chen_score(), 5.0);
        assert_eq!(HandClass::parse("T9s").unwrap().chen_score(), 8.0);
        assert_eq!(HandClass::parse("72o").unwrap().chen_score(), -1.5);
    }

    #[test]
    fn combos_match_counts() {
        for s in ["AA", "AKs", "AKo"] {
            let c = HandClass::parse(s).unwrap();
            let combos = c.combos();
            assert_eq!(combos.len() as u32, c.combo_count());
            assert!(combos.iter().all(|[a, b]| c.matches(*a, *b)));
        }
    }

    #[test]
    fn plus_shorthand_expands() {
        let pairs = HandRange::parse("77+").unwrap();
        assert_eq!(pairs.classes().len(), 8);
        let kickers = HandRange::parse("ATs+").unwrap();
        let names: Vec<String> = kickers.classes().iter().map(ToString::to_string).collect();
        assert_eq!(names, ["ATs", "AJs", "AQs", "AKs"]);
        let both = HandRange::parse("AK").unwrap();
        assert_eq!(both.combo_count(), 16);
        assert!(HandRange::parse("").is_err());
        assert!(HandRange::parse("XX").is_err());
    }

    #[test]
    fn top_percent_is_nested_and_sized() {
        let tight = HandRange::top_percent(0.15);
        let loose = HandRange::top_percent(0.50);
        assert!(tight.fraction() >= 0.15 && tight.fraction() < 0.17);
        assert!(loose.fraction() >= 0.50 && loose.fraction() < 0.52);
        assert!(tight.classes().iter().all(|c| loose.contains_class(c)));
        assert!(tight.contains_class(&HandClass::parse("AA").unwrap()));
        assert!(!loose.contains_class(&HandClass::parse("72o").unwrap()));
    }
}
