use super::action::Action;
use pb_cards::HandCategory;
use pb_core::GameRules;

use Action::Double as D;
use Action::Hit as H;
use Action::Split as P;
use Action::Stand as S;

/// Dealer up-card columns: values 2 through 11 (ace).
const UP_LO: u8 = 2;
const UP_HI: u8 = 11;
const COLS: usize = (UP_HI - UP_LO + 1) as usize;

/// Hard rows 4..=21. Hard 4 only arises as the fallback for a 2-2 pair
/// that cannot be split.
const HARD_LO: u8 = 4;
const HARD_HI: u8 = 21;
/// Soft rows 12..=21. Soft 12 only arises as the fallback for A-A.
const SOFT_LO: u8 = 12;
const SOFT_HI: u8 = 21;
/// Pair rows keyed by pair value: 2..=10 plus 11 for aces.
const PAIR_LO: u8 = 2;
const PAIR_HI: u8 = 11;

type Row = (u8, [Action; COLS]);

/// Baseline rows shared by S17 and H17.
///
/// Transcribed from the engine's canonical table set. The S17/H17 variants
/// differ only where dealer soft-17 behaviour moves the marginal doubles.
#[rustfmt::skip]
const HARD_ROWS: [Row; 18] = [
    ( 4, [H, H, H, H, H, H, H, H, H, H]),
    ( 5, [H, H, H, H, H, H, H, H, H, H]),
    ( 6, [H, H, H, H, H, H, H, H, H, H]),
    ( 7, [H, H, H, H, H, H, H, H, H, H]),
    ( 8, [H, H, H, H, H, H, H, H, H, H]),
    ( 9, [H, D, D, D, D, H, H, H, H, H]),
    (10, [D, D, D, D, D, D, D, D, H, H]),
    (11, [D, D, D, D, D, D, D, D, D, H]), // H17 doubles vs ace too
    (12, [H, H, S, S, S, H, H, H, H, H]),
    (13, [S, S, S, S, S, H, H, H, H, H]),
    (14, [S, S, S, S, S, H, H, H, H, H]),
    (15, [S, S, S, S, S, H, H, H, H, H]),
    (16, [S, S, S, S, S, H, H, H, H, H]),
    (17, [S, S, S, S, S, S, S, S, S, S]),
    (18, [S, S, S, S, S, S, S, S, S, S]),
    (19, [S, S, S, S, S, S, S, S, S, S]),
    (20, [S, S, S, S, S, S, S, S, S, S]),
    (21, [S, S, S, S, S, S, S, S, S, S]),
];

#[rustfmt::skip]
const SOFT_ROWS: [Row; 10] = [
    (12, [H, H, H, H, H, H, H, H, H, H]),
    (13, [H, H, H, D, D, H, H, H, H, H]),
    (14, [H, H, H, D, D, H, H, H, H, H]),
    (15, [H, H, D, D, D, H, H, H, H, H]),
    (16, [H, H, D, D, D, H, H, H, H, H]),
    (17, [H, D, D, D, D, H, H, H, H, H]),
    (18, [D, D, D, D, D, S, S, H, H, H]),
    (19, [S, S, S, S, S, S, S, S, S, S]), // H17 doubles vs 6
    (20, [S, S, S, S, S, S, S, S, S, S]),
    (21, [S, S, S, S, S, S, S, S, S, S]),
];

#[rustfmt::skip]
const PAIR_ROWS: [Row; 10] = [
    ( 2, [P, P, P, P, P, P, H, H, H, H]),
    ( 3, [P, P, P, P, P, P, H, H, H, H]),
    ( 4, [H, H, H, P, P, H, H, H, H, H]),
    ( 5, [D, D, D, D, D, D, D, D, H, H]),
    ( 6, [P, P, P, P, P, H, H, H, H, H]),
    ( 7, [P, P, P, P, P, P, H, H, H, H]),
    ( 8, [P, P, P, P, P, P, P, P, P, P]),
    ( 9, [P, P, P, P, P, S, P, P, S, S]),
    (10, [S, S, S, S, S, S, S, S, S, S]),
    (11, [P, P, P, P, P, P, P, P, P, P]),
];

/// The shared rows are the S17 baseline; under H17 the marginal doubles
/// get more aggressive. (kind, row value, dealer up, action)
const H17_PATCH: [(Kind, u8, u8, Action); 2] = [
    (Kind::Hard, 11, 11, D), // double 11 vs ace
    (Kind::Soft, 19, 6, D),  // double soft 19 vs 6
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Hard,
    Soft,
    Pair,
}

impl Kind {
    fn bounds(&self) -> (u8, u8) {
        match self {
            Kind::Hard => (HARD_LO, HARD_HI),
            Kind::Soft => (SOFT_LO, SOFT_HI),
            Kind::Pair => (PAIR_LO, PAIR_HI),
        }
    }
    fn label(&self) -> &'static str {
        match self {
            Kind::Hard => "hard",
            Kind::Soft => "soft",
            Kind::Pair => "pair",
        }
    }
}

/// Immutable baseline strategy table.
///
/// Construction verifies full coverage: every (category, dealer up)
/// combination maps to exactly one action, and no row is out of range or
/// duplicated. Incomplete tables are a load error, never a silent fallback.
#[derive(Debug, Clone)]
pub struct Chart {
    hard: Vec<[Action; COLS]>,
    soft: Vec<[Action; COLS]>,
    pairs: Vec<[Action; COLS]>,
}

impl Chart {
    /// Builds the chart variant for the given rules.
    pub fn for_rules(rules: &GameRules) -> Result<Self, ChartError> {
        let mut chart = Self::build(&HARD_ROWS, &SOFT_ROWS, &PAIR_ROWS)?;
        if !rules.dealer_stands_soft_17 {
            for &(kind, row, up, action) in &H17_PATCH {
                chart.patch(kind, row, up, action)?;
            }
        }
        log::debug!(
            "[chart] built {} baseline",
            if rules.dealer_stands_soft_17 { "S17" } else { "H17" }
        );
        Ok(chart)
    }

    /// Baseline action for a hand category against a dealer up value
    /// (2..=11, ace high).
    pub fn action(&self, category: HandCategory, up: u8) -> Action {
        let col = Self::col(up);
        match category {
            HandCategory::Hard(t) => self.hard[Self::row(Kind::Hard, t)][col],
            HandCategory::Soft(t) => self.soft[Self::row(Kind::Soft, t)][col],
            HandCategory::Pair(r) => self.pairs[Self::row(Kind::Pair, HandCategory::pair_value(r))][col],
        }
    }

    fn build(hard: &[Row], soft: &[Row], pairs: &[Row]) -> Result<Self, ChartError> {
        Ok(Self {
            hard: Self::table(Kind::Hard, hard)?,
            soft: Self::table(Kind::Soft, soft)?,
            pairs: Self::table(Kind::Pair, pairs)?,
        })
    }

    fn table(kind: Kind, rows: &[Row]) -> Result<Vec<[Action; COLS]>, ChartError> {
        let (lo, hi) = kind.bounds();
        let size = (hi - lo + 1) as usize;
        let mut table: Vec<Option<[Action; COLS]>> = vec![None; size];
        for &(value, actions) in rows {
            if !(lo..=hi).contains(&value) {
                return Err(ChartError::OutOfRange(kind.label(), value));
            }
            let slot = &mut table[(value - lo) as usize];
            if slot.is_some() {
                return Err(ChartError::Duplicate(kind.label(), value));
            }
            *slot = Some(actions);
        }
        table
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.ok_or(ChartError::Missing(kind.label(), lo + i as u8)))
            .collect()
    }

    fn patch(&mut self, kind: Kind, value: u8, up: u8, action: Action) -> Result<(), ChartError> {
        let (lo, hi) = kind.bounds();
        if !(lo..=hi).contains(&value) || !(UP_LO..=UP_HI).contains(&up) {
            return Err(ChartError::OutOfRange(kind.label(), value));
        }
        let row = (value - lo) as usize;
        let col = Self::col(up);
        match kind {
            Kind::Hard => self.hard[row][col] = action,
            Kind::Soft => self.soft[row][col] = action,
            Kind::Pair => self.pairs[row][col] = action,
        }
        Ok(())
    }

    fn row(kind: Kind, value: u8) -> usize {
        let (lo, hi) = kind.bounds();
        assert!(
            (lo..=hi).contains(&value),
            "{} lookup out of range: {}",
            kind.label(),
            value
        );
        (value - lo) as usize
    }

    fn col(up: u8) -> usize {
        assert!(
            (UP_LO..=UP_HI).contains(&up),
            "dealer up out of range: {}",
            up
        );
        (up - UP_LO) as usize
    }
}

/// Table construction failures. Surfaced to callers as BAD_RULES.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    Missing(&'static str, u8),
    Duplicate(&'static str, u8),
    OutOfRange(&'static str, u8),
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(kind, v) => write!(f, "chart missing {} row {}", kind, v),
            Self::Duplicate(kind, v) => write!(f, "chart duplicates {} row {}", kind, v),
            Self::OutOfRange(kind, v) => write!(f, "chart {} row out of range: {}", kind, v),
        }
    }
}

impl std::error::Error for ChartError {}
