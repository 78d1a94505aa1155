//! Core type aliases, traits, and constants for pitboss.
//!
//! This crate provides the foundational types and tuned engine parameters
//! used throughout the pitboss workspace.

mod rules;

pub use rules::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Bankrolls, wagers, and payouts in table currency.
pub type Money = f64;
/// Index of a player hand within a round (0 until a split happens).
pub type Position = usize;
/// Hi-Lo running count units.
pub type RunningCount = i32;
/// True count and advantage figures.
pub type TrueCount = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and shoe simulation.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
    /// Parse from a string form. Returns None on malformed input.
    pub fn parse(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s).ok().map(Self::from)
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// SHOE PARAMETERS
// ============================================================================
/// Cards in a single deck.
pub const DECK_SIZE: u32 = 52;
/// Floor on the decks-remaining divisor when converting running count to
/// true count. Prevents unbounded magnification at end of shoe.
pub const MIN_DECKS_DIVISOR: f64 = 0.5;
/// Minimum cards left in the shoe to open a round (two player cards, the
/// dealer up card, and at least one more draw).
pub const MIN_CARDS_TO_DEAL: u32 = 4;

// ============================================================================
// ADVANTAGE MODEL
// Linear EoR-based approximation: advantage = TC * slope - baseline_edge.
// ============================================================================
/// Advantage gained per point of true count (~0.5%).
pub const TC_SLOPE: f64 = 0.005;
/// Baseline house edge for 6-deck S17 DAS late-surrender 3:2.
pub const EDGE_BASELINE: f64 = 0.004;
/// Added edge when the dealer hits soft 17.
pub const EDGE_H17: f64 = 0.0022;
/// Added edge when blackjack pays worse than 3:2 (i.e. 6:5).
pub const EDGE_SHORT_PAYOUT: f64 = 0.0139;
/// Payouts below this ratio are treated as short (6:5-class) games.
pub const SHORT_PAYOUT_CUTOFF: f64 = 1.4;
/// Added edge when doubling after split is not allowed.
pub const EDGE_NO_DAS: f64 = 0.0014;
/// Added edge when surrender is not available.
pub const EDGE_NO_SURRENDER: f64 = 0.0008;
/// Added edge when doubling is restricted to 10 and 11.
pub const EDGE_DOUBLE_10_11: f64 = 0.0018;
/// Added edge when doubling is restricted to 9 through 11.
pub const EDGE_DOUBLE_9_11: f64 = 0.0009;

// ============================================================================
// BET SIZING
// ============================================================================
/// Variance of a unit blackjack wager.
pub const BLACKJACK_VARIANCE: f64 = 1.26;
/// Default Kelly fraction (half-Kelly).
pub const KELLY_FRACTION: f64 = 0.5;
/// Default table minimum wager.
pub const TABLE_MIN: Money = 15.0;
/// Default table maximum wager.
pub const TABLE_MAX: Money = 500.0;
/// Default cap on bet spread, in table-minimum units.
pub const MAX_SPREAD: f64 = 12.0;
/// Penetration beyond which the linear count model degrades; bets are
/// forced to table minimum past this point.
pub const MAX_BETTING_PENETRATION: f64 = 0.85;
/// True count below which the exit (Wong-out) signal raises.
pub const WONG_OUT_THRESHOLD: f64 = -1.0;

// ============================================================================
// STRATEGY DEVIATIONS
// ============================================================================
/// Extra true-count evidence demanded before a deviation fires.
pub const DEVIATION_MARGIN: f64 = 0.0;
/// True count index at which taking insurance becomes profitable.
pub const INSURANCE_INDEX: f64 = 3.0;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
