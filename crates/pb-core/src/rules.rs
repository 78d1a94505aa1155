use serde::Deserialize;
use serde::Serialize;

/// Which two-card totals may be doubled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleRestriction {
    /// Any first two cards.
    #[default]
    AnyTwo,
    /// Hard 9, 10, or 11 only.
    NineThroughEleven,
    /// Hard 10 or 11 only.
    TenEleven,
}

impl DoubleRestriction {
    /// True if a hand with this total may be doubled under the restriction.
    pub fn permits(&self, total: u8, is_soft: bool) -> bool {
        match self {
            Self::AnyTwo => true,
            Self::NineThroughEleven => !is_soft && (9..=11).contains(&total),
            Self::TenEleven => !is_soft && (10..=11).contains(&total),
        }
    }
}

/// Immutable table rules. Shared read-only across sessions.
///
/// Defaults describe the research-validated benchmark game: 6 decks, dealer
/// stands soft 17, double after split, late surrender, 3:2 blackjack, cut
/// card at 75% penetration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Number of decks in the shoe.
    pub num_decks: u8,
    /// S17 when true; H17 (dealer hits soft 17) when false.
    pub dealer_stands_soft_17: bool,
    /// Doubling after split allowed (DAS).
    pub double_after_split: bool,
    /// Late surrender available.
    pub surrender_allowed: bool,
    /// Blackjack payout ratio: 1.5 = 3:2, 1.2 = 6:5.
    pub blackjack_payout: f64,
    /// Fraction of the shoe dealt before the cut card forces a shuffle.
    pub penetration: f64,
    /// More than one split per round allowed.
    pub resplit_allowed: bool,
    /// Split aces may draw beyond their single card.
    pub hit_split_aces: bool,
    /// Which totals may be doubled.
    pub double_restriction: DoubleRestriction,
    /// Table minimum wager.
    pub table_min: super::Money,
    /// Table maximum wager.
    pub table_max: super::Money,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            num_decks: 6,
            dealer_stands_soft_17: true,
            double_after_split: true,
            surrender_allowed: true,
            blackjack_payout: 1.5,
            penetration: 0.75,
            resplit_allowed: false,
            hit_split_aces: false,
            double_restriction: DoubleRestriction::AnyTwo,
            table_min: super::TABLE_MIN,
            table_max: super::TABLE_MAX,
        }
    }
}

impl GameRules {
    /// Total cards in the shoe.
    pub fn total_cards(&self) -> u32 {
        self.num_decks as u32 * super::DECK_SIZE
    }
    /// Number of cards dealt before the cut card forces a shuffle.
    pub fn cut_card(&self) -> u32 {
        (self.total_cards() as f64 * self.penetration) as u32
    }
    /// Checks internal consistency at load. Incoherent rules never reach a
    /// session.
    pub fn validate(&self) -> Result<(), RulesError> {
        if ![1, 2, 4, 6, 8].contains(&self.num_decks) {
            return Err(RulesError::Decks(self.num_decks));
        }
        if !(self.penetration > 0.0 && self.penetration < 1.0) {
            return Err(RulesError::Penetration(self.penetration));
        }
        if !(self.blackjack_payout > 1.0 && self.blackjack_payout <= 2.0) {
            return Err(RulesError::Payout(self.blackjack_payout));
        }
        if !(self.table_min > 0.0 && self.table_min <= self.table_max) {
            return Err(RulesError::Limits(self.table_min, self.table_max));
        }
        Ok(())
    }

    /// Vegas Strip benchmark: 6D, S17, DAS, LS, 3:2.
    pub fn vegas_strip() -> Self {
        Self::default()
    }
    /// Vegas Downtown: 2D, H17, no surrender.
    pub fn vegas_downtown() -> Self {
        Self {
            num_decks: 2,
            dealer_stands_soft_17: false,
            surrender_allowed: false,
            ..Self::default()
        }
    }
    /// Atlantic City: 8D, S17, DAS, LS.
    pub fn atlantic_city() -> Self {
        Self {
            num_decks: 8,
            ..Self::default()
        }
    }
}

impl std::fmt::Display for GameRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}D",
            if self.dealer_stands_soft_17 { "S17" } else { "H17" },
            if self.double_after_split { "DAS" } else { "NDAS" },
            if self.surrender_allowed { "LS" } else { "NS" },
            self.num_decks
        )
    }
}

/// Rule sets that fail validation at load.
#[derive(Debug, Clone, PartialEq)]
pub enum RulesError {
    Decks(u8),
    Penetration(f64),
    Payout(f64),
    Limits(super::Money, super::Money),
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decks(n) => write!(f, "unsupported deck count: {}", n),
            Self::Penetration(p) => write!(f, "penetration out of range (0,1): {}", p),
            Self::Payout(r) => write!(f, "blackjack payout out of range: {}", r),
            Self::Limits(lo, hi) => write!(f, "invalid table limits: {}..{}", lo, hi),
        }
    }
}

impl std::error::Error for RulesError {}
