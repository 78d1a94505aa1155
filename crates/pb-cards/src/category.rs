use super::rank::Rank;

/// Strategy-lookup classification of a hand.
///
/// Pair classification takes precedence over hard/soft: a pair of tens is
/// `Pair(Ten)` for split indexing even though it also plays as hard 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandCategory {
    /// No ace counted as 11.
    Hard(u8),
    /// At least one ace still counted as 11.
    Soft(u8),
    /// Exactly two cards of equal rank.
    Pair(Rank),
}

impl HandCategory {
    /// Lookup value for pair rows: pips for 2-9, 10 for the four ten-ranks,
    /// 11 for aces.
    pub fn pair_value(rank: Rank) -> u8 {
        rank.value()
    }
    /// True if this category is a pair.
    pub fn is_pair(&self) -> bool {
        matches!(self, Self::Pair(_))
    }
}

impl std::fmt::Display for HandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Hard(t) => write!(f, "H{}", t),
            Self::Soft(t) => write!(f, "S{}", t),
            Self::Pair(r) => write!(f, "P{}", HandCategory::pair_value(*r)),
        }
    }
}
