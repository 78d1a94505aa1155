use super::card::Card;
use super::category::HandCategory;

/// An ordered blackjack hand with derived scoring state.
///
/// The total is the largest value ≤ 21 reachable by scoring aces as 11 or
/// 1; if every choice busts, all aces score 1. A hand is soft while at
/// least one ace still counts as 11.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn empty() -> Self {
        Self(Vec::new())
    }
    /// Adds a card to the hand.
    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }
    /// The cards in deal order.
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Best total ≤ 21, or the all-aces-low total if busted.
    pub fn total(&self) -> u8 {
        self.score().0
    }
    /// True while an ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        self.score().1
    }
    /// Exactly two cards of equal rank. A King-Ten shares value but is not
    /// a pair.
    pub fn is_pair(&self) -> bool {
        match self.0.as_slice() {
            [a, b] => a.rank() == b.rank(),
            _ => false,
        }
    }
    /// Natural: exactly two cards totalling 21.
    pub fn is_blackjack(&self) -> bool {
        self.0.len() == 2 && self.total() == 21
    }
    pub fn is_bust(&self) -> bool {
        self.total() > 21
    }

    /// Classification for strategy lookup. Pair detection takes precedence.
    pub fn category(&self) -> HandCategory {
        if self.is_pair() {
            HandCategory::Pair(self.0[0].rank())
        } else if self.is_soft() {
            HandCategory::Soft(self.total())
        } else {
            HandCategory::Hard(self.total())
        }
    }

    fn score(&self) -> (u8, bool) {
        let mut total: u8 = self.0.iter().map(|c| c.value()).sum();
        let mut high_aces = self.0.iter().filter(|c| c.is_ace()).count();
        while total > 21 && high_aces > 0 {
            total -= 10;
            high_aces -= 1;
        }
        (total, high_aces > 0 && total <= 21)
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}
impl From<&[Card]> for Hand {
    fn from(cards: &[Card]) -> Self {
        Self(cards.to_vec())
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self
            .0
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            f,
            "[{}] = {}{}",
            cards,
            self.total(),
            if self.is_soft() { " soft" } else { "" }
        )
    }
}
