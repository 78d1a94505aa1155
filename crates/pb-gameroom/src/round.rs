use pb_cards::Card;
use pb_cards::Hand;
use pb_core::Money;
use pb_dto::Outcome;

/// Orchestrator phase within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No hand in progress.
    Idle,
    /// Awaiting an action on the active player hand.
    PlayerTurn,
    /// Dealer drawing to completion (transient within one operation).
    DealerTurn,
    /// All hands resolved; the next deal returns to Idle.
    Settled,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::PlayerTurn => write!(f, "player_turn"),
            Self::DealerTurn => write!(f, "dealer_turn"),
            Self::Settled => write!(f, "settled"),
        }
    }
}

/// One player hand in flight, with its wager and resolution state.
#[derive(Debug, Clone, PartialEq)]
pub struct HandPlay {
    pub hand: Hand,
    pub wager: Money,
    /// No further actions accepted; awaiting the dealer.
    pub stood: bool,
    /// Created by splitting a pair. Split hands cannot be naturals.
    pub from_split: bool,
    /// Set as soon as the hand's fate no longer depends on the dealer
    /// (bust, surrender), or at settlement.
    pub outcome: Option<Outcome>,
}

impl HandPlay {
    /// A freshly dealt two-card hand.
    pub fn dealt(first: Card, second: Card, wager: Money) -> Self {
        Self {
            hand: Hand::from(vec![first, second]),
            wager,
            stood: false,
            from_split: false,
            outcome: None,
        }
    }

    /// A hand spawned by a split. Frozen hands (split aces) stand
    /// immediately after their single card.
    pub fn split(first: Card, second: Card, wager: Money, frozen: bool) -> Self {
        Self {
            hand: Hand::from(vec![first, second]),
            wager,
            stood: frozen,
            from_split: true,
            outcome: None,
        }
    }

    /// The hand takes no more actions this round.
    pub fn resolved(&self) -> bool {
        self.stood || self.outcome.is_some()
    }

    /// Still in contention at showdown: stood without an early outcome.
    pub fn contends(&self) -> bool {
        self.stood && self.outcome.is_none()
    }

    /// A natural: two-card 21 on a non-split hand.
    pub fn is_natural(&self) -> bool {
        !self.from_split && self.hand.is_blackjack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }

    #[test]
    fn dealt_hand_is_open() {
        let play = HandPlay::dealt(card("Th"), card("6d"), 15.0);
        assert!(!play.resolved());
        assert!(!play.contends());
        assert_eq!(play.hand.total(), 16);
    }

    #[test]
    fn split_hand_cannot_be_natural() {
        let play = HandPlay::split(card("Ah"), card("Kd"), 15.0, false);
        assert_eq!(play.hand.total(), 21);
        assert!(!play.is_natural());
        let dealt = HandPlay::dealt(card("Ah"), card("Kd"), 15.0);
        assert!(dealt.is_natural());
    }

    #[test]
    fn frozen_split_hand_stands() {
        let play = HandPlay::split(card("Ah"), card("7d"), 15.0, true);
        assert!(play.resolved());
        assert!(play.contends());
    }

    #[test]
    fn bust_outcome_resolves_without_contending() {
        let mut play = HandPlay::dealt(card("Th"), card("6d"), 15.0);
        play.outcome = Some(Outcome::Bust);
        assert!(play.resolved());
        assert!(!play.contends());
    }

    #[test]
    fn phase_labels() {
        assert_eq!(Phase::Idle.to_string(), "idle");
        assert_eq!(Phase::PlayerTurn.to_string(), "player_turn");
        assert_eq!(Phase::Settled.to_string(), "settled");
    }
}
