use super::snapshot::CountSnapshot;
use super::tag::card_tag;
use pb_cards::Card;
use pb_core::RunningCount;
use pb_core::DECK_SIZE;
use pb_core::MIN_DECKS_DIVISOR;

/// The shoe state machine: running count plus cards-dealt bookkeeping.
///
/// Observation is the only mutation that moves the count; `shuffle` resets
/// everything and `burn` models sitting down mid-shoe (cards gone from the
/// shoe that we never saw, so the running count stays put).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    num_decks: u8,
    running: RunningCount,
    dealt: u32,
}

impl Counter {
    pub fn new(num_decks: u8) -> Self {
        Self {
            num_decks,
            running: 0,
            dealt: 0,
        }
    }

    /// Folds one observed card into the count.
    ///
    /// Fails without mutating when the shoe is already fully dealt; the
    /// caller recovers with [`Counter::shuffle`].
    pub fn observe(&mut self, card: Card) -> Result<(), CountError> {
        if self.dealt >= self.total_cards() {
            return Err(CountError::ShoeExhausted);
        }
        self.running += card_tag(card);
        self.dealt += 1;
        Ok(())
    }

    /// Atomically observes a batch: either every card counts or none do.
    pub fn observe_all(&mut self, cards: &[Card]) -> Result<(), CountError> {
        if self.dealt + cards.len() as u32 > self.total_cards() {
            return Err(CountError::ShoeExhausted);
        }
        for &card in cards {
            self.running += card_tag(card);
        }
        self.dealt += cards.len() as u32;
        Ok(())
    }

    /// Resets to a fresh shoe. Idempotent.
    pub fn shuffle(&mut self) {
        self.running = 0;
        self.dealt = 0;
    }

    /// Late entry: `n` cards are already gone from the shoe but were never
    /// seen, so penetration advances while the running count stays zero.
    pub fn burn(&mut self, n: u32) {
        self.shuffle();
        self.dealt = n.min(self.total_cards());
    }

    /// Derives the current count metrics.
    pub fn snapshot(&self) -> CountSnapshot {
        let total = self.total_cards();
        let decks_remaining = (total - self.dealt) as f64 / DECK_SIZE as f64;
        CountSnapshot {
            running_count: self.running,
            true_count: self.running as f64 / decks_remaining.max(MIN_DECKS_DIVISOR),
            decks_remaining,
            penetration: self.dealt as f64 / total as f64,
            cards_dealt: self.dealt,
        }
    }

    /// True once the cut card (at the given penetration) has been reached.
    pub fn is_shuffle_due(&self, penetration: f64) -> bool {
        self.dealt >= (self.total_cards() as f64 * penetration) as u32
    }

    pub fn cards_remaining(&self) -> u32 {
        self.total_cards() - self.dealt
    }
    pub fn cards_dealt(&self) -> u32 {
        self.dealt
    }
    pub fn num_decks(&self) -> u8 {
        self.num_decks
    }

    fn total_cards(&self) -> u32 {
        self.num_decks as u32 * DECK_SIZE
    }
}

/// Errors from shoe observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountError {
    /// Every card of the shoe has already been observed.
    ShoeExhausted,
}

impl std::fmt::Display for CountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShoeExhausted => write!(f, "shoe exhausted: all cards already observed"),
        }
    }
}

impl std::error::Error for CountError {}
