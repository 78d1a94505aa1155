use super::card::Card;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A virtual multi-deck dealing shoe for auto-mode play.
///
/// Built from `num_decks` complete decks and shuffled with the session's
/// own seeded RNG so replays are reproducible. Cards come off the top via
/// [`Shoe::draw`]; the shoe never reshuffles itself — the session does so
/// when the cut card is reached.
#[derive(Debug)]
pub struct Shoe {
    decks: u8,
    cards: Vec<Card>,
    drawn: usize,
    rng: StdRng,
}

impl Shoe {
    /// A freshly shuffled shoe seeded for reproducible dealing.
    pub fn new(num_decks: u8, seed: u64) -> Self {
        let mut shoe = Self {
            decks: num_decks,
            cards: Vec::new(),
            drawn: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        shoe.shuffle();
        shoe
    }

    /// Rebuilds and reshuffles the full shoe, continuing the RNG stream.
    pub fn shuffle(&mut self) {
        self.cards = (0..self.decks)
            .flat_map(|_| (0..52u8).map(Card::from))
            .collect();
        self.cards.shuffle(&mut self.rng);
        self.drawn = 0;
    }

    /// Draws the next card, or None when the shoe is exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.get(self.drawn).copied();
        if card.is_some() {
            self.drawn += 1;
        }
        card
    }

    /// Returns recently drawn cards to the top of the shoe, so the next
    /// draws repeat them. Supports rolling a failed operation back to its
    /// pre-operation state.
    pub fn rewind(&mut self, dealt: u32) {
        assert!((dealt as usize) <= self.drawn, "cannot rewind forward");
        self.drawn = dealt as usize;
    }

    pub fn remaining(&self) -> u32 {
        (self.cards.len() - self.drawn) as u32
    }
    pub fn dealt(&self) -> u32 {
        self.drawn as u32
    }
}
