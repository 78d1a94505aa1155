//! Hi-Lo shoe tracking.
//!
//! The [`Counter`] is the shoe state machine: it folds every observed card
//! into a running count and card tally, and derives true count, decks
//! remaining, and penetration on demand as a [`CountSnapshot`]. It does not
//! know where cards come from — auto-mode dealing and shadow-mode
//! observation both feed it the same way.
mod counter;
mod snapshot;
mod tag;

pub use counter::*;
pub use snapshot::*;
pub use tag::*;
