use pb_core::RunningCount;
use pb_core::TrueCount;
use serde::Deserialize;
use serde::Serialize;

/// Point-in-time view of the shoe for decision and betting engines.
///
/// `decks_remaining` is reported raw; only the true-count division clamps
/// its divisor to [`pb_core::MIN_DECKS_DIVISOR`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountSnapshot {
    pub running_count: RunningCount,
    pub true_count: TrueCount,
    pub decks_remaining: f64,
    pub penetration: f64,
    pub cards_dealt: u32,
}

impl CountSnapshot {
    /// A fresh-shoe snapshot for the given shoe size.
    pub fn fresh(num_decks: u8) -> Self {
        Self {
            running_count: 0,
            true_count: 0.0,
            decks_remaining: num_decks as f64,
            penetration: 0.0,
            cards_dealt: 0,
        }
    }
}

impl std::fmt::Display for CountSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RC {:+} TC {:+.2} ({:.1} decks left, {:.0}% dealt)",
            self.running_count,
            self.true_count,
            self.decks_remaining,
            self.penetration * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_is_zeroed() {
        let snap = CountSnapshot::fresh(6);
        assert_eq!(snap.running_count, 0);
        assert_eq!(snap.true_count, 0.0);
        assert_eq!(snap.decks_remaining, 6.0);
        assert_eq!(snap.cards_dealt, 0);
    }

    #[test]
    fn serializes_fields() {
        let snap = CountSnapshot::fresh(6);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["running_count"], 0);
        assert_eq!(json["decks_remaining"], 6.0);
    }
}
