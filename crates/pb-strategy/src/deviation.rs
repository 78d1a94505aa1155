use super::action::Action;
use pb_cards::Hand;
use pb_core::TrueCount;
use pb_core::INSURANCE_INDEX;

/// Hand shape a deviation applies to.
///
/// `Hard` excludes soft hands *and* pairs; `Pair` keys on the collapsed
/// pair value (2..=10, 11 for aces). A pair of tens therefore matches the
/// ten-pair index play but never the hard-15/16 indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Hard(u8),
    Soft(u8),
    Pair(u8),
}

/// Which side of the index the true count must be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Fires at or above the index.
    AtOrAbove,
    /// Fires strictly below the index.
    Below,
}

/// A single count-indexed departure from baseline strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    pub id: &'static str,
    pub target: Target,
    /// Dealer up value, 2..=11 (ace high).
    pub dealer: u8,
    pub threshold: TrueCount,
    pub direction: Direction,
    pub action: Action,
    /// Higher priority is consulted first.
    pub priority: i32,
}

impl Deviation {
    /// True if this deviation's trigger shape matches the hand situation.
    pub fn matches(&self, hand: &Hand, up: u8) -> bool {
        if up != self.dealer {
            return false;
        }
        match self.target {
            Target::Hard(t) => !hand.is_soft() && !hand.is_pair() && hand.total() == t,
            Target::Soft(t) => hand.is_soft() && !hand.is_pair() && hand.total() == t,
            Target::Pair(v) => hand.is_pair() && hand.cards()[0].value() == v,
        }
    }

    /// Count predicate with the evidence margin applied: the margin always
    /// pushes the trigger further from baseline, whichever the direction.
    pub fn triggered(&self, true_count: TrueCount, margin: f64) -> bool {
        match self.direction {
            Direction::AtOrAbove => true_count >= self.threshold + margin,
            Direction::Below => true_count < self.threshold - margin,
        }
    }
}

use Action::Double as D;
use Action::Hit as H;
use Action::Split as P;
use Action::Stand as S;
use Action::Surrender as R;
use Direction::AtOrAbove as GE;
use Direction::Below as LT;

macro_rules! dev {
    ($id:literal, $target:expr, $up:literal, $thr:literal, $dir:expr, $act:expr, $pri:literal) => {
        Deviation {
            id: $id,
            target: $target,
            dealer: $up,
            threshold: $thr,
            direction: $dir,
            action: $act,
            priority: $pri,
        }
    };
}

/// The Illustrious 18 playing indices, in canonical value order.
#[rustfmt::skip]
pub const ILLUSTRIOUS_18: [Deviation; 16] = [
    dev!("I18_16v10", Target::Hard(16), 10,  0.0, GE, S,  1),
    dev!("I18_15v10", Target::Hard(15), 10,  4.0, GE, S,  2),
    dev!("I18_TTv11", Target::Pair(10), 11,  6.0, GE, P,  3),
    dev!("I18_10v10", Target::Hard(10), 10,  4.0, GE, D,  4),
    dev!("I18_12v3",  Target::Hard(12),  3,  2.0, GE, S,  5),
    dev!("I18_12v2",  Target::Hard(12),  2,  3.0, GE, S,  6),
    dev!("I18_11v11", Target::Hard(11), 11,  1.0, GE, D,  7),
    dev!("I18_9v2",   Target::Hard(9),   2,  1.0, GE, D,  8),
    dev!("I18_10v11", Target::Hard(10), 11,  4.0, GE, D,  9),
    dev!("I18_9v7",   Target::Hard(9),   7,  3.0, GE, D, 10),
    dev!("I18_16v9",  Target::Hard(16),  9,  5.0, GE, S, 11),
    dev!("I18_13v2",  Target::Hard(13),  2, -1.0, LT, H, 12),
    dev!("I18_12v4",  Target::Hard(12),  4,  0.0, LT, H, 13),
    dev!("I18_12v5",  Target::Hard(12),  5, -2.0, LT, H, 14),
    dev!("I18_12v6",  Target::Hard(12),  6, -1.0, LT, H, 15),
    dev!("I18_13v3",  Target::Hard(13),  3, -2.0, LT, H, 16),
];

/// The Fab 4 surrender indices.
#[rustfmt::skip]
pub const FAB_4: [Deviation; 4] = [
    dev!("FAB_15v10", Target::Hard(15), 10,  0.0, GE, R, 100),
    dev!("FAB_15v11", Target::Hard(15), 11,  1.0, GE, R, 101),
    dev!("FAB_14v10", Target::Hard(14), 10,  3.0, GE, R, 102),
    dev!("FAB_15v9",  Target::Hard(15),  9,  2.0, GE, R, 103),
];

/// Insurance index: take insurance at TC >= +3. A separate pre-action
/// query, never returned as a hand action.
pub fn should_take_insurance(true_count: TrueCount, margin: f64) -> bool {
    true_count >= INSURANCE_INDEX + margin
}

/// The ordered deviation set consulted by the decision engine.
#[derive(Debug, Clone)]
pub struct Deviations(Vec<Deviation>);

impl Deviations {
    /// Illustrious 18 plus Fab 4, ordered with surrender indices first.
    pub fn standard() -> Self {
        let mut entries: Vec<Deviation> = FAB_4.iter().chain(ILLUSTRIOUS_18.iter()).copied().collect();
        entries.sort_by_key(|d| std::cmp::Reverse(d.priority));
        Self(entries)
    }

    /// First triggered surrender deviation for the situation.
    pub fn surrender(&self, hand: &Hand, up: u8, tc: TrueCount, margin: f64) -> Option<&Deviation> {
        self.first(hand, up, tc, margin, |d| d.action == Action::Surrender)
    }

    /// First triggered non-surrender deviation for the situation.
    pub fn play(&self, hand: &Hand, up: u8, tc: TrueCount, margin: f64) -> Option<&Deviation> {
        self.first(hand, up, tc, margin, |d| d.action != Action::Surrender)
    }

    fn first<F>(&self, hand: &Hand, up: u8, tc: TrueCount, margin: f64, keep: F) -> Option<&Deviation>
    where
        F: Fn(&Deviation) -> bool,
    {
        self.0
            .iter()
            .filter(|d| keep(d))
            .filter(|d| d.matches(hand, up))
            .find(|d| d.triggered(tc, margin))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Deviations {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_cards::Card;

    fn hand(s: &str) -> Hand {
        Hand::from(Card::parse(s).unwrap())
    }

    #[test]
    fn standard_set_is_complete() {
        assert_eq!(Deviations::standard().len(), 20);
    }

    #[test]
    fn sixteen_vs_ten_stands_at_zero() {
        let devs = Deviations::standard();
        let h = hand("Th 6d");
        let dev = devs.play(&h, 10, 0.0, 0.0).unwrap();
        assert_eq!(dev.id, "I18_16v10");
        assert_eq!(dev.action, Action::Stand);
        assert!(devs.play(&h, 10, -0.5, 0.0).is_none());
    }

    #[test]
    fn fifteen_vs_ten_needs_plus_four() {
        let devs = Deviations::standard();
        let h = hand("Th 5d");
        assert!(devs.play(&h, 10, 3.9, 0.0).is_none());
        assert_eq!(devs.play(&h, 10, 4.0, 0.0).unwrap().id, "I18_15v10");
    }

    #[test]
    fn negative_indices_fire_below() {
        let devs = Deviations::standard();
        let h = hand("Th 3d"); // hard 13
        assert_eq!(devs.play(&h, 2, -1.5, 0.0).unwrap().action, Action::Hit);
        assert!(devs.play(&h, 2, -1.0, 0.0).is_none());
        let h = hand("Th 2d"); // hard 12
        assert_eq!(devs.play(&h, 4, -0.1, 0.0).unwrap().id, "I18_12v4");
        assert!(devs.play(&h, 4, 0.0, 0.0).is_none());
    }

    #[test]
    fn fab4_surrenders() {
        let devs = Deviations::standard();
        let h = hand("9c 6d"); // hard 15
        assert_eq!(devs.surrender(&h, 10, 0.0, 0.0).unwrap().id, "FAB_15v10");
        assert!(devs.surrender(&h, 10, -0.1, 0.0).is_none());
        assert_eq!(devs.surrender(&h, 9, 2.0, 0.0).unwrap().id, "FAB_15v9");
        assert_eq!(devs.surrender(&h, 11, 1.0, 0.0).unwrap().id, "FAB_15v11");
        let h = hand("8c 6d"); // hard 14
        assert_eq!(devs.surrender(&h, 10, 3.0, 0.0).unwrap().id, "FAB_14v10");
    }

    #[test]
    fn pair_of_tens_splits_at_six() {
        let devs = Deviations::standard();
        let h = hand("Kh Kd");
        assert_eq!(devs.play(&h, 11, 6.0, 0.0).unwrap().id, "I18_TTv11");
        assert!(devs.play(&h, 11, 5.9, 0.0).is_none());
    }

    #[test]
    fn pairs_do_not_match_hard_indices() {
        let devs = Deviations::standard();
        let h = hand("8h 8d"); // hard 16 but a pair
        assert!(devs.play(&h, 10, 5.0, 0.0).is_none());
    }

    #[test]
    fn soft_hands_do_not_match_hard_indices() {
        let devs = Deviations::standard();
        let h = hand("Ah 5d"); // soft 16
        assert!(devs.play(&h, 10, 5.0, 0.0).is_none());
    }

    #[test]
    fn margin_demands_more_evidence_both_ways() {
        let devs = Deviations::standard();
        let sixteen = hand("Th 6d");
        // at-or-above: +1 margin moves 16v10 from 0 to +1
        assert!(devs.play(&sixteen, 10, 0.5, 1.0).is_none());
        assert!(devs.play(&sixteen, 10, 1.0, 1.0).is_some());
        // below: +1 margin moves 13v2 from -1 to -2
        let thirteen = hand("Th 3d");
        assert!(devs.play(&thirteen, 2, -1.5, 1.0).is_none());
        assert!(devs.play(&thirteen, 2, -2.5, 1.0).is_some());
    }

    #[test]
    fn insurance_index() {
        assert!(!should_take_insurance(2.9, 0.0));
        assert!(should_take_insurance(3.0, 0.0));
        assert!(!should_take_insurance(3.5, 1.0));
        assert!(should_take_insurance(4.0, 1.0));
    }
}
