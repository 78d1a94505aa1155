use super::action::Action;
use super::chart::Chart;
use super::chart::ChartError;
use super::deviation::Deviations;
use pb_cards::Card;
use pb_cards::Hand;
use pb_cards::HandCategory;
use pb_core::GameRules;
use pb_core::TrueCount;
use pb_count::CountSnapshot;

/// Where the hand sits in its round, for legality filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// The hand is on its initial two cards with no action taken yet.
    pub first_two: bool,
    /// The hand was created by a split.
    pub after_split: bool,
    /// Splits already taken this round.
    pub splits_used: u8,
}

impl Turn {
    /// A fresh two-card hand at the top of a round.
    pub fn opening() -> Self {
        Self {
            first_two: true,
            after_split: false,
            splits_used: 0,
        }
    }
}

/// The chosen action with its counterfactual context.
///
/// `baseline` is what the chart alone would play; when a count index
/// overrode it, `deviation` names the index. Callers use the pair for
/// correctness grading and deviation forensics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub baseline: Action,
    pub deviation: Option<&'static str>,
    pub true_count: TrueCount,
}

impl Decision {
    /// True if a deviation moved the play off baseline.
    pub fn deviated(&self) -> bool {
        self.action != self.baseline
    }
}

/// The deterministic decision engine.
///
/// Pipeline: baseline chart lookup, then surrender indices (Fab 4), then
/// split handling, then playing indices (Illustrious 18), then legality
/// filtering. Same inputs always produce the same [`Decision`]; nothing is
/// mutated.
#[derive(Debug, Clone)]
pub struct Engine {
    rules: GameRules,
    chart: Chart,
    deviations: Deviations,
    margin: f64,
}

impl Engine {
    /// Builds the engine for a rule set, verifying chart coverage.
    pub fn new(rules: GameRules, margin: f64) -> Result<Self, ChartError> {
        Ok(Self {
            chart: Chart::for_rules(&rules)?,
            deviations: Deviations::standard(),
            rules,
            margin,
        })
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// The optimal action for a hand against a dealer up card at the given
    /// count. The hand must be live (not bust); there is no chart row for
    /// a busted total.
    pub fn decide(&self, hand: &Hand, up: Card, count: &CountSnapshot, turn: Turn) -> Decision {
        let tc = count.true_count;
        let up = up.value();
        let baseline = self.baseline(hand, up, turn);

        // Fab 4 first: a live surrender index pre-empts everything else.
        if self.can_surrender(hand, turn) {
            if let Some(dev) = self.deviations.surrender(hand, up, tc, self.margin) {
                return Decision {
                    action: Action::Surrender,
                    baseline,
                    deviation: Some(dev.id),
                    true_count: tc,
                };
            }
        }

        // Split decisions resolve before the playing indices.
        if hand.is_pair() && self.can_split(hand, turn) {
            if let Some(dev) = self.deviations.play(hand, up, tc, self.margin) {
                if dev.action == Action::Split {
                    return Decision {
                        action: Action::Split,
                        baseline,
                        deviation: Some(dev.id),
                        true_count: tc,
                    };
                }
            }
            if baseline == Action::Split {
                return Decision {
                    action: Action::Split,
                    baseline,
                    deviation: None,
                    true_count: tc,
                };
            }
        }

        // Illustrious 18.
        if let Some(dev) = self.deviations.play(hand, up, tc, self.margin) {
            if dev.action != Action::Split {
                return Decision {
                    action: self.legalize(dev.action, hand, up, turn),
                    baseline,
                    deviation: Some(dev.id),
                    true_count: tc,
                };
            }
        }

        Decision {
            action: baseline,
            baseline,
            deviation: None,
            true_count: tc,
        }
    }

    /// Whether the insurance side wager is profitable at this count.
    pub fn take_insurance(&self, count: &CountSnapshot) -> bool {
        super::deviation::should_take_insurance(count.true_count, self.margin)
    }

    /// Legality of a caller-requested action for this hand and turn.
    pub fn is_legal(&self, action: Action, hand: &Hand, turn: Turn) -> bool {
        match action {
            Action::Stand | Action::Hit => true,
            Action::Double => self.can_double(hand, turn),
            Action::Split => hand.is_pair() && self.can_split(hand, turn),
            Action::Surrender => self.can_surrender(hand, turn),
        }
    }

    /// Chart action with the legality fallbacks already applied.
    fn baseline(&self, hand: &Hand, up: u8, turn: Turn) -> Action {
        let category = match hand.category() {
            // A pair that cannot be split plays as its hard/soft total.
            HandCategory::Pair(_) if !self.can_split(hand, turn) => self.flat_category(hand),
            category => category,
        };
        self.legalize(self.chart.action(category, up), hand, up, turn)
    }

    /// Resolves an action that may be illegal on this turn into its
    /// fallback: double and surrender fall to hit, split falls to the
    /// hand's hard/soft entry.
    fn legalize(&self, action: Action, hand: &Hand, up: u8, turn: Turn) -> Action {
        match action {
            Action::Double if !self.can_double(hand, turn) => Action::Hit,
            Action::Surrender if !self.can_surrender(hand, turn) => Action::Hit,
            Action::Split if !self.can_split(hand, turn) => {
                let flat = self.chart.action(self.flat_category(hand), up);
                match flat {
                    Action::Double if !self.can_double(hand, turn) => Action::Hit,
                    Action::Split => Action::Hit, // flat rows never split
                    flat => flat,
                }
            }
            action => action,
        }
    }

    fn flat_category(&self, hand: &Hand) -> HandCategory {
        if hand.is_soft() {
            HandCategory::Soft(hand.total())
        } else {
            HandCategory::Hard(hand.total())
        }
    }

    fn can_double(&self, hand: &Hand, turn: Turn) -> bool {
        turn.first_two
            && hand.len() == 2
            && (!turn.after_split || self.rules.double_after_split)
            && self
                .rules
                .double_restriction
                .permits(hand.total(), hand.is_soft())
    }

    fn can_split(&self, hand: &Hand, turn: Turn) -> bool {
        hand.is_pair() && (turn.splits_used == 0 || self.rules.resplit_allowed)
    }

    fn can_surrender(&self, hand: &Hand, turn: Turn) -> bool {
        self.rules.surrender_allowed && turn.first_two && hand.len() == 2 && !turn.after_split
    }
}
