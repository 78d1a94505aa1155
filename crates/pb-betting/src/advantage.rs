use pb_core::DoubleRestriction;
use pb_core::GameRules;
use pb_core::TrueCount;

/// Linear EoR-based advantage model: `advantage = TC × slope − edge`.
///
/// The baseline edge is not static — it moves with the table rules. An
/// unadjusted model on an H17 or 6:5 table overstates the player edge and
/// overbets, so construction from rules is the only path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvantageModel {
    slope: f64,
    baseline_edge: f64,
    num_decks: u8,
}

impl AdvantageModel {
    /// Builds the model with the rule-adjusted baseline edge.
    pub fn from_rules(rules: &GameRules) -> Self {
        let mut edge = pb_core::EDGE_BASELINE;
        if !rules.dealer_stands_soft_17 {
            edge += pb_core::EDGE_H17;
        }
        if rules.blackjack_payout < pb_core::SHORT_PAYOUT_CUTOFF {
            edge += pb_core::EDGE_SHORT_PAYOUT;
        }
        if !rules.double_after_split {
            edge += pb_core::EDGE_NO_DAS;
        }
        if !rules.surrender_allowed {
            edge += pb_core::EDGE_NO_SURRENDER;
        }
        edge += match rules.double_restriction {
            DoubleRestriction::AnyTwo => 0.0,
            DoubleRestriction::NineThroughEleven => pb_core::EDGE_DOUBLE_9_11,
            DoubleRestriction::TenEleven => pb_core::EDGE_DOUBLE_10_11,
        };
        Self {
            slope: pb_core::TC_SLOPE,
            baseline_edge: edge,
            num_decks: rules.num_decks,
        }
    }

    /// Player advantage at a true count, deck-adjusted. Negative means the
    /// house still has the edge.
    pub fn advantage(&self, true_count: TrueCount) -> f64 {
        let raw = true_count * self.slope - self.baseline_edge;
        // Fewer decks make each count point slightly more informative.
        let deck_factor = 6.0 / self.num_decks as f64;
        raw * (1.0 + (deck_factor - 1.0) * 0.1)
    }

    /// Expected value of a wager at a true count.
    pub fn expected_value(&self, true_count: TrueCount, bet: pb_core::Money) -> f64 {
        bet * self.advantage(true_count)
    }

    /// True count at which the player breaks even.
    pub fn breakeven(&self) -> TrueCount {
        self.baseline_edge / self.slope
    }

    pub fn baseline_edge(&self) -> f64 {
        self.baseline_edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn benchmark_edge() {
        let model = AdvantageModel::from_rules(&GameRules::default());
        assert!(close(model.baseline_edge(), 0.004));
    }

    #[test]
    fn h17_and_no_surrender_stack() {
        let rules = GameRules {
            dealer_stands_soft_17: false,
            surrender_allowed: false,
            ..GameRules::default()
        };
        let model = AdvantageModel::from_rules(&rules);
        assert!(close(model.baseline_edge(), 0.004 + 0.0022 + 0.0008));
    }

    #[test]
    fn short_payout_is_punitive() {
        let rules = GameRules {
            blackjack_payout: 1.2,
            ..GameRules::default()
        };
        let model = AdvantageModel::from_rules(&rules);
        assert!(close(model.baseline_edge(), 0.004 + 0.0139));
        // even +2 TC is still a losing game at 6:5
        assert!(model.advantage(2.0) < 0.0);
    }

    #[test]
    fn double_restrictions_add_edge() {
        let rules = GameRules {
            double_restriction: DoubleRestriction::TenEleven,
            ..GameRules::default()
        };
        assert!(close(
            AdvantageModel::from_rules(&rules).baseline_edge(),
            0.004 + 0.0018
        ));
    }

    #[test]
    fn advantage_is_linear_in_count() {
        let model = AdvantageModel::from_rules(&GameRules::default());
        // six decks: deck factor is neutral
        assert!(close(model.advantage(0.0), -0.004));
        assert!(close(model.advantage(2.0), 2.0 * 0.005 - 0.004));
        assert!(model.advantage(1.0) > 0.0);
    }

    #[test]
    fn fewer_decks_amplify() {
        let two = GameRules {
            num_decks: 2,
            ..GameRules::default()
        };
        let six = AdvantageModel::from_rules(&GameRules::default());
        let two = AdvantageModel::from_rules(&two);
        assert!(two.advantage(3.0) > six.advantage(3.0));
    }

    #[test]
    fn breakeven_count() {
        let model = AdvantageModel::from_rules(&GameRules::default());
        assert!(close(model.breakeven(), 0.004 / 0.005));
        assert!(close(model.advantage(model.breakeven()), 0.0));
    }

    #[test]
    fn expected_value_scales_with_bet() {
        let model = AdvantageModel::from_rules(&GameRules::default());
        let ev = model.expected_value(3.0, 100.0);
        assert!(close(ev, 100.0 * model.advantage(3.0)));
    }
}
