use super::advantage::AdvantageModel;
use super::config::BetConfig;
use super::exit::ExitSignal;
use super::kelly::Kelly;
use super::kelly::Limits;
use pb_core::GameRules;
use pb_core::Money;
use pb_core::TrueCount;
use pb_count::CountSnapshot;

/// Maps a count snapshot and bankroll to the wager for the next hand.
///
/// Order of application mirrors the sizing discipline: affordability,
/// flat-bet override, the deep-penetration defensive cutoff, then
/// advantage → Kelly → spread cap → bankroll → table limits.
#[derive(Debug, Clone, PartialEq)]
pub struct BetEngine {
    config: BetConfig,
    model: AdvantageModel,
    kelly: Kelly,
    limits: Limits,
}

impl BetEngine {
    pub fn new(config: BetConfig, rules: &GameRules) -> Self {
        Self {
            model: AdvantageModel::from_rules(rules),
            kelly: Kelly::new(config.kelly_fraction),
            limits: Limits {
                table_min: config.table_min,
                table_max: config.table_max,
            },
            config,
        }
    }

    /// The recommended wager for the next hand.
    pub fn recommend(&self, snapshot: &CountSnapshot, bankroll: Money) -> Money {
        if bankroll < self.limits.table_min {
            return 0.0;
        }
        if self.config.flat_betting {
            return self.limits.table_min;
        }
        // Hi-Lo's linear model degrades badly in a deep shoe; stop trusting
        // it past the configured penetration.
        if snapshot.penetration > self.config.max_betting_penetration {
            return self.limits.table_min;
        }
        let advantage = self.model.advantage(snapshot.true_count);
        let bet = self.kelly.bet_amount(advantage, bankroll, self.limits);
        let bet = bet.min(self.limits.table_min * self.config.max_spread);
        let bet = bet.min(bankroll).max(self.limits.table_min);
        round_to_cents(bet)
    }

    /// Exit advisory for the current shoe.
    pub fn exit_signal(&self, snapshot: &CountSnapshot, hands_this_shoe: u32) -> ExitSignal {
        ExitSignal::evaluate(snapshot, hands_this_shoe, self.config.wong_out_threshold)
    }

    /// Player advantage at a true count.
    pub fn advantage(&self, true_count: TrueCount) -> f64 {
        self.model.advantage(true_count)
    }

    /// Expected value of a wager at a true count.
    pub fn expected_value(&self, true_count: TrueCount, bet: Money) -> f64 {
        self.model.expected_value(true_count, bet)
    }

    /// True count at which the player breaks even.
    pub fn breakeven(&self) -> TrueCount {
        self.model.breakeven()
    }

    pub fn config(&self) -> &BetConfig {
        &self.config
    }
}

fn round_to_cents(bet: Money) -> Money {
    (bet * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tc: f64, penetration: f64) -> CountSnapshot {
        CountSnapshot {
            running_count: 0,
            true_count: tc,
            decks_remaining: 6.0 * (1.0 - penetration),
            penetration,
            cards_dealt: (312.0 * penetration) as u32,
        }
    }
    fn engine() -> BetEngine {
        BetEngine::new(BetConfig::default(), &GameRules::default())
    }

    #[test]
    fn negative_advantage_bets_minimum() {
        let engine = engine();
        assert_eq!(engine.recommend(&snap(0.0, 0.2), 10_000.0), 15.0);
        assert_eq!(engine.recommend(&snap(-3.0, 0.2), 10_000.0), 15.0);
    }

    #[test]
    fn positive_count_scales_bet() {
        let engine = engine();
        let low = engine.recommend(&snap(2.0, 0.2), 10_000.0);
        let high = engine.recommend(&snap(4.0, 0.2), 10_000.0);
        assert!(low > 15.0);
        assert!(high > low);
    }

    #[test]
    fn bet_always_within_limits() {
        let engine = engine();
        for tc in [-5.0, -1.0, 0.0, 1.0, 3.0, 7.0, 15.0] {
            let bet = engine.recommend(&snap(tc, 0.3), 50_000.0);
            assert!(bet >= 15.0);
            assert!(bet <= 500.0);
        }
    }

    #[test]
    fn defensive_cutoff_forces_minimum() {
        let engine = engine();
        // penetration 266/312 ≈ 0.853 crosses the 0.85 threshold
        let snapshot = CountSnapshot {
            running_count: 18,
            true_count: 12.0,
            decks_remaining: 46.0 / 52.0,
            penetration: 266.0 / 312.0,
            cards_dealt: 266,
        };
        assert_eq!(engine.recommend(&snapshot, 10_000.0), 15.0);
    }

    #[test]
    fn spread_cap_holds() {
        let engine = engine();
        // enormous count: raw Kelly would exceed 12 units of 15
        let bet = engine.recommend(&snap(20.0, 0.2), 1_000_000.0);
        assert!(bet <= 15.0 * 12.0);
    }

    #[test]
    fn flat_betting_ignores_count() {
        let config = BetConfig {
            flat_betting: true,
            ..BetConfig::default()
        };
        let engine = BetEngine::new(config, &GameRules::default());
        assert_eq!(engine.recommend(&snap(6.0, 0.2), 10_000.0), 15.0);
    }

    #[test]
    fn broke_players_bet_nothing() {
        let engine = engine();
        assert_eq!(engine.recommend(&snap(3.0, 0.2), 10.0), 0.0);
    }

    #[test]
    fn bet_rounds_to_cents() {
        let engine = engine();
        let bet = engine.recommend(&snap(2.37, 0.2), 9_871.33);
        assert_eq!(bet, (bet * 100.0).round() / 100.0);
    }

    #[test]
    fn exit_signal_passthrough() {
        let engine = engine();
        assert!(engine.exit_signal(&snap(-1.6, 0.3), 2).should_exit);
        assert!(!engine.exit_signal(&snap(-1.6, 0.3), 0).should_exit);
    }

    #[test]
    fn breakeven_near_plus_one() {
        let engine = engine();
        assert!((engine.breakeven() - 0.8).abs() < 1e-9);
    }
}
