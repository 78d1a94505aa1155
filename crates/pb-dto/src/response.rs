use super::request::Mode;
use pb_core::Money;
use pb_count::CountSnapshot;
use pb_strategy::Action;
use serde::Deserialize;
use serde::Serialize;

/// How a resolved hand ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Win,
    Loss,
    Push,
    Bust,
    Blackjack,
    Surrender,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
            Self::Push => write!(f, "push"),
            Self::Bust => write!(f, "bust"),
            Self::Blackjack => write!(f, "blackjack"),
            Self::Surrender => write!(f, "surrender"),
        }
    }
}

/// Per-session tallies, reported in `Status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub hands_played: u64,
    pub wins: u64,
    pub losses: u64,
    pub pushes: u64,
    pub blackjacks: u64,
    pub surrenders: u64,
    pub busts: u64,
    pub total_wagered: Money,
    pub net_profit: Money,
}

impl Statistics {
    /// Folds one resolved hand into the tallies.
    pub fn record(&mut self, outcome: Outcome, wagered: Money, net: Money) {
        self.hands_played += 1;
        self.total_wagered += wagered;
        self.net_profit += net;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Push => self.pushes += 1,
            Outcome::Bust => {
                self.losses += 1;
                self.busts += 1;
            }
            Outcome::Blackjack => {
                self.wins += 1;
                self.blackjacks += 1;
            }
            Outcome::Surrender => {
                self.losses += 1;
                self.surrenders += 1;
            }
        }
    }
}

/// Per-operation success payloads, tagged for the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    /// Session created.
    Started {
        session_id: String,
        mode: Mode,
        bankroll: Money,
        /// RNG seed in use; replaying with it reproduces the shoe.
        seed: u64,
        status: String,
    },
    /// Session terminated.
    Ended,
    /// Session inspection.
    Status {
        mode: Mode,
        state: String,
        count_snapshot: CountSnapshot,
        bankroll: Money,
        hands_played: u64,
        statistics: Statistics,
        seed: u64,
    },
    /// Count (and virtual shoe) reset.
    Shuffled { count_snapshot: CountSnapshot },
    /// A fresh round in auto mode.
    Dealt {
        player_cards: Vec<String>,
        player_total: u8,
        dealer_up: String,
        is_blackjack: bool,
        count_snapshot: CountSnapshot,
        recommended_bet: Money,
        should_exit: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        exit_reason: Option<String>,
    },
    /// The result of playing the active hand in auto mode.
    Acted {
        action_taken: Action,
        /// What the engine would have played, graded before the action.
        correct_action: Action,
        is_correct: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        deviation: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new_card: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new_total: Option<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome: Option<Outcome>,
        #[serde(skip_serializing_if = "Option::is_none")]
        dealer_total: Option<u8>,
        /// True once every hand of the round is settled.
        round_over: bool,
        should_exit: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        exit_reason: Option<String>,
        count_snapshot: CountSnapshot,
    },
    /// Cards relayed into the count in shadow mode.
    Observed {
        count_snapshot: CountSnapshot,
        recommended_bet: Money,
    },
    /// Shadow-mode decision query.
    Decided {
        recommended_action: Action,
        take_insurance: bool,
        count_snapshot: CountSnapshot,
        recommended_bet: Money,
        should_exit: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        exit_reason: Option<String>,
    },
    /// Shadow-mode bet query.
    Bet {
        recommended_bet: Money,
        count_snapshot: CountSnapshot,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_tag_by_type() {
        let reply = Reply::Shuffled {
            count_snapshot: CountSnapshot::fresh(6),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["type"], "shuffled");
        assert_eq!(json["count_snapshot"]["running_count"], 0);
    }

    #[test]
    fn optional_fields_omitted() {
        let reply = Reply::Acted {
            action_taken: Action::Stand,
            correct_action: Action::Stand,
            is_correct: true,
            deviation: None,
            new_card: None,
            new_total: None,
            outcome: Some(Outcome::Win),
            dealer_total: Some(19),
            round_over: true,
            should_exit: false,
            exit_reason: None,
            count_snapshot: CountSnapshot::fresh(6),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert!(json.get("new_card").is_none());
        assert_eq!(json["outcome"], "WIN");
    }

    #[test]
    fn statistics_tally() {
        let mut stats = Statistics::default();
        stats.record(Outcome::Blackjack, 15.0, 22.5);
        stats.record(Outcome::Bust, 15.0, -15.0);
        stats.record(Outcome::Push, 15.0, 0.0);
        assert_eq!(stats.hands_played, 3);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.blackjacks, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.busts, 1);
        assert_eq!(stats.pushes, 1);
        assert_eq!(stats.total_wagered, 45.0);
        assert_eq!(stats.net_profit, 7.5);
    }

    #[test]
    fn outcome_wire_form() {
        assert_eq!(
            serde_json::to_string(&Outcome::Surrender).unwrap(),
            "\"SURRENDER\""
        );
    }
}
