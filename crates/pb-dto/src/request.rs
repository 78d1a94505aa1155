use pb_betting::BetConfig;
use pb_core::GameRules;
use pb_core::Money;
use serde::Deserialize;
use serde::Serialize;

/// Session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The engine deals from its own virtual shoe and grades the caller's
    /// play. Training mode.
    Auto,
    /// The caller relays cards observed at a real table and queries for
    /// decisions and bets. Shadow mode.
    Manual,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Session creation, handled by the lobby rather than a session actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSession {
    pub mode: Mode,
    pub bankroll: Money,
    #[serde(default)]
    pub rules: Option<GameRules>,
    #[serde(default)]
    pub betting: Option<BetConfig>,
    /// RNG seed for reproducible auto-mode dealing. Generated when absent
    /// and echoed back in the response.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Operations on an existing session, processed strictly in arrival order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Terminate the session.
    End,
    /// Current mode, state, count and statistics.
    Status,
    /// Reset the count (and the virtual shoe in auto mode).
    Shuffle,
    /// Auto: open a new round from the virtual shoe.
    Deal,
    /// Auto: play the active hand.
    Action { action: String },
    /// Shadow: relay observed cards into the count.
    Observe { cards: Vec<String> },
    /// Shadow: optimal action for a hand seen at the table.
    QueryDecision {
        player_cards: Vec<String>,
        dealer_up: String,
    },
    /// Shadow: recommended wager for the next hand.
    QueryBet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_tag_by_op() {
        let json = serde_json::to_value(Request::Deal).unwrap();
        assert_eq!(json["op"], "deal");
        let json = serde_json::to_value(Request::QueryDecision {
            player_cards: vec!["Th".into(), "6d".into()],
            dealer_up: "7c".into(),
        })
        .unwrap();
        assert_eq!(json["op"], "query_decision");
        assert_eq!(json["dealer_up"], "7c");
    }

    #[test]
    fn start_session_defaults() {
        let req: StartSession =
            serde_json::from_str(r#"{"mode": "auto", "bankroll": 10000.0}"#).unwrap();
        assert_eq!(req.mode, Mode::Auto);
        assert!(req.rules.is_none());
        assert!(req.seed.is_none());
    }

    #[test]
    fn action_roundtrip() {
        let req = Request::Action {
            action: "hit".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(matches!(
            serde_json::from_str::<Request>(&json).unwrap(),
            Request::Action { .. }
        ));
    }
}
