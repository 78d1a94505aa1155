use serde::Deserialize;
use serde::Serialize;

/// A player decision on a blackjack hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Stand,
    Hit,
    Double,
    Split,
    Surrender,
}

impl Action {
    /// Single-letter chart code.
    pub fn code(&self) -> char {
        match self {
            Action::Stand => 'S',
            Action::Hit => 'H',
            Action::Double => 'D',
            Action::Split => 'P',
            Action::Surrender => 'R',
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Stand => write!(f, "stand"),
            Action::Hit => write!(f, "hit"),
            Action::Double => write!(f, "double"),
            Action::Split => write!(f, "split"),
            Action::Surrender => write!(f, "surrender"),
        }
    }
}

/// str isomorphism; accepts full names or chart codes, case-insensitive
impl TryFrom<&str> for Action {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "stand" | "s" => Ok(Action::Stand),
            "hit" | "h" => Ok(Action::Hit),
            "double" | "d" => Ok(Action::Double),
            "split" | "p" => Ok(Action::Split),
            "surrender" | "r" => Ok(Action::Surrender),
            _ => Err(format!("invalid action: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_codes() {
        assert_eq!(Action::try_from("HIT").unwrap(), Action::Hit);
        assert_eq!(Action::try_from("s").unwrap(), Action::Stand);
        assert_eq!(Action::try_from("Surrender").unwrap(), Action::Surrender);
        assert!(Action::try_from("fold").is_err());
    }

    #[test]
    fn serde_snake_case() {
        assert_eq!(serde_json::to_string(&Action::Double).unwrap(), "\"double\"");
        assert_eq!(
            serde_json::from_str::<Action>("\"surrender\"").unwrap(),
            Action::Surrender
        );
    }
}
