use pb_core::TrueCount;
use pb_count::CountSnapshot;

/// The Wong-out advisory: leave the table when the count has gone sour.
///
/// Advisory data attached to successful responses, never an error; callers
/// who keep playing get correct (if ill-advised) answers.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitSignal {
    pub should_exit: bool,
    pub reason: Option<String>,
}

impl ExitSignal {
    /// Evaluates the exit predicate: true count below the threshold, with
    /// at least one hand already played this shoe for cover.
    pub fn evaluate(snapshot: &CountSnapshot, hands_this_shoe: u32, threshold: TrueCount) -> Self {
        if hands_this_shoe > 0 && snapshot.true_count < threshold {
            Self {
                should_exit: true,
                reason: Some(format!(
                    "true count {:+.1} below wong-out threshold {:+.1}",
                    snapshot.true_count, threshold
                )),
            }
        } else {
            Self {
                should_exit: false,
                reason: None,
            }
        }
    }

    pub fn stay() -> Self {
        Self {
            should_exit: false,
            reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(tc: f64) -> CountSnapshot {
        CountSnapshot {
            running_count: 0,
            true_count: tc,
            decks_remaining: 4.0,
            penetration: 0.3,
            cards_dealt: 100,
        }
    }

    #[test]
    fn raises_below_threshold_with_cover() {
        let signal = ExitSignal::evaluate(&at(-1.6), 3, -1.0);
        assert!(signal.should_exit);
        let reason = signal.reason.unwrap();
        assert!(reason.contains("-1.6"));
        assert!(reason.contains("-1.0"));
    }

    #[test]
    fn silent_without_cover() {
        let signal = ExitSignal::evaluate(&at(-3.0), 0, -1.0);
        assert!(!signal.should_exit);
        assert!(signal.reason.is_none());
    }

    #[test]
    fn silent_at_threshold() {
        assert!(!ExitSignal::evaluate(&at(-1.0), 5, -1.0).should_exit);
        assert!(!ExitSignal::evaluate(&at(0.5), 5, -1.0).should_exit);
    }

    #[test]
    fn monotone_in_true_count() {
        // once raised, lowering the count never clears it
        let mut previous = false;
        for tc in [0.0, -0.5, -1.01, -2.0, -4.0] {
            let raised = ExitSignal::evaluate(&at(tc), 1, -1.0).should_exit;
            assert!(raised >= previous);
            previous = raised;
        }
    }
}
