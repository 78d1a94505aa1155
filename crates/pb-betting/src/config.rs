use pb_core::Money;
use serde::Deserialize;
use serde::Serialize;

/// Betting and signalling knobs, all defaulted to the research-validated
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BetConfig {
    /// Fraction of full Kelly to bet (0.5 = half-Kelly).
    pub kelly_fraction: f64,
    pub table_min: Money,
    pub table_max: Money,
    /// Cap on the bet spread in table-minimum units.
    pub max_spread: f64,
    /// Ignore the count and always bet the table minimum.
    pub flat_betting: bool,
    /// Penetration beyond which bets fall back to table minimum.
    pub max_betting_penetration: f64,
    /// True count below which the exit signal raises.
    pub wong_out_threshold: f64,
    /// Extra true-count evidence demanded before strategy deviations fire.
    pub deviation_margin: f64,
}

impl Default for BetConfig {
    fn default() -> Self {
        Self {
            kelly_fraction: pb_core::KELLY_FRACTION,
            table_min: pb_core::TABLE_MIN,
            table_max: pb_core::TABLE_MAX,
            max_spread: pb_core::MAX_SPREAD,
            flat_betting: false,
            max_betting_penetration: pb_core::MAX_BETTING_PENETRATION,
            wong_out_threshold: pb_core::WONG_OUT_THRESHOLD,
            deviation_margin: pb_core::DEVIATION_MARGIN,
        }
    }
}

impl BetConfig {
    /// Rejects configurations that cannot size a bet sensibly.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.kelly_fraction > 0.0 && self.kelly_fraction <= 1.0) {
            return Err(format!("kelly_fraction out of (0,1]: {}", self.kelly_fraction));
        }
        if !(self.table_min > 0.0 && self.table_min <= self.table_max) {
            return Err(format!(
                "invalid table limits: {}..{}",
                self.table_min, self.table_max
            ));
        }
        if !(0.0..=1.0).contains(&self.max_betting_penetration) {
            return Err(format!(
                "max_betting_penetration out of [0,1]: {}",
                self.max_betting_penetration
            ));
        }
        if self.max_spread < 1.0 {
            return Err(format!("max_spread below 1: {}", self.max_spread));
        }
        if self.deviation_margin < 0.0 {
            return Err(format!("deviation_margin negative: {}", self.deviation_margin));
        }
        Ok(())
    }
}
