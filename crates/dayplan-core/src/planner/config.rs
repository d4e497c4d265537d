//! Injected planner configuration: rating weights and the display band.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::task::{MAX_RATING, MIN_RATING};

/// Weight returned for ratings outside `1..=3`.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Weight lookup for ratings 1, 2 and 3 (index = rating - 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable([f64; 3]);

impl WeightTable {
    pub const fn new(weights: [f64; 3]) -> Self {
        Self(weights)
    }

    /// Default difficulty weights: harder work gets more time.
    pub const fn difficulty() -> Self {
        Self([1.0, 1.2, 1.4])
    }

    /// Default importance weights.
    pub const fn importance() -> Self {
        Self([0.9, 1.0, 1.2])
    }

    /// Weight for `rating`, or [`DEFAULT_WEIGHT`] if it is out of range.
    pub fn weight(&self, rating: u8) -> f64 {
        if (MIN_RATING..=MAX_RATING).contains(&rating) {
            self.0[usize::from(rating - MIN_RATING)]
        } else {
            DEFAULT_WEIGHT
        }
    }

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        for w in self.0 {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("weights must be finite and >= 0, got {w}"),
                });
            }
        }
        Ok(())
    }
}

/// Heuristic "could take somewhat more or less" band around allocated minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayBand {
    pub low: f64,
    pub high: f64,
}

impl DisplayBand {
    /// `[round(low * minutes), round(high * minutes)]`
    pub fn range(&self, minutes: u32) -> (u32, u32) {
        let m = f64::from(minutes);
        let clamp = |v: i64| v.clamp(0, i64::from(u32::MAX)) as u32;
        (
            clamp(super::round_minutes(self.low * m)),
            clamp(super::round_minutes(self.high * m)),
        )
    }
}

impl Default for DisplayBand {
    fn default() -> Self {
        Self { low: 0.8, high: 1.2 }
    }
}

/// Planner section of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "WeightTable::difficulty")]
    pub difficulty_weights: WeightTable,
    #[serde(default = "WeightTable::importance")]
    pub importance_weights: WeightTable,
    #[serde(default = "default_band_low")]
    pub band_low: f64,
    #[serde(default = "default_band_high")]
    pub band_high: f64,
}

fn default_band_low() -> f64 {
    DisplayBand::default().low
}
fn default_band_high() -> f64 {
    DisplayBand::default().high
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            difficulty_weights: WeightTable::difficulty(),
            importance_weights: WeightTable::importance(),
            band_low: default_band_low(),
            band_high: default_band_high(),
        }
    }
}

impl PlannerConfig {
    pub fn band(&self) -> DisplayBand {
        DisplayBand {
            low: self.band_low,
            high: self.band_high,
        }
    }

    /// Check weights and band bounds.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.difficulty_weights
            .validate("planner.difficulty_weights")?;
        self.importance_weights
            .validate("planner.importance_weights")?;
        if !self.band_low.is_finite() || self.band_low < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "planner.band_low".into(),
                message: format!("must be finite and >= 0, got {}", self.band_low),
            });
        }
        if !self.band_high.is_finite() || self.band_high < self.band_low {
            return Err(ConfigError::InvalidValue {
                key: "planner.band_high".into(),
                message: format!(
                    "must be finite and >= band_low ({}), got {}",
                    self.band_low, self.band_high
                ),
            });
        }
        Ok(())
    }
}
