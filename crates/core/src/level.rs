//! Discrete battery-severity classification.

use serde::{Deserialize, Serialize};

/// Percentage at or below which the battery is critical.
pub const PERCENT_CRITICAL: f64 = 2.0;
/// Percentage at or below which the battery is very low.
pub const PERCENT_VERY_LOW: f64 = 5.0;
/// Percentage at or below which the battery is low.
pub const PERCENT_LOW: f64 = 10.0;

/// Battery severity band, ordered from most comfortable to most severe so
/// that `Critical > Low` reads as "more severe than".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum PowerLevel {
    #[default]
    Ok,
    Low,
    VeryLow,
    Critical,
}

impl PowerLevel {
    /// Classify a percentage into a severity band.
    ///
    /// Boundaries are inclusive on the severe side: exactly 2.0 is critical,
    /// exactly 10.0 is low.
    pub fn classify(percentage: f64) -> Self {
        if percentage <= PERCENT_CRITICAL {
            PowerLevel::Critical
        } else if percentage <= PERCENT_VERY_LOW {
            PowerLevel::VeryLow
        } else if percentage <= PERCENT_LOW {
            PowerLevel::Low
        } else {
            PowerLevel::Ok
        }
    }

    /// String form used for the exported battery-level property.
    pub fn as_str(self) -> &'static str {
        match self {
            PowerLevel::Ok => "ok",
            PowerLevel::Low => "low",
            PowerLevel::VeryLow => "very_low",
            PowerLevel::Critical => "critical",
        }
    }
}
