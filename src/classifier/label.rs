use serde::{Deserialize, Serialize};
use std::fmt;

/// The calorie tier assigned to a dish name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalorieLabel {
    LowCalorie,
    AverageCalorie,
    HighCalorie,
}

impl CalorieLabel {
    /// Stable textual form, usable directly as a styling hook downstream.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowCalorie => "low-calorie",
            Self::AverageCalorie => "average-calorie",
            Self::HighCalorie => "high-calorie",
        }
    }
}

impl fmt::Display for CalorieLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a `[low, average, high]` confidence triple to a single label.
///
/// The checks run in the fixed order low → average → high against the
/// maximum, so an exact tie at the maximum resolves to the earliest class:
/// a three-way tie gives `LowCalorie`, an average/high tie gives
/// `AverageCalorie`. Any finite triple produces a label.
pub(crate) fn resolve(confidences: [f32; 3]) -> CalorieLabel {
    let [low, average, high] = confidences;
    let max = low.max(average).max(high);

    if low == max {
        CalorieLabel::LowCalorie
    } else if average == max {
        CalorieLabel::AverageCalorie
    } else {
        CalorieLabel::HighCalorie
    }
}
