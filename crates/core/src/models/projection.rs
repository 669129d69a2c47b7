use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::asset::AssetType;

/// The three growth scenarios a simulation runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    Pessimistic,
    Average,
    Optimistic,
}

/// One value per scenario — used both for per-type running values and for
/// aggregate yearly totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioValues {
    pub pessimistic: f64,
    pub average: f64,
    pub optimistic: f64,
}

impl ScenarioValues {
    /// Initialize all three scenarios to the same starting value.
    pub fn splat(value: f64) -> Self {
        Self {
            pessimistic: value,
            average: value,
            optimistic: value,
        }
    }

    pub fn get(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Pessimistic => self.pessimistic,
            Scenario::Average => self.average,
            Scenario::Optimistic => self.optimistic,
        }
    }
}

/// Simulated portfolio state for one year offset.
///
/// Derived, never persisted. `year` 0 carries the current actual totals
/// exactly; later years are simulated under each scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    /// Offset from today, 0..=N.
    pub year: u32,

    /// Aggregate total under the pessimistic scenario.
    pub pessimistic: f64,

    /// Aggregate total under the average scenario.
    pub average: f64,

    /// Aggregate total under the optimistic scenario.
    pub optimistic: f64,

    /// Per-type breakdown of the running values for this year.
    pub breakdown: BTreeMap<AssetType, ScenarioValues>,
}
