use serde::{Deserialize, Serialize};

/// Which comparison window a performance calculation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timespan {
    /// Compare against the snapshot nearest to `today - days`.
    LastDays(i64),
    /// Compare against the asset's own cost basis.
    AllTime,
}

/// Which number a ranking sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceMetric {
    Percent,
    Absolute,
}

/// The result of comparing an asset's current value against a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceDelta {
    /// Relative change in percent.
    pub percent: f64,

    /// Absolute change in EUR.
    pub absolute: f64,
}

impl PerformanceDelta {
    pub fn metric(&self, metric: PerformanceMetric) -> f64 {
        match metric {
            PerformanceMetric::Percent => self.percent,
            PerformanceMetric::Absolute => self.absolute,
        }
    }
}

/// One row in a top/worst performers ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEntry {
    pub asset_id: i64,
    pub asset_name: String,
    pub delta: PerformanceDelta,
}
