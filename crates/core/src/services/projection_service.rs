use std::collections::BTreeMap;

use crate::models::asset::AssetType;
use crate::models::hypothesis::Hypothesis;
use crate::models::projection::{ProjectionYear, ScenarioValues};

/// Annual growth applied to the contributions themselves: contributions are
/// not flat across the horizon, they compound at this fixed rate to model
/// wage inflation. Year `y` contributes `monthly_total * 12 * 1.01^y`.
/// The rate is a policy knob, applied uniformly across all scenarios and
/// asset types.
pub const CONTRIBUTION_GROWTH_RATE: f64 = 0.01;

/// The projection engine: simulates year-by-year compounding of per-type
/// totals under the three scenario hypotheses, with growing periodic
/// contributions.
///
/// Pure computation — reads current totals and hypotheses, produces derived
/// values, persists nothing.
pub struct ProjectionService;

impl ProjectionService {
    pub fn new() -> Self {
        Self
    }

    /// Simulate `years` of growth. Returns `years + 1` entries: year 0 is
    /// the current actual state, years 1..=N are simulated.
    ///
    /// Per year and per asset type that has both a current total and a
    /// configured hypothesis:
    ///
    /// ```text
    /// value = value * (1 + rate/100) + monthly_total * 12 * 1.01^year
    /// ```
    ///
    /// A type present in the totals but lacking a hypothesis is frozen: its
    /// running value carries forward unchanged (no growth, no
    /// contribution), it is never zeroed. Negative rates compound normally,
    /// including past zero — values are not floored.
    ///
    /// Running values and totals are rounded to 2 decimal places once per
    /// year, and the rounded values are what carries into the next year.
    /// Rounding error can therefore compound slightly over long horizons;
    /// that is an accepted approximation.
    pub fn simulate(
        &self,
        totals_by_type: &BTreeMap<AssetType, f64>,
        hypotheses: &[Hypothesis],
        years: u32,
    ) -> Vec<ProjectionYear> {
        let hypothesis_by_type: BTreeMap<AssetType, &Hypothesis> = hypotheses
            .iter()
            .map(|h| (h.asset_type, h))
            .collect();

        let mut running: BTreeMap<AssetType, ScenarioValues> = totals_by_type
            .iter()
            .map(|(&asset_type, &total)| (asset_type, ScenarioValues::splat(total)))
            .collect();

        let mut results = Vec::with_capacity(years as usize + 1);

        // Year 0 is the current state, exactly — no growth, no rounding.
        let current_total: f64 = totals_by_type.values().sum();
        results.push(ProjectionYear {
            year: 0,
            pessimistic: current_total,
            average: current_total,
            optimistic: current_total,
            breakdown: running.clone(),
        });

        for year in 1..=years {
            for (asset_type, values) in running.iter_mut() {
                let Some(hypothesis) = hypothesis_by_type.get(asset_type) else {
                    // No hypothesis: frozen, carries forward unchanged.
                    continue;
                };

                let contribution = hypothesis.monthly_total()
                    * 12.0
                    * (1.0 + CONTRIBUTION_GROWTH_RATE).powi(year as i32);

                values.pessimistic = round2(
                    values.pessimistic * (1.0 + hypothesis.pessimistic_rate / 100.0) + contribution,
                );
                values.average = round2(
                    values.average * (1.0 + hypothesis.avg_rate / 100.0) + contribution,
                );
                values.optimistic = round2(
                    values.optimistic * (1.0 + hypothesis.optimistic_rate / 100.0) + contribution,
                );
            }

            let mut totals = ScenarioValues::default();
            for values in running.values() {
                totals.pessimistic += values.pessimistic;
                totals.average += values.average;
                totals.optimistic += values.optimistic;
            }

            results.push(ProjectionYear {
                year,
                pessimistic: round2(totals.pessimistic),
                average: round2(totals.average),
                optimistic: round2(totals.optimistic),
                breakdown: running.clone(),
            });
        }

        results
    }
}

impl Default for ProjectionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
