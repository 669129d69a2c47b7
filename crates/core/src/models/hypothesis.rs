use serde::{Deserialize, Serialize};

use super::asset::AssetType;

/// Growth-rate and contribution configuration for one asset type.
///
/// Exactly one hypothesis exists per asset type: seeded with defaults when
/// the ledger is created, edited afterwards, never deleted. Rates are annual
/// percentages; contributions are fixed monthly amounts, one per portfolio
/// owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub asset_type: AssetType,

    /// Annual growth rate under the pessimistic scenario, in percent.
    /// Negative rates are valid (e.g., a crypto drawdown scenario).
    pub pessimistic_rate: f64,

    /// Annual growth rate under the average scenario, in percent.
    pub avg_rate: f64,

    /// Annual growth rate under the optimistic scenario, in percent.
    pub optimistic_rate: f64,

    /// Fixed monthly contribution from the first owner, in EUR.
    pub monthly_contribution_owner1: f64,

    /// Fixed monthly contribution from the second owner, in EUR.
    pub monthly_contribution_owner2: f64,
}

impl Hypothesis {
    pub fn new(asset_type: AssetType) -> Self {
        Self {
            asset_type,
            pessimistic_rate: 0.0,
            avg_rate: 0.0,
            optimistic_rate: 0.0,
            monthly_contribution_owner1: 0.0,
            monthly_contribution_owner2: 0.0,
        }
    }

    /// Combined monthly contribution across both owners.
    pub fn monthly_total(&self) -> f64 {
        self.monthly_contribution_owner1 + self.monthly_contribution_owner2
    }

    /// Default hypotheses, one per asset type.
    ///
    /// Rates mirror the historical seed data: savings accounts grow slowly
    /// but surely, stocks carry the household's recurring contributions,
    /// crypto spans a wide pessimistic/optimistic band.
    pub fn defaults() -> Vec<Hypothesis> {
        AssetType::ALL
            .iter()
            .map(|&asset_type| {
                let (pess, avg, opt) = match asset_type {
                    AssetType::SavingsAccount => (2.0, 3.0, 4.0),
                    AssetType::Stock => (3.0, 7.0, 12.0),
                    AssetType::Crypto => (-10.0, 10.0, 30.0),
                    _ => (0.0, 5.0, 20.0),
                };
                let (owner1, owner2) = match asset_type {
                    AssetType::Stock => (500.0, 200.0),
                    AssetType::Crypto => (500.0, 0.0),
                    _ => (0.0, 0.0),
                };
                Hypothesis {
                    asset_type,
                    pessimistic_rate: pess,
                    avg_rate: avg,
                    optimistic_rate: opt,
                    monthly_contribution_owner1: owner1,
                    monthly_contribution_owner2: owner2,
                }
            })
            .collect()
    }
}
