use serde::{Deserialize, Serialize};

/// Dividend income received from one asset in one calendar year.
/// Unique per `(asset_id, year)`; deleted together with its asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    pub asset_id: i64,
    pub year: i32,
    pub amount: f64,
}
