use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::dividend::Dividend;
use super::hypothesis::Hypothesis;
use super::settings::Settings;
use super::snapshot::Snapshot;

/// The main data container. Everything in here gets serialized, encrypted,
/// and saved to the portable .nwtk file.
///
/// Contains the live asset ledger, the per-type growth hypotheses, the
/// daily snapshot log, dividend records and user settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    /// Current holdings — the authoritative live state.
    pub assets: Vec<Asset>,

    /// Exactly one hypothesis per asset type, seeded at creation.
    pub hypotheses: Vec<Hypothesis>,

    /// Daily captures, kept sorted ascending by date. At most one per date.
    pub snapshots: Vec<Snapshot>,

    /// Dividend records, unique per (asset_id, year).
    #[serde(default)]
    pub dividends: Vec<Dividend>,

    pub settings: Settings,

    /// Next asset id to hand out. Ids are never reused after deletion so
    /// snapshots can keep referring to them.
    pub next_asset_id: i64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            hypotheses: Hypothesis::defaults(),
            snapshots: Vec::new(),
            dividends: Vec::new(),
            settings: Settings::default(),
            next_asset_id: 1,
        }
    }
}
