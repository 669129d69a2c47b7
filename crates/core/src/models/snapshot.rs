use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;

use super::asset::{Asset, AssetType, Geo};

/// Current snapshot payload schema version.
pub const PAYLOAD_VERSION: u32 = 1;

fn default_payload_version() -> u32 {
    PAYLOAD_VERSION
}

/// One point-in-time capture of the whole portfolio.
///
/// At most one snapshot exists per calendar date; a second capture on the
/// same date replaces the first in place. The payload is stored as an opaque
/// JSON string so that history reconstruction is immune to later mutation or
/// deletion of the live ledger — it embeds a *copy* of every asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Calendar date of the capture — the natural key.
    pub date: NaiveDate,

    /// Total portfolio value at capture time, in EUR.
    pub total_value: f64,

    /// Serialized `SnapshotPayload`. Treated as opaque by the store;
    /// readers parse it per snapshot and skip entries that fail.
    pub data_json: String,
}

impl Snapshot {
    /// Parse the embedded payload. Callers that iterate many snapshots
    /// should treat an `Err` as "skip this date", never as fatal.
    pub fn payload(&self) -> Result<SnapshotPayload, CoreError> {
        Ok(serde_json::from_str(&self.data_json)?)
    }
}

/// The structured content behind `Snapshot::data_json`.
///
/// Wire keys `assets`, `by_type`, `by_who` and `by_geo` are a compatibility
/// contract with previously stored snapshots and must not change. Grouped
/// totals use `BTreeMap` so serialization is deterministic: capturing twice
/// with an unchanged ledger produces byte-identical JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPayload {
    /// Schema version tag. Absent in payloads written before versioning
    /// was introduced; those parse as the current version.
    #[serde(default = "default_payload_version")]
    pub version: u32,

    /// Full copy of the asset list as of capture time.
    pub assets: Vec<Asset>,

    /// Total current value grouped by asset type.
    pub by_type: BTreeMap<AssetType, f64>,

    /// Total current value grouped by owner.
    pub by_who: BTreeMap<String, f64>,

    /// Total current value grouped by geography. Assets without a
    /// geography are not counted here at all.
    pub by_geo: BTreeMap<Geo, f64>,
}

impl SnapshotPayload {
    /// Two-stage historical lookup: id first, then name.
    ///
    /// Asset ids are not guaranteed stable across very old snapshots that
    /// predate the current ledger's id space, so a name match is accepted
    /// as a fallback.
    pub fn find_asset(&self, asset_id: i64, asset_name: &str) -> Option<&Asset> {
        self.assets
            .iter()
            .find(|a| a.id == asset_id)
            .or_else(|| self.assets.iter().find(|a| a.name == asset_name))
    }
}

/// One point in a single asset's reconstructed history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHistoryPoint {
    pub date: NaiveDate,

    /// Unit price at that date.
    pub value: f64,

    pub quantity: f64,

    /// Total position value at that date.
    pub amount: f64,
}

/// One point in the whole-portfolio history series, for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,

    pub total_value: f64,

    /// Per-type breakdown. Empty when the snapshot's payload could not be
    /// parsed — the stored total is still usable on its own.
    pub by_type: BTreeMap<AssetType, f64>,
}
