use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::asset::Asset;
use crate::models::snapshot::{
    AssetHistoryPoint, HistoryPoint, Snapshot, SnapshotPayload, PAYLOAD_VERSION,
};
use crate::services::ledger_service::LedgerService;

/// The snapshot store: daily captures of portfolio state, paginated reads,
/// and per-asset history reconstructed from the stored payloads.
///
/// Capture is a read-then-write upsert keyed by calendar date. There is no
/// locking: two concurrent captures for the same date race on
/// last-write-wins, which is acceptable for a store written at most a few
/// times a day by a human or a single scheduler.
pub struct SnapshotService {
    ledger_service: LedgerService,
}

impl SnapshotService {
    pub fn new() -> Self {
        Self {
            ledger_service: LedgerService::new(),
        }
    }

    /// Capture the supplied assets as the snapshot for `as_of`.
    ///
    /// Computes the total and the by-type/by-who/by-geo groupings, embeds a
    /// copy of the full asset list in the payload, and upserts: if a
    /// snapshot already exists for that date its total and payload are
    /// overwritten in place, otherwise a new row is inserted at the sorted
    /// position. Capturing twice with an unchanged ledger stores
    /// byte-identical content.
    pub fn capture(
        &self,
        snapshots: &mut Vec<Snapshot>,
        as_of: NaiveDate,
        assets: &[Asset],
    ) -> Result<Snapshot, CoreError> {
        let total_value = self.ledger_service.total_current_value(assets);

        let payload = SnapshotPayload {
            version: PAYLOAD_VERSION,
            assets: assets.to_vec(),
            by_type: self.ledger_service.totals_by_type(assets),
            by_who: self.ledger_service.totals_by_who(assets),
            by_geo: self.ledger_service.totals_by_geo(assets),
        };
        let data_json = serde_json::to_string(&payload)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot payload: {e}")))?;

        let snapshot = Snapshot {
            date: as_of,
            total_value,
            data_json,
        };

        // Upsert by date into the ascending-sorted vec, O(log n) lookup.
        match snapshots.binary_search_by_key(&as_of, |s| s.date) {
            Ok(idx) => snapshots[idx] = snapshot.clone(),
            Err(idx) => snapshots.insert(idx, snapshot.clone()),
        }

        Ok(snapshot)
    }

    /// Paginated read, newest first. Rows are returned as stored — no
    /// payload parsing, no transformation.
    pub fn query<'a>(
        &self,
        snapshots: &'a [Snapshot],
        limit: usize,
        offset: usize,
    ) -> Vec<&'a Snapshot> {
        snapshots.iter().rev().skip(offset).take(limit).collect()
    }

    /// Reconstruct one asset's history from the snapshot log, oldest first.
    ///
    /// Each snapshot's payload is parsed independently; a payload that
    /// fails to parse, or that doesn't contain the asset (by id, then by
    /// name), is silently skipped. The result may therefore have
    /// non-uniform date spacing — no gap filling is attempted.
    pub fn asset_history(
        &self,
        snapshots: &[Snapshot],
        asset_id: i64,
        asset_name: &str,
    ) -> Vec<AssetHistoryPoint> {
        let mut history = Vec::new();

        for snapshot in snapshots {
            let payload = match snapshot.payload() {
                Ok(p) => p,
                Err(_) => continue,
            };
            if let Some(asset) = payload.find_asset(asset_id, asset_name) {
                history.push(AssetHistoryPoint {
                    date: snapshot.date,
                    value: asset.current_value,
                    quantity: asset.quantity,
                    amount: asset.current_amount,
                });
            }
        }

        history
    }

    /// Whole-portfolio history series for charting, oldest first.
    ///
    /// A snapshot whose payload fails to parse still contributes its stored
    /// total, just with an empty per-type breakdown.
    pub fn history_series(&self, snapshots: &[Snapshot]) -> Vec<HistoryPoint> {
        snapshots
            .iter()
            .map(|snapshot| HistoryPoint {
                date: snapshot.date,
                total_value: snapshot.total_value,
                by_type: snapshot.payload().map(|p| p.by_type).unwrap_or_default(),
            })
            .collect()
    }
}

impl Default for SnapshotService {
    fn default() -> Self {
        Self::new()
    }
}
