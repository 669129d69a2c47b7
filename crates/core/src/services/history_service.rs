use chrono::{Duration, NaiveDate};

use crate::models::asset::Asset;
use crate::models::performance::{
    PerformanceDelta, PerformanceEntry, PerformanceMetric, Timespan,
};
use crate::models::snapshot::{Snapshot, SnapshotPayload};

/// The historical reconstructor: resolves a lookback date to the nearest
/// prior snapshot and derives per-asset performance from the asset copies
/// embedded in it.
///
/// Pure read/compute — never mutates the snapshot log.
pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    /// The most recent snapshot dated on or before `target`, or `None`
    /// when the portfolio is younger than the lookback window.
    pub fn find_as_of<'a>(
        &self,
        snapshots: &'a [Snapshot],
        target: NaiveDate,
    ) -> Option<&'a Snapshot> {
        // Snapshots are kept ascending by date; the partition point is the
        // first snapshot strictly after the target.
        let idx = snapshots.partition_point(|s| s.date <= target);
        if idx == 0 {
            None
        } else {
            Some(&snapshots[idx - 1])
        }
    }

    /// Performance of one asset over a lookback window, against the
    /// snapshot nearest to `today - lookback_days`.
    ///
    /// Returns `None` when the comparison is undefined: no snapshot covers
    /// the window, the snapshot's payload doesn't parse, the asset is
    /// absent from it, or its historical value was zero. A previously
    /// zero-valued position is excluded rather than ranked as infinite
    /// gain.
    pub fn time_based_performance(
        &self,
        asset: &Asset,
        snapshots: &[Snapshot],
        today: NaiveDate,
        lookback_days: i64,
    ) -> Option<PerformanceDelta> {
        let payload = self.payload_as_of(snapshots, today, lookback_days)?;
        Self::delta_against(asset, &payload)
    }

    /// The parsed payload of the as-of snapshot for a lookback window.
    fn payload_as_of(
        &self,
        snapshots: &[Snapshot],
        today: NaiveDate,
        lookback_days: i64,
    ) -> Option<SnapshotPayload> {
        let target = today - Duration::days(lookback_days);
        self.find_as_of(snapshots, target)?.payload().ok()
    }

    /// Delta of one asset against its embedded copy in a parsed payload,
    /// matched by id. Zero historical value is undefined, not infinite.
    fn delta_against(asset: &Asset, payload: &SnapshotPayload) -> Option<PerformanceDelta> {
        let historical = payload.assets.iter().find(|a| a.id == asset.id)?;
        if historical.current_amount == 0.0 {
            return None;
        }
        let absolute = asset.current_amount - historical.current_amount;
        Some(PerformanceDelta {
            percent: absolute / historical.current_amount * 100.0,
            absolute,
        })
    }

    /// Performance over an arbitrary timespan. The all-time baseline is
    /// the asset's own cost basis, not a snapshot; zero cost basis is
    /// excluded for the same divide-by-zero reason.
    pub fn performance(
        &self,
        asset: &Asset,
        snapshots: &[Snapshot],
        today: NaiveDate,
        timespan: Timespan,
    ) -> Option<PerformanceDelta> {
        match timespan {
            Timespan::LastDays(days) => {
                self.time_based_performance(asset, snapshots, today, days)
            }
            Timespan::AllTime => {
                let percent = asset.all_time_performance()?;
                Some(PerformanceDelta {
                    percent,
                    absolute: asset.current_amount - asset.buying_amount,
                })
            }
        }
    }

    /// Best performers over the timespan, sorted descending by the chosen
    /// metric. Assets with an undefined comparison are excluded.
    pub fn top_performers(
        &self,
        assets: &[Asset],
        snapshots: &[Snapshot],
        today: NaiveDate,
        timespan: Timespan,
        metric: PerformanceMetric,
        n: usize,
    ) -> Vec<PerformanceEntry> {
        let mut entries = self.candidates(assets, snapshots, today, timespan);
        entries.sort_by(|a, b| {
            b.delta
                .metric(metric)
                .partial_cmp(&a.delta.metric(metric))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries.truncate(n);
        entries
    }

    /// Worst performers: the same candidate set, independently sorted
    /// ascending. The first entry is the single worst — not the Nth-best,
    /// and not simply the reversed tail of the top list.
    pub fn worst_performers(
        &self,
        assets: &[Asset],
        snapshots: &[Snapshot],
        today: NaiveDate,
        timespan: Timespan,
        metric: PerformanceMetric,
        n: usize,
    ) -> Vec<PerformanceEntry> {
        let mut entries = self.candidates(assets, snapshots, today, timespan);
        entries.sort_by(|a, b| {
            a.delta
                .metric(metric)
                .partial_cmp(&b.delta.metric(metric))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries.truncate(n);
        entries
    }

    /// Every asset with a defined comparison over the timespan.
    ///
    /// For a lookback ranking the as-of snapshot is resolved and its
    /// payload parsed once, then shared across all assets — not re-parsed
    /// per asset.
    fn candidates(
        &self,
        assets: &[Asset],
        snapshots: &[Snapshot],
        today: NaiveDate,
        timespan: Timespan,
    ) -> Vec<PerformanceEntry> {
        match timespan {
            Timespan::LastDays(days) => {
                let Some(payload) = self.payload_as_of(snapshots, today, days) else {
                    return Vec::new();
                };
                assets
                    .iter()
                    .filter_map(|asset| {
                        Self::delta_against(asset, &payload).map(|delta| PerformanceEntry {
                            asset_id: asset.id,
                            asset_name: asset.name.clone(),
                            delta,
                        })
                    })
                    .collect()
            }
            Timespan::AllTime => assets
                .iter()
                .filter_map(|asset| {
                    self.performance(asset, &[], today, Timespan::AllTime)
                        .map(|delta| PerformanceEntry {
                            asset_id: asset.id,
                            asset_name: asset.name.clone(),
                            delta,
                        })
                })
                .collect(),
        }
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
