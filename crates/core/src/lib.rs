pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use std::collections::BTreeMap;

use models::{
    asset::{Asset, AssetType, Geo},
    dividend::Dividend,
    hypothesis::Hypothesis,
    ledger::Ledger,
    performance::{PerformanceDelta, PerformanceEntry, PerformanceMetric, Timespan},
    projection::ProjectionYear,
    settings::Settings,
    snapshot::{AssetHistoryPoint, HistoryPoint, Snapshot},
};
use providers::traits::{FxConverter, QuoteProvider};
use services::{
    history_service::HistoryService, ledger_service::LedgerService,
    projection_service::ProjectionService, refresh_service::RefreshService,
    snapshot_service::SnapshotService,
};
use storage::manager::StorageManager;

use errors::CoreError;

/// Main entry point for the net-worth tracker core library.
/// Holds the ledger state and all services needed to operate on it.
#[must_use]
pub struct NetWorthTracker {
    ledger: Ledger,
    ledger_service: LedgerService,
    snapshot_service: SnapshotService,
    history_service: HistoryService,
    projection_service: ProjectionService,
    refresh_service: RefreshService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for NetWorthTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetWorthTracker")
            .field("assets", &self.ledger.assets.len())
            .field("snapshots", &self.ledger.snapshots.len())
            .field("settings", &self.ledger.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl NetWorthTracker {
    /// Create a brand new empty ledger with default settings and the
    /// default hypothesis per asset type.
    pub fn create_new() -> Self {
        Self::build(Ledger::default())
    }

    /// Load an existing ledger from encrypted bytes (password required).
    /// Use this for WASM / Tauri where the frontend handles file I/O.
    pub fn load_from_bytes(encrypted: &[u8], password: &str) -> Result<Self, CoreError> {
        let ledger = StorageManager::load_from_bytes(encrypted, password)?;
        Ok(Self::build(ledger))
    }

    /// Save the current ledger to encrypted bytes.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.ledger, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from an encrypted file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Self, CoreError> {
        let ledger = StorageManager::load_from_file(path, password)?;
        Ok(Self::build(ledger))
    }

    /// Save to an encrypted file on disk (native only, not WASM).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str, password: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.ledger, path, password)?;
        self.dirty = false;
        Ok(())
    }

    // ── Asset Ledger ────────────────────────────────────────────────

    /// Add an asset. The ledger assigns and returns the id.
    pub fn add_asset(&mut self, asset: Asset) -> Result<i64, CoreError> {
        let id = self.ledger_service.add_asset(&mut self.ledger, asset)?;
        self.dirty = true;
        Ok(id)
    }

    /// Replace an existing asset, matched by id.
    pub fn update_asset(&mut self, asset: Asset) -> Result<(), CoreError> {
        self.ledger_service.update_asset(&mut self.ledger, asset)?;
        self.dirty = true;
        Ok(())
    }

    /// Delete an asset and its dividend records. Returns the removed asset.
    pub fn remove_asset(&mut self, asset_id: i64) -> Result<Asset, CoreError> {
        let removed = self.ledger_service.remove_asset(&mut self.ledger, asset_id)?;
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn get_asset(&self, asset_id: i64) -> Option<&Asset> {
        self.ledger_service.get_asset(&self.ledger, asset_id)
    }

    #[must_use]
    pub fn get_assets(&self) -> &[Asset] {
        &self.ledger.assets
    }

    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.ledger.assets.len()
    }

    // ── Dividends ───────────────────────────────────────────────────

    /// Record dividend income for an asset and year (upsert).
    pub fn set_dividend(&mut self, asset_id: i64, year: i32, amount: f64) -> Result<(), CoreError> {
        self.ledger_service
            .set_dividend(&mut self.ledger, asset_id, year, amount)?;
        self.dirty = true;
        Ok(())
    }

    /// Dividend records for one asset, sorted by year.
    #[must_use]
    pub fn get_dividends(&self, asset_id: i64) -> Vec<&Dividend> {
        self.ledger_service.dividends_for(&self.ledger, asset_id)
    }

    /// Expected annual dividend income across all holdings
    /// (`Σ quantity × dividend_per_share`).
    #[must_use]
    pub fn total_annual_dividends(&self) -> f64 {
        self.ledger_service.total_annual_dividends(&self.ledger.assets)
    }

    // ── Hypotheses ──────────────────────────────────────────────────

    /// The hypothesis configured for an asset type. Every type is seeded
    /// at creation, so this only fails for a ledger with tampered state.
    pub fn get_hypothesis(&self, asset_type: AssetType) -> Result<&Hypothesis, CoreError> {
        self.ledger
            .hypotheses
            .iter()
            .find(|h| h.asset_type == asset_type)
            .ok_or_else(|| CoreError::HypothesisNotFound(asset_type.to_string()))
    }

    #[must_use]
    pub fn get_hypotheses(&self) -> &[Hypothesis] {
        &self.ledger.hypotheses
    }

    /// Update the hypothesis for its asset type. Hypotheses are never
    /// created or deleted through this path — one exists per type.
    pub fn update_hypothesis(&mut self, hypothesis: Hypothesis) -> Result<(), CoreError> {
        let slot = self
            .ledger
            .hypotheses
            .iter_mut()
            .find(|h| h.asset_type == hypothesis.asset_type)
            .ok_or_else(|| CoreError::HypothesisNotFound(hypothesis.asset_type.to_string()))?;
        *slot = hypothesis;
        self.dirty = true;
        Ok(())
    }

    // ── Snapshots ───────────────────────────────────────────────────

    /// Capture today's snapshot of the current ledger state.
    ///
    /// Safe to invoke zero, one or many times a day — the store converges
    /// to one snapshot per date reflecting the latest capture.
    pub fn capture_snapshot(&mut self) -> Result<Snapshot, CoreError> {
        self.capture_snapshot_on(chrono::Utc::now().date_naive())
    }

    /// Capture a snapshot for an explicit date (upsert by date).
    pub fn capture_snapshot_on(&mut self, as_of: NaiveDate) -> Result<Snapshot, CoreError> {
        let snapshot =
            self.snapshot_service
                .capture(&mut self.ledger.snapshots, as_of, &self.ledger.assets)?;
        self.dirty = true;
        Ok(snapshot)
    }

    /// Paginated snapshot read, newest first.
    #[must_use]
    pub fn get_snapshots(&self, limit: usize, offset: usize) -> Vec<&Snapshot> {
        self.snapshot_service.query(&self.ledger.snapshots, limit, offset)
    }

    #[must_use]
    pub fn snapshot_count(&self) -> usize {
        self.ledger.snapshots.len()
    }

    /// One asset's reconstructed history, oldest first. Snapshots whose
    /// payload fails to parse are skipped silently.
    pub fn asset_history(&self, asset_id: i64) -> Result<Vec<AssetHistoryPoint>, CoreError> {
        let asset = self
            .get_asset(asset_id)
            .ok_or(CoreError::AssetNotFound(asset_id))?;
        Ok(self
            .snapshot_service
            .asset_history(&self.ledger.snapshots, asset_id, &asset.name))
    }

    /// Whole-portfolio history series for charting, oldest first.
    #[must_use]
    pub fn history_series(&self) -> Vec<HistoryPoint> {
        self.snapshot_service.history_series(&self.ledger.snapshots)
    }

    // ── Performance ─────────────────────────────────────────────────

    /// Performance of one asset over a timespan, or `None` when the
    /// comparison is undefined (no baseline, or a zero baseline).
    pub fn asset_performance(
        &self,
        asset_id: i64,
        timespan: Timespan,
    ) -> Result<Option<PerformanceDelta>, CoreError> {
        let asset = self
            .get_asset(asset_id)
            .ok_or(CoreError::AssetNotFound(asset_id))?;
        let today = chrono::Utc::now().date_naive();
        Ok(self
            .history_service
            .performance(asset, &self.ledger.snapshots, today, timespan))
    }

    /// Best performers over the timespan, descending by the chosen metric.
    #[must_use]
    pub fn top_performers(
        &self,
        timespan: Timespan,
        metric: PerformanceMetric,
        n: usize,
    ) -> Vec<PerformanceEntry> {
        let today = chrono::Utc::now().date_naive();
        self.history_service.top_performers(
            &self.ledger.assets,
            &self.ledger.snapshots,
            today,
            timespan,
            metric,
            n,
        )
    }

    /// Worst performers over the timespan, ascending by the chosen metric
    /// (first entry is the single worst).
    #[must_use]
    pub fn worst_performers(
        &self,
        timespan: Timespan,
        metric: PerformanceMetric,
        n: usize,
    ) -> Vec<PerformanceEntry> {
        let today = chrono::Utc::now().date_naive();
        self.history_service.worst_performers(
            &self.ledger.assets,
            &self.ledger.snapshots,
            today,
            timespan,
            metric,
            n,
        )
    }

    // ── Projections ─────────────────────────────────────────────────

    /// Simulate compounding growth over `years`, per scenario and asset
    /// type, starting from the current per-type totals. Returns
    /// `years + 1` entries (year 0 = current state).
    #[must_use]
    pub fn project(&self, years: u32) -> Vec<ProjectionYear> {
        let totals = self.ledger_service.totals_by_type(&self.ledger.assets);
        self.projection_service
            .simulate(&totals, &self.ledger.hypotheses, years)
    }

    // ── Aggregates & Alerts ─────────────────────────────────────────

    /// Total current portfolio value.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.ledger_service.total_current_value(&self.ledger.assets)
    }

    /// Total cost basis across all holdings.
    #[must_use]
    pub fn total_buying_amount(&self) -> f64 {
        self.ledger_service.total_buying_amount(&self.ledger.assets)
    }

    #[must_use]
    pub fn totals_by_type(&self) -> BTreeMap<AssetType, f64> {
        self.ledger_service.totals_by_type(&self.ledger.assets)
    }

    #[must_use]
    pub fn totals_by_who(&self) -> BTreeMap<String, f64> {
        self.ledger_service.totals_by_who(&self.ledger.assets)
    }

    #[must_use]
    pub fn totals_by_geo(&self) -> BTreeMap<Geo, f64> {
        self.ledger_service.totals_by_geo(&self.ledger.assets)
    }

    /// Assets whose current unit price has crossed an alert threshold.
    #[must_use]
    pub fn alerts(&self) -> Vec<&Asset> {
        self.ledger_service.alerts(&self.ledger.assets)
    }

    // ── Price Refresh ───────────────────────────────────────────────

    /// Refresh market prices for all auto-refresh assets through the given
    /// providers. Returns the number of assets updated. Best-effort: a
    /// ticker with no quote is skipped, never fatal.
    pub async fn refresh_prices(
        &mut self,
        quotes: &dyn QuoteProvider,
        fx: &dyn FxConverter,
    ) -> Result<usize, CoreError> {
        let updated = self
            .refresh_service
            .refresh_prices(&mut self.ledger, quotes, fx)
            .await?;
        if updated > 0 {
            self.dirty = true;
        }
        Ok(updated)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.ledger.settings
    }

    /// Set the display names of the two portfolio owners.
    pub fn set_owners(&mut self, owner1: impl Into<String>, owner2: impl Into<String>) {
        self.ledger.settings.owners = [owner1.into(), owner2.into()];
        self.dirty = true;
    }

    // ── Password & Dirty State ──────────────────────────────────────

    /// Re-encrypt the ledger with a new password.
    /// Returns the encrypted bytes; the caller writes them to storage.
    ///
    /// `last_saved_bytes` must be the most recently saved encrypted bytes
    /// for this ledger. The current password is verified by decrypting
    /// them; on failure returns `CoreError::Decryption`.
    pub fn change_password(
        &mut self,
        last_saved_bytes: &[u8],
        current_password: &str,
        new_password: &str,
    ) -> Result<Vec<u8>, CoreError> {
        StorageManager::load_from_bytes(last_saved_bytes, current_password)?;

        let new_bytes = StorageManager::save_to_bytes(&self.ledger, new_password)?;
        self.dirty = false;
        Ok(new_bytes)
    }

    /// Returns `true` if the ledger has been modified since the last save
    /// or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the full ledger as JSON (unencrypted, for debugging/display).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger) -> Self {
        Self {
            ledger,
            ledger_service: LedgerService::new(),
            snapshot_service: SnapshotService::new(),
            history_service: HistoryService::new(),
            projection_service: ProjectionService::new(),
            refresh_service: RefreshService::new(),
            dirty: false,
        }
    }
}
