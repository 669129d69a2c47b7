use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::asset::{Asset, AssetType, Geo};
use crate::models::dividend::Dividend;
use crate::models::ledger::Ledger;

/// Manages the live asset ledger: CRUD on holdings, dividend records, and
/// the grouped totals every other component consumes.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Add a new asset. The ledger assigns the id; whatever id the caller
    /// put on the draft is ignored. Returns the assigned id.
    pub fn add_asset(&self, ledger: &mut Ledger, mut asset: Asset) -> Result<i64, CoreError> {
        self.validate_asset(&asset)?;
        let id = ledger.next_asset_id;
        ledger.next_asset_id += 1;
        asset.id = id;
        ledger.assets.push(asset);
        Ok(id)
    }

    /// Replace an existing asset wholesale, matched by id.
    pub fn update_asset(&self, ledger: &mut Ledger, asset: Asset) -> Result<(), CoreError> {
        self.validate_asset(&asset)?;
        let slot = ledger
            .assets
            .iter_mut()
            .find(|a| a.id == asset.id)
            .ok_or(CoreError::AssetNotFound(asset.id))?;
        *slot = asset;
        Ok(())
    }

    /// Delete an asset and cascade to its dividend records.
    /// Ids are never reused, so old snapshots keep resolving by id.
    pub fn remove_asset(&self, ledger: &mut Ledger, asset_id: i64) -> Result<Asset, CoreError> {
        let idx = ledger
            .assets
            .iter()
            .position(|a| a.id == asset_id)
            .ok_or(CoreError::AssetNotFound(asset_id))?;
        let removed = ledger.assets.remove(idx);
        ledger.dividends.retain(|d| d.asset_id != asset_id);
        Ok(removed)
    }

    pub fn get_asset<'a>(&self, ledger: &'a Ledger, asset_id: i64) -> Option<&'a Asset> {
        ledger.assets.iter().find(|a| a.id == asset_id)
    }

    // ── Dividends ───────────────────────────────────────────────────

    /// Record dividend income for an asset and year. Upserts by
    /// (asset_id, year) — recording twice for the same year overwrites.
    pub fn set_dividend(
        &self,
        ledger: &mut Ledger,
        asset_id: i64,
        year: i32,
        amount: f64,
    ) -> Result<(), CoreError> {
        if self.get_asset(ledger, asset_id).is_none() {
            return Err(CoreError::AssetNotFound(asset_id));
        }
        match ledger
            .dividends
            .iter_mut()
            .find(|d| d.asset_id == asset_id && d.year == year)
        {
            Some(existing) => existing.amount = amount,
            None => ledger.dividends.push(Dividend {
                asset_id,
                year,
                amount,
            }),
        }
        Ok(())
    }

    /// All dividend records for one asset, sorted by year.
    pub fn dividends_for<'a>(&self, ledger: &'a Ledger, asset_id: i64) -> Vec<&'a Dividend> {
        let mut records: Vec<&Dividend> = ledger
            .dividends
            .iter()
            .filter(|d| d.asset_id == asset_id)
            .collect();
        records.sort_by_key(|d| d.year);
        records
    }

    // ── Aggregates ──────────────────────────────────────────────────

    /// Total current value across all holdings.
    pub fn total_current_value(&self, assets: &[Asset]) -> f64 {
        assets.iter().map(|a| a.current_amount).sum()
    }

    /// Total cost basis across all holdings.
    pub fn total_buying_amount(&self, assets: &[Asset]) -> f64 {
        assets.iter().map(|a| a.buying_amount).sum()
    }

    /// Current value grouped by asset type.
    pub fn totals_by_type(&self, assets: &[Asset]) -> BTreeMap<AssetType, f64> {
        let mut totals = BTreeMap::new();
        for asset in assets {
            *totals.entry(asset.asset_type).or_insert(0.0) += asset.current_amount;
        }
        totals
    }

    /// Current value grouped by owner.
    pub fn totals_by_who(&self, assets: &[Asset]) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for asset in assets {
            *totals.entry(asset.who.clone()).or_insert(0.0) += asset.current_amount;
        }
        totals
    }

    /// Current value grouped by geography. Assets with no geography set
    /// are skipped entirely rather than lumped into a synthetic bucket.
    pub fn totals_by_geo(&self, assets: &[Asset]) -> BTreeMap<Geo, f64> {
        let mut totals = BTreeMap::new();
        for asset in assets {
            if let Some(geo) = asset.geo {
                *totals.entry(geo).or_insert(0.0) += asset.current_amount;
            }
        }
        totals
    }

    /// Expected annual dividend income across the whole portfolio.
    pub fn total_annual_dividends(&self, assets: &[Asset]) -> f64 {
        assets.iter().map(|a| a.annual_dividend()).sum()
    }

    /// Assets whose current unit price has crossed an alert threshold.
    pub fn alerts<'a>(&self, assets: &'a [Asset]) -> Vec<&'a Asset> {
        assets.iter().filter(|a| a.alert_triggered()).collect()
    }

    // ── Validation ──────────────────────────────────────────────────

    fn validate_asset(&self, asset: &Asset) -> Result<(), CoreError> {
        if asset.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Asset name must not be empty".into()));
        }
        if !asset.quantity.is_finite() || asset.quantity < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Asset quantity must be finite and non-negative, got {}",
                asset.quantity
            )));
        }
        for (field, value) in [
            ("buying_value", asset.buying_value),
            ("buying_amount", asset.buying_amount),
            ("current_value", asset.current_value),
            ("current_amount", asset.current_amount),
        ] {
            if !value.is_finite() {
                return Err(CoreError::ValidationError(format!(
                    "Asset {field} must be a finite number"
                )));
            }
        }
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
