use serde::{Deserialize, Serialize};

/// The class of a tracked holding.
///
/// Derives `Ord` so grouped totals can live in a `BTreeMap` — the snapshot
/// payload then serializes with a stable key order, which is what makes
/// same-day capture byte-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetType {
    /// Listed equities / ETFs
    Stock,
    /// Cryptocurrencies
    Crypto,
    /// Unlisted start-up equity (manually valued)
    #[serde(rename = "Start-up")]
    StartUp,
    /// Regulated savings accounts
    #[serde(rename = "Savings-Account")]
    SavingsAccount,
    /// Cash kept available for investment
    #[serde(rename = "Active-Cash")]
    ActiveCash,
}

impl AssetType {
    /// All known asset types, in display order.
    pub const ALL: [AssetType; 5] = [
        AssetType::Stock,
        AssetType::Crypto,
        AssetType::StartUp,
        AssetType::SavingsAccount,
        AssetType::ActiveCash,
    ];
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Stock => write!(f, "Stock"),
            AssetType::Crypto => write!(f, "Crypto"),
            AssetType::StartUp => write!(f, "Start-up"),
            AssetType::SavingsAccount => write!(f, "Savings-Account"),
            AssetType::ActiveCash => write!(f, "Active-Cash"),
        }
    }
}

/// Geographic classification of a holding. Optional — cash and start-up
/// positions frequently have none, and the geo grouping skips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Geo {
    FR,
    US,
    EU,
    #[serde(rename = "OTHER")]
    Other,
}

impl std::fmt::Display for Geo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Geo::FR => write!(f, "FR"),
            Geo::US => write!(f, "US"),
            Geo::EU => write!(f, "EU"),
            Geo::Other => write!(f, "OTHER"),
        }
    }
}

/// A single holding in the ledger.
///
/// Monetary fields come in unit/total pairs (`buying_value`/`buying_amount`,
/// `current_value`/`current_amount`). `amount == quantity * value` is a soft
/// invariant: the refresh path always derives totals from unit prices, but
/// manual edits may set totals independently and that is legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Numeric identity, assigned by the ledger.
    pub id: i64,

    /// Display name (e.g., "Apple Inc.", "Livret A").
    pub name: String,

    /// Exchange ticker, when the asset has one ("AAPL", "BTC-EUR").
    /// Required for auto-refresh.
    pub ticker: Option<String>,

    /// ISIN code, informational only.
    pub isin: Option<String>,

    /// Which portfolio owner holds this asset.
    pub who: String,

    pub asset_type: AssetType,

    pub geo: Option<Geo>,

    /// Units held (shares, coins, or 1.0 for account-style assets).
    pub quantity: f64,

    /// Cost basis per unit.
    pub buying_value: f64,

    /// Total cost basis.
    pub buying_amount: f64,

    /// Latest known market price per unit, in EUR.
    pub current_value: f64,

    /// Total current market value, in EUR.
    pub current_amount: f64,

    /// Whether the scheduled price refresh should update this asset.
    pub auto_refresh: bool,

    /// Annual dividend per unit, in EUR.
    #[serde(default)]
    pub dividend_per_share: f64,

    #[serde(default)]
    pub notes: Option<String>,

    /// Alert when `current_value` rises to or above this price.
    #[serde(default)]
    pub alert_high: Option<f64>,

    /// Alert when `current_value` falls to or below this price.
    #[serde(default)]
    pub alert_low: Option<f64>,
}

impl Asset {
    /// Create an asset with the required fields; everything else defaults
    /// to zero/empty and can be set afterwards.
    pub fn new(id: i64, name: impl Into<String>, who: impl Into<String>, asset_type: AssetType) -> Self {
        Self {
            id,
            name: name.into(),
            ticker: None,
            isin: None,
            who: who.into(),
            asset_type,
            geo: None,
            quantity: 0.0,
            buying_value: 0.0,
            buying_amount: 0.0,
            current_value: 0.0,
            current_amount: 0.0,
            auto_refresh: false,
            dividend_per_share: 0.0,
            notes: None,
            alert_high: None,
            alert_low: None,
        }
    }

    /// Re-derive both totals from quantity and the unit prices.
    /// Used by write paths that change unit values (price refresh).
    pub fn sync_amounts(&mut self) {
        self.buying_amount = self.quantity * self.buying_value;
        self.current_amount = self.quantity * self.current_value;
    }

    /// All-time performance in percent against the cost basis.
    /// `None` when the cost basis is zero — a free position has no
    /// defined return and must not rank as infinite gain.
    pub fn all_time_performance(&self) -> Option<f64> {
        if self.buying_amount == 0.0 {
            return None;
        }
        Some((self.current_amount - self.buying_amount) / self.buying_amount * 100.0)
    }

    /// Expected annual dividend income from this position.
    pub fn annual_dividend(&self) -> f64 {
        self.quantity * self.dividend_per_share
    }

    /// Whether the current unit price has crossed one of the configured
    /// alert thresholds.
    pub fn alert_triggered(&self) -> bool {
        let high = self.alert_high.is_some_and(|h| self.current_value >= h);
        let low = self.alert_low.is_some_and(|l| self.current_value <= l);
        high || low
    }
}
