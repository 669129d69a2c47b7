use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A market quote for one ticker, as returned by a quote provider.
/// Prices come back in the provider's native currency; the refresh path
/// converts to the ledger's base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub ticker: String,
    pub price: f64,
    /// Trailing annual dividend per share, 0.0 when the instrument pays none.
    pub dividend_per_share: f64,
    /// ISO currency code of `price` and `dividend_per_share`.
    pub currency: String,
}

/// Trait abstraction for market-quote sources.
///
/// The core treats quotes as a best-effort external lookup, not a source of
/// truth: `Ok(None)` means "this ticker has no quote right now" and callers
/// skip the asset rather than failing a whole refresh batch.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the latest quote for a ticker.
    async fn get_quote(&self, ticker: &str) -> Result<Option<Quote>, CoreError>;
}

/// Trait abstraction for currency conversion.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FxConverter: Send + Sync {
    fn name(&self) -> &str;

    /// Exchange rate from one currency to another. Must return 1.0 when
    /// both codes are equal.
    async fn rate(&self, from: &str, to: &str) -> Result<f64, CoreError>;
}
