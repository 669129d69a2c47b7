use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::providers::traits::{FxConverter, Quote, QuoteProvider};

/// Tickers fetched per batch before pausing.
const BATCH_SIZE: usize = 10;

/// Fixed pause between batches, to stay under the provider's informal rate
/// limits. Not a backpressure mechanism.
#[cfg(not(target_arch = "wasm32"))]
const BATCH_DELAY_MS: u64 = 500;

/// Refreshes market prices for auto-refresh assets and writes the results
/// back into the ledger.
///
/// Quotes are best-effort: a ticker with no quote is skipped, a failing FX
/// conversion leaves the native-currency price in place. A refresh never
/// aborts because one asset couldn't be priced.
pub struct RefreshService;

impl RefreshService {
    pub fn new() -> Self {
        Self
    }

    /// Refresh every asset with `auto_refresh` set and a ticker.
    ///
    /// Duplicate tickers are fetched once. Updates `current_value`,
    /// `current_amount = quantity * price` and `dividend_per_share`, all in
    /// the ledger's base currency. Returns the number of assets updated.
    pub async fn refresh_prices(
        &self,
        ledger: &mut Ledger,
        quotes: &dyn QuoteProvider,
        fx: &dyn FxConverter,
    ) -> Result<usize, CoreError> {
        let base_currency = ledger.settings.base_currency.clone();

        let mut tickers: Vec<String> = ledger
            .assets
            .iter()
            .filter(|a| a.auto_refresh)
            .filter_map(|a| a.ticker.clone())
            .collect();
        tickers.sort();
        tickers.dedup();

        if tickers.is_empty() {
            return Ok(0);
        }

        let fetched = self.fetch_quotes(&tickers, quotes).await?;

        let mut updated = 0;
        for asset in ledger
            .assets
            .iter_mut()
            .filter(|a| a.auto_refresh && a.ticker.is_some())
        {
            let ticker = asset.ticker.as_deref().unwrap_or_default();
            let Some(quote) = fetched.get(ticker) else {
                continue;
            };

            let price = self
                .convert_best_effort(fx, quote.price, &quote.currency, &base_currency)
                .await;
            let dividend = self
                .convert_best_effort(fx, quote.dividend_per_share, &quote.currency, &base_currency)
                .await;

            asset.current_value = price;
            asset.current_amount = asset.quantity * price;
            asset.dividend_per_share = dividend;
            updated += 1;
        }

        Ok(updated)
    }

    /// Fetch quotes in batches of `BATCH_SIZE` with a fixed pause between
    /// batches. A ticker that yields no quote is simply absent from the
    /// result map.
    async fn fetch_quotes(
        &self,
        tickers: &[String],
        provider: &dyn QuoteProvider,
    ) -> Result<HashMap<String, Quote>, CoreError> {
        let mut results = HashMap::new();

        for (batch_idx, batch) in tickers.chunks(BATCH_SIZE).enumerate() {
            #[cfg(not(target_arch = "wasm32"))]
            if batch_idx > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(BATCH_DELAY_MS)).await;
            }
            #[cfg(target_arch = "wasm32")]
            let _ = batch_idx;

            for ticker in batch {
                match provider.get_quote(ticker).await {
                    Ok(Some(quote)) => {
                        results.insert(ticker.clone(), quote);
                    }
                    // No quote, or a transient provider failure: skip this
                    // ticker, keep going with the rest of the batch.
                    Ok(None) | Err(_) => {}
                }
            }
        }

        Ok(results)
    }

    /// Convert to the base currency, falling back to the unconverted value
    /// when the FX lookup fails. Identity when currencies already match.
    async fn convert_best_effort(
        &self,
        fx: &dyn FxConverter,
        value: f64,
        from: &str,
        to: &str,
    ) -> f64 {
        if from.eq_ignore_ascii_case(to) {
            return value;
        }
        match fx.rate(from, to).await {
            Ok(rate) => value * rate,
            Err(_) => value,
        }
    }
}

impl Default for RefreshService {
    fn default() -> Self {
        Self::new()
    }
}
