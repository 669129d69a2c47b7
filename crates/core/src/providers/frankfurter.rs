use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::FxConverter;
use crate::errors::CoreError;

const BASE_URL: &str = "https://api.frankfurter.dev/v1";

/// Frankfurter-backed currency converter.
///
/// - **Free**: No API key, no rate limits, open-source.
/// - **Source**: European Central Bank (ECB) data.
/// - **Coverage**: ~30+ currencies (EUR, USD, GBP, JPY, etc.)
///
/// Used to bring provider quotes into the ledger's base currency (EUR).
pub struct FrankfurterConverter {
    client: Client,
}

impl FrankfurterConverter {
    pub fn new() -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for FrankfurterConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FxConverter for FrankfurterConverter {
    fn name(&self) -> &str {
        "Frankfurter"
    }

    async fn rate(&self, from: &str, to: &str) -> Result<f64, CoreError> {
        let base = from.to_uppercase();
        let target = to.to_uppercase();

        if base == target {
            return Ok(1.0);
        }

        let url = format!("{BASE_URL}/latest?base={base}&symbols={target}");

        let resp: RatesResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Frankfurter".into(),
                message: format!("Failed to parse response for {base}/{target}: {e}"),
            })?;

        resp.rates.get(&target).copied().ok_or_else(|| CoreError::Api {
            provider: "Frankfurter".into(),
            message: format!("No rate found for {base} → {target}"),
        })
    }
}
