use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use time::OffsetDateTime;

use super::traits::{Quote, QuoteProvider};
use crate::errors::CoreError;

/// Yahoo Finance quote provider.
///
/// - **Free**: No API key required (unofficial public API).
/// - **Coverage**: Global equities, ETFs, crypto pairs (e.g. "BTC-EUR").
///
/// Latest close is taken as the current price; the trailing dividend per
/// share is reconstructed by summing the dividend events of the past year.
/// Prices come back in the instrument's native currency — conversion to the
/// ledger's base currency happens in the refresh path.
///
/// **Note**: Not WASM-compatible (uses native reqwest/tokio connectors).
pub struct YahooQuoteProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooQuoteProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    /// Convert a `chrono::NaiveDate` to `time::OffsetDateTime` (midnight UTC).
    fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, CoreError> {
        let month = time::Month::try_from(date.month() as u8).map_err(|e| CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: format!("Invalid month in {date}: {e}"),
        })?;

        let odt = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
            .map_err(|e| CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("Invalid date {date}: {e}"),
            })?
            .with_hms(0, 0, 0)
            .map_err(|e| CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("Invalid time for {date}: {e}"),
            })?
            .assume_utc();
        Ok(odt)
    }

    /// Sum of dividend events over the trailing year, per share.
    async fn trailing_dividend(&self, ticker: &str) -> f64 {
        let today = chrono::Utc::now().date_naive();
        let year_ago = today - chrono::Duration::days(365);

        let (Ok(start), Ok(end)) = (
            Self::to_offset_datetime(year_ago),
            Self::to_offset_datetime(today),
        ) else {
            return 0.0;
        };

        // Dividends are informational; any failure degrades to 0.0.
        match self
            .connector
            .get_quote_history_interval(ticker, start, end, "1d")
            .await
        {
            Ok(resp) => resp
                .dividends()
                .map(|divs| divs.iter().map(|d| d.amount).sum())
                .unwrap_or(0.0),
            Err(_) => 0.0,
        }
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn get_quote(&self, ticker: &str) -> Result<Option<Quote>, CoreError> {
        let resp = match self.connector.get_latest_quotes(ticker, "1d").await {
            Ok(resp) => resp,
            // Unknown ticker or temporarily unquotable: not an error for
            // the refresh path, just no quote.
            Err(_) => return Ok(None),
        };

        let quote = match resp.last_quote() {
            Ok(q) => q,
            Err(_) => return Ok(None),
        };

        let currency = resp
            .metadata()
            .ok()
            .and_then(|m| m.currency)
            .unwrap_or_else(|| "EUR".to_string());

        let dividend_per_share = self.trailing_dividend(ticker).await;

        Ok(Some(Quote {
            ticker: ticker.to_string(),
            price: quote.close,
            dividend_per_share,
            currency,
        }))
    }
}
