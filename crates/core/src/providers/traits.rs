use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::CoreError;

/// Source of the latest market price for a ticker.
///
/// The library ships no network client: applications register their own
/// implementation (HTTP API, spreadsheet feed, fixed test prices, ...).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Latest unit price of `symbol`, in the portfolio's currency.
    async fn get_latest_price(&self, symbol: &str) -> Result<Decimal, CoreError>;
}
