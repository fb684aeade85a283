use crate::{Quote, WatchError};
use async_trait::async_trait;

/// Source of quote data for the build pipeline.
///
/// `fetch_quotes` must tolerate per-ticker failure: a failed ticker is
/// reported in the second element of the partition, never as an error for
/// the whole batch.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch quotes for all tickers. Returns `(quotes, failed_tickers)`,
    /// both in input-ticker order.
    async fn fetch_quotes(&self, tickers: &[String]) -> (Vec<Quote>, Vec<String>);

    /// Recent daily closes for one ticker, oldest first, for sparklines.
    async fn fetch_history(&self, symbol: &str) -> Result<Vec<f64>, WatchError>;
}
