//! Small glue between the quote source and the builds.

use stockwatch_core::QuoteSource;
use tracing::{info, warn};

/// Tickers shown before a long failure list is cut off.
const FAILURE_PREVIEW: usize = 5;

/// Pulls the recent closing series for a spotlight ticker. A failed fetch
/// only costs the chart, so it degrades to an empty series with a warning.
pub async fn fetch_sparkline<S: QuoteSource>(source: &S, ticker: &str) -> Vec<f64> {
    info!("Fetching sparkline for {}...", ticker);
    match source.fetch_history(ticker).await {
        Ok(closes) => closes,
        Err(err) => {
            warn!("Failed to fetch history for {}: {}", ticker, err);
            Vec::new()
        }
    }
}

/// Fetches sparklines for the spotlight pair. `None` tickers (empty merge)
/// get an empty series without touching the source.
pub async fn spotlight_sparklines<S: QuoteSource>(
    source: &S,
    gainer: Option<&str>,
    loser: Option<&str>,
) -> (Vec<f64>, Vec<f64>) {
    let gainer_sparkline = match gainer {
        Some(ticker) => fetch_sparkline(source, ticker).await,
        None => Vec::new(),
    };
    let loser_sparkline = match loser {
        Some(ticker) => fetch_sparkline(source, ticker).await,
        None => Vec::new(),
    };
    (gainer_sparkline, loser_sparkline)
}

/// Joins failed tickers for a warning line, optionally cutting the list off
/// after the first five.
pub fn summarize_failed(failed: &[String], truncate: bool) -> String {
    if truncate && failed.len() > FAILURE_PREVIEW {
        format!("{}...", failed[..FAILURE_PREVIEW].join(", "))
    } else {
        failed.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use stockwatch_core::{Quote, WatchError};

    struct StubSource {
        history: Option<Vec<f64>>,
    }

    #[async_trait]
    impl QuoteSource for StubSource {
        async fn fetch_quotes(&self, _tickers: &[String]) -> (Vec<Quote>, Vec<String>) {
            (Vec::new(), Vec::new())
        }

        async fn fetch_history(&self, _symbol: &str) -> Result<Vec<f64>, WatchError> {
            match &self.history {
                Some(closes) => Ok(closes.clone()),
                None => Err(WatchError::Fetch("stub offline".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn sparkline_passes_closes_through() {
        let source = StubSource {
            history: Some(vec![10.0, 10.5, 11.0]),
        };
        let closes = fetch_sparkline(&source, "DIS").await;
        assert_eq!(closes, vec![10.0, 10.5, 11.0]);
    }

    #[tokio::test]
    async fn sparkline_failure_degrades_to_empty() {
        let source = StubSource { history: None };
        let closes = fetch_sparkline(&source, "DIS").await;
        assert!(closes.is_empty());
    }

    #[tokio::test]
    async fn spotlight_pair_skips_absent_tickers() {
        let source = StubSource {
            history: Some(vec![1.0, 2.0]),
        };
        let (gainer, loser) = spotlight_sparklines(&source, Some("DIS"), None).await;
        assert_eq!(gainer, vec![1.0, 2.0]);
        assert!(loser.is_empty());
    }

    #[test]
    fn short_failure_lists_are_shown_in_full() {
        let failed = vec!["A".to_string(), "B".to_string()];
        assert_eq!(summarize_failed(&failed, true), "A, B");
    }

    #[test]
    fn long_failure_lists_are_cut_off_at_five() {
        let failed: Vec<String> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(summarize_failed(&failed, true), "A, B, C, D, E...");
    }

    #[test]
    fn exactly_five_failures_get_no_ellipsis() {
        let failed: Vec<String> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(summarize_failed(&failed, true), "A, B, C, D, E");
    }

    #[test]
    fn untruncated_mode_always_shows_everything() {
        let failed: Vec<String> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(summarize_failed(&failed, false), "A, B, C, D, E, F, G");
    }
}
