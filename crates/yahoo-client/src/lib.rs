//! Quote Source Adapter over the Yahoo Finance v8 endpoints.
//!
//! One quote is assembled from two responses: the quote endpoint supplies
//! market cap, trailing P/E, volume and the 52-week range; the chart
//! endpoint supplies the recent daily closes that yield the current and
//! week-ago prices. Every per-ticker failure is an omission, never a batch
//! error, and nothing here retries.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use stockwatch_core::{Quote, QuoteSource, WatchError};
use tokio::sync::Semaphore;

const BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance";
const CHART_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Max in-flight requests during a batched fetch.
const FETCH_CONCURRENCY: usize = 8;

#[derive(Clone)]
pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn get_json(&self, url: &str) -> Result<Value, WatchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WatchError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WatchError::Fetch(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WatchError::Fetch(e.to_string()))
    }

    /// Fetch a single quote, merging the quote and chart responses.
    pub async fn fetch_quote(&self, symbol: &str) -> Result<Quote, WatchError> {
        let quote_url = format!("{}/quote?symbols={}", BASE_URL, symbol);
        let chart_url = format!("{}/{}?range=7d&interval=1d", CHART_URL, symbol);

        let (info, chart) = tokio::join!(self.get_json(&quote_url), self.get_json(&chart_url));

        let info = info?;
        // A missing chart still yields a quote via regularMarketPrice.
        let closes = chart.map(|c| closes_from_chart(&c)).unwrap_or_default();

        quote_from_response(symbol, &info, &closes)
    }

    /// Recent daily closes for sparkline charts, oldest first, rounded to
    /// cents.
    pub async fn fetch_history(&self, symbol: &str) -> Result<Vec<f64>, WatchError> {
        let url = format!("{}/{}?range=7d&interval=1d", CHART_URL, symbol);
        let chart = self.get_json(&url).await?;

        Ok(closes_from_chart(&chart)
            .into_iter()
            .map(round2)
            .collect())
    }

    /// Fetch quotes for every ticker, a bounded number at a time.
    /// Returns `(quotes, failed_tickers)` in input order.
    pub async fn fetch_quotes(&self, tickers: &[String]) -> (Vec<Quote>, Vec<String>) {
        let semaphore = Arc::new(Semaphore::new(FETCH_CONCURRENCY));
        let mut handles = Vec::with_capacity(tickers.len());

        for ticker in tickers {
            let client = self.clone();
            let symbol = ticker.clone();
            let semaphore = Arc::clone(&semaphore);

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire().await.unwrap();
                client.fetch_quote(&symbol).await
            });
            handles.push((ticker.clone(), handle));
        }

        let mut quotes = Vec::new();
        let mut failed = Vec::new();

        // Awaiting in spawn order keeps both partitions in ticker order.
        for (ticker, handle) in handles {
            match handle.await {
                Ok(Ok(quote)) => quotes.push(quote),
                Ok(Err(e)) => {
                    tracing::debug!("quote fetch failed for {}: {}", ticker, e);
                    failed.push(ticker);
                }
                Err(e) => {
                    tracing::warn!("quote fetch task for {} aborted: {}", ticker, e);
                    failed.push(ticker);
                }
            }
        }

        (quotes, failed)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for YahooClient {
    async fn fetch_quotes(&self, tickers: &[String]) -> (Vec<Quote>, Vec<String>) {
        YahooClient::fetch_quotes(self, tickers).await
    }

    async fn fetch_history(&self, symbol: &str) -> Result<Vec<f64>, WatchError> {
        YahooClient::fetch_history(self, symbol).await
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Daily closes from a chart response, nulls dropped, oldest first.
fn closes_from_chart(chart: &Value) -> Vec<f64> {
    chart
        .get("chart")
        .and_then(|v| v.get("result"))
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|r| r.get("indicators"))
        .and_then(|v| v.get("quote"))
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|q| q.get("close"))
        .and_then(|v| v.as_array())
        .map(|closes| closes.iter().filter_map(|c| c.as_f64()).collect())
        .unwrap_or_default()
}

/// Assemble a [`Quote`] from the quote-endpoint payload and the close
/// series. The current price prefers the latest close; a window shorter
/// than two points falls back to `regularMarketPrice` with no week-ago
/// price.
fn quote_from_response(symbol: &str, info: &Value, closes: &[f64]) -> Result<Quote, WatchError> {
    let result = info
        .get("quoteResponse")
        .and_then(|v| v.get("result"))
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .ok_or_else(|| WatchError::Fetch(format!("no quote data found for {}", symbol)))?;

    let (price, week_ago_price) = if closes.len() >= 2 {
        (closes[closes.len() - 1], Some(closes[0]))
    } else {
        let market_price = result
            .get("regularMarketPrice")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (market_price, None)
    };

    if price <= 0.0 {
        return Err(WatchError::Fetch(format!(
            "no positive price for {}",
            symbol
        )));
    }

    Ok(Quote {
        symbol: symbol.to_string(),
        price,
        year_high: result
            .get("fiftyTwoWeekHigh")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
        year_low: result
            .get("fiftyTwoWeekLow")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
        market_cap: result
            .get("marketCap")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
        pe: result.get("trailingPE").and_then(|v| v.as_f64()),
        volume: result
            .get("regularMarketVolume")
            .and_then(|v| v.as_u64())
            .unwrap_or(0),
        week_ago_price,
    })
}
