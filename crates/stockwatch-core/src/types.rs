use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A curated SoCal company. Loaded from the reference lists in `data/`
/// and never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub ticker: String,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub county: Option<String>,
}

/// A fetched quote for one ticker. Lives for a single build run; the
/// adapter guarantees `price > 0` for every quote it returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub year_high: f64,
    pub year_low: f64,
    pub market_cap: f64,
    /// Trailing P/E; absent for unprofitable companies.
    pub pe: Option<f64>,
    pub volume: u64,
    /// Close from ~7 calendar days ago, when the history window had
    /// enough points. Only the Top-25 change calculation uses it.
    #[serde(default)]
    pub week_ago_price: Option<f64>,
}

/// Company metadata merged with quote data plus the computed fields.
/// The central record of both build variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedStock {
    /// 1-based dense rank, assigned by the active ranking (change % for
    /// the weekly lists, market cap for the Top-25 table).
    pub rank: u32,
    pub name: String,
    pub ticker: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    pub price: f64,
    /// Week-over-week change %, rounded to 2 decimals. Always finite.
    pub change_pct: f64,
    pub year_high: f64,
    pub year_low: f64,
    pub market_cap: f64,
    pub pe: Option<f64>,
    pub volume: u64,
    /// 52-week-low-to-price change %, rounded to 1 decimal. Computed only
    /// for stocks that reach a spotlight or ranked output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yahoo_url: Option<String>,
}

/// The rolling on-disk price snapshot used for next-cycle comparison.
/// Read once at the start of a weekly run, fully replaced at the end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistorySnapshot {
    pub saved_at: DateTime<Utc>,
    pub prices: HashMap<String, f64>,
}

/// Result of the Top-25 validation pass: every check line in order plus
/// the overall verdict. Never persisted except as the verification log.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub passed: bool,
    pub lines: Vec<String>,
}

/// Thresholds applied by the Top-25 validator.
#[derive(Debug, Clone)]
pub struct ValidationLimits {
    /// Number of enriched entries a complete run must produce.
    pub expected_count: usize,
    pub min_market_cap: f64,
    pub max_market_cap: f64,
    /// Absolute weekly change % beyond which a stock is flagged.
    pub max_weekly_change: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            expected_count: 25,
            min_market_cap: 1_000_000_000.0,
            max_market_cap: 500_000_000_000.0,
            max_weekly_change: 60.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enriched_stock_serializes_without_absent_optionals() {
        let stock = EnrichedStock {
            rank: 1,
            name: "Amgen".to_string(),
            ticker: "AMGN".to_string(),
            city: "Thousand Oaks".to_string(),
            county: None,
            price: 280.5,
            change_pct: 1.25,
            year_high: 320.0,
            year_low: 210.0,
            market_cap: 150_000_000_000.0,
            pe: Some(22.4),
            volume: 2_500_000,
            year_change: None,
            yahoo_url: None,
        };

        let json = serde_json::to_string(&stock).unwrap();
        assert!(!json.contains("county"));
        assert!(!json.contains("year_change"));
        assert!(!json.contains("yahoo_url"));
        assert!(json.contains("\"change_pct\":1.25"));
    }

    #[test]
    fn enriched_stock_serializes_top25_fields_when_present() {
        let stock = EnrichedStock {
            rank: 3,
            name: "Qualcomm".to_string(),
            ticker: "QCOM".to_string(),
            city: "San Diego".to_string(),
            county: Some("San Diego".to_string()),
            price: 170.0,
            change_pct: -0.5,
            year_high: 230.0,
            year_low: 150.0,
            market_cap: 190_000_000_000.0,
            pe: None,
            volume: 8_000_000,
            year_change: Some(13.3),
            yahoo_url: Some("https://finance.yahoo.com/quote/QCOM/".to_string()),
        };

        let json = serde_json::to_string(&stock).unwrap();
        assert!(json.contains("\"county\":\"San Diego\""));
        assert!(json.contains("\"pe\":null"));
        assert!(json.contains("finance.yahoo.com/quote/QCOM"));
    }

    #[test]
    fn default_limits_match_published_thresholds() {
        let limits = ValidationLimits::default();
        assert_eq!(limits.expected_count, 25);
        assert_eq!(limits.min_market_cap, 1_000_000_000.0);
        assert_eq!(limits.max_market_cap, 500_000_000_000.0);
        assert_eq!(limits.max_weekly_change, 60.0);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut prices = HashMap::new();
        prices.insert("DIS".to_string(), 101.52);
        prices.insert("SNAP".to_string(), 9.0);

        let snapshot = PriceHistorySnapshot {
            saved_at: Utc::now(),
            prices: prices.clone(),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: PriceHistorySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.prices, prices);
    }
}
