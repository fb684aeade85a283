//! The price-history file that links one week's build to the next.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use stockwatch_core::{PriceHistorySnapshot, WatchError};
use tracing::info;

/// Loads last week's closing prices. A missing file is a normal first run
/// and yields an empty map; an unreadable or corrupt one is an error.
pub fn load_price_history(path: &Path) -> Result<HashMap<String, f64>, WatchError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let contents = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    match value.get("prices") {
        Some(prices) => Ok(serde_json::from_value(prices.clone())?),
        None => Ok(HashMap::new()),
    }
}

/// Saves this week's prices for next week's comparison.
pub fn save_price_history(
    path: &Path,
    prices: &HashMap<String, f64>,
    saved_at: DateTime<Utc>,
) -> Result<(), WatchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let snapshot = PriceHistorySnapshot {
        saved_at,
        prices: prices.clone(),
    };
    fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("price_history.json");
    info!("Saved prices for {} tickers -> {}", prices.len(), name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_means_first_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("price_history.json");
        let prices = load_price_history(&path).unwrap();
        assert!(prices.is_empty());
    }

    #[test]
    fn saved_prices_come_back_intact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("price_history.json");

        let mut prices = HashMap::new();
        prices.insert("DIS".to_string(), 101.25);
        prices.insert("QCOM".to_string(), 163.4);

        save_price_history(&path, &prices, Utc::now()).unwrap();
        let loaded = load_price_history(&path).unwrap();

        assert_eq!(loaded, prices);
    }

    #[test]
    fn save_creates_the_data_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("price_history.json");

        save_price_history(&path, &HashMap::new(), Utc::now()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_without_prices_key_is_treated_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("price_history.json");
        fs::write(&path, r#"{"saved_at": "2026-08-18T00:00:00Z"}"#).unwrap();

        let prices = load_price_history(&path).unwrap();
        assert!(prices.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("price_history.json");
        fs::write(&path, "not json at all").unwrap();

        assert!(load_price_history(&path).is_err());
    }

    #[test]
    fn snapshot_on_disk_is_pretty_printed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("price_history.json");

        let mut prices = HashMap::new();
        prices.insert("SRE".to_string(), 78.9);
        save_price_history(&path, &prices, Utc::now()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"prices\""));
        assert!(raw.contains("\"saved_at\""));
        assert!(raw.contains('\n'));
    }
}
