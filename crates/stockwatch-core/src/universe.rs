use crate::{Company, WatchError};
use std::collections::HashSet;
use std::path::Path;

/// SoCal's largest public companies by market cap. These must always be
/// fetchable; a missing anchor is a strong build-health signal and gets a
/// loud warning (the weekly build still publishes).
pub const ANCHOR_COMPANIES: &[(&str, &str)] = &[
    ("DIS", "Walt Disney Co"),
    ("AMGN", "Amgen"),
    ("QCOM", "Qualcomm"),
    ("ILMN", "Illumina"),
    ("CMG", "Chipotle"),
    ("SRE", "Sempra"),
    ("DXCM", "Dexcom"),
    ("PSA", "Public Storage"),
    ("O", "Realty Income"),
    ("EW", "Edwards Lifesciences"),
    ("TTD", "The Trade Desk"),
    ("DECK", "Deckers"),
    ("RKLB", "Rocket Lab"),
    ("RMD", "ResMed"),
    ("NBIX", "Neurocrine"),
];

/// Load a curated company list from a JSON reference file.
///
/// Duplicate tickers keep the first occurrence; the list is otherwise
/// returned in file order.
pub fn load_companies(path: &Path) -> Result<Vec<Company>, WatchError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        WatchError::Config(format!("cannot read company list {}: {}", path.display(), e))
    })?;
    let companies: Vec<Company> = serde_json::from_str(&raw)?;

    let mut seen = HashSet::new();
    Ok(companies
        .into_iter()
        .filter(|c| seen.insert(c.ticker.clone()))
        .collect())
}
