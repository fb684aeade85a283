//! Sanity checks that run over the merged data before anything is published.

use std::collections::HashSet;

use stockwatch_core::universe::ANCHOR_COMPANIES;
use stockwatch_core::{EnrichedStock, Quote, ValidationLimits, ValidationReport};

/// Runs the four checks over the enriched list and reports each as a line.
///
/// Completeness and price sanity decide `passed`; the market-cap band and
/// extreme-mover checks are advisory and only add lines.
pub fn validate(
    enriched: &[EnrichedStock],
    failed_tickers: &[String],
    limits: &ValidationLimits,
) -> ValidationReport {
    let mut lines = Vec::new();
    let mut passed = true;

    // Completeness against the curated roster.
    let fetched = enriched.len();
    if fetched == limits.expected_count {
        lines.push(format!(
            "Tickers fetched: {}/{} OK",
            fetched, limits.expected_count
        ));
    } else {
        lines.push(format!(
            "Tickers fetched: {}/{} FAILED",
            fetched, limits.expected_count
        ));
        if !failed_tickers.is_empty() {
            lines.push(format!("  Missing: {}", failed_tickers.join(", ")));
        }
        passed = false;
    }

    // Every price must be strictly positive.
    if enriched.is_empty() {
        lines.push("Price range: no quotes to check FAILED".to_string());
        passed = false;
    } else if enriched.iter().all(|s| s.price > 0.0) {
        let min = enriched.iter().map(|s| s.price).fold(f64::INFINITY, f64::min);
        let max = enriched
            .iter()
            .map(|s| s.price)
            .fold(f64::NEG_INFINITY, f64::max);
        lines.push(format!("Price range: ${:.2} - ${:.2} OK", min, max));
    } else {
        lines.push("Price range: Some prices are zero or negative FAILED".to_string());
        passed = false;
    }

    // Market caps should sit inside the expected band. Advisory only:
    // a mega-cap outlier is worth a look, not an abort.
    let caps: Vec<f64> = enriched
        .iter()
        .map(|s| s.market_cap)
        .filter(|c| *c > 0.0)
        .collect();
    if !caps.is_empty() {
        let min_cap = caps.iter().copied().fold(f64::INFINITY, f64::min);
        let max_cap = caps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let line = format!(
            "Market cap range: ${:.1}B - ${:.1}B",
            min_cap / 1e9,
            max_cap / 1e9
        );
        if min_cap >= limits.min_market_cap && max_cap <= limits.max_market_cap {
            lines.push(format!("{line} OK"));
        } else {
            lines.push(format!("{line} WARNING (outside expected)"));
        }
    }

    // Flag implausible weekly swings for a human, without failing the build.
    let extreme: Vec<&EnrichedStock> = enriched
        .iter()
        .filter(|s| s.change_pct.abs() > limits.max_weekly_change)
        .collect();
    if extreme.is_empty() {
        lines.push(format!(
            "No extreme movers (within +/-{:.0}%)",
            limits.max_weekly_change
        ));
    } else {
        for stock in extreme {
            lines.push(format!(
                "Extreme mover: {} ({:+.1}%) - flagged for review",
                stock.ticker, stock.change_pct
            ));
        }
    }

    ValidationReport { passed, lines }
}

/// Household-name companies that are expected in every weekly fetch; any
/// that came back empty-handed are returned for the warning banner.
pub fn missing_anchors(quotes: &[Quote]) -> Vec<(&'static str, &'static str)> {
    let fetched: HashSet<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();
    ANCHOR_COMPANIES
        .iter()
        .filter(|(ticker, _)| !fetched.contains(ticker))
        .copied()
        .collect()
}
