//! build-top25: the publication-grade build for SoCal's 25 largest public
//! companies. Stricter than the weekly build: validation failures abort and
//! nothing is published.
//!
//! Usage:
//!   cargo run -p site-builder --bin build-top25
//!
//! Reads data/top25_companies.json and writes the site, top25.json, and
//! verification.txt to docs-top25/.

use anyhow::{bail, Context};
use chrono::Utc;
use tracing::{info, warn};

use ranking_engine::{enrich_top25, pe_extremes, rank_by_market_cap, spotlights, validate, year_change};
use site_builder::{config::SiteConfig, pipeline, publisher, templates};
use stockwatch_core::{load_companies, ValidationLimits};
use yahoo_client::YahooClient;

/// Below this many quotes the build aborts outright.
const MIN_QUOTES: usize = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "build_top25=info,site_builder=info,yahoo_client=info".into()),
        )
        .init();

    info!("{}", "=".repeat(50));
    info!("LA Stock Watch: Top 25 - Building site");
    info!("{}", "=".repeat(50));

    let config = SiteConfig::top25_from_env();
    let companies =
        load_companies(&config.top25_file()).context("loading the top-25 roster")?;
    let tickers: Vec<String> = companies.iter().map(|c| c.ticker.clone()).collect();

    info!("Fetching market data for {} companies...", tickers.len());
    let source = YahooClient::new();
    let (quotes, failed) = source.fetch_quotes(&tickers).await;
    if !failed.is_empty() {
        warn!("Failed to fetch: {}", pipeline::summarize_failed(&failed, false));
    }
    info!("Got quotes for {} companies", quotes.len());

    if quotes.len() < MIN_QUOTES {
        bail!("too few quotes fetched ({} of {}), build aborted", quotes.len(), tickers.len());
    }

    let enriched = rank_by_market_cap(enrich_top25(&companies, &quotes));

    let (spotlight_gainer, spotlight_loser) = spotlights(&enriched);
    let spotlight_gainer = spotlight_gainer.map(|mut g| {
        g.year_change = Some(year_change(&g));
        g
    });
    let spotlight_loser = spotlight_loser.map(|mut l| {
        l.year_change = Some(year_change(&l));
        l
    });

    let (pe_highest, pe_lowest) = pe_extremes(&enriched, 1);
    let pe_highest = pe_highest.into_iter().next();
    let pe_lowest = pe_lowest.into_iter().next();

    info!("Validating data...");
    let report = validate(&enriched, &failed, &ValidationLimits::default());
    for line in &report.lines {
        info!("  {}", line);
    }
    if !report.passed {
        bail!("validation failed, build aborted");
    }

    let (gainer_sparkline, loser_sparkline) = pipeline::spotlight_sparklines(
        &source,
        spotlight_gainer.as_ref().map(|s| s.ticker.as_str()),
        spotlight_loser.as_ref().map(|s| s.ticker.as_str()),
    )
    .await;

    let build_date = Utc::now();

    if let Some(g) = &spotlight_gainer {
        info!("Top gainer: {} ({}) +{}%", g.name, g.ticker, g.change_pct);
    }
    if let Some(l) = &spotlight_loser {
        info!("Top loser:  {} ({}) {}%", l.name, l.ticker, l.change_pct);
    }
    match &pe_highest {
        Some(s) => info!("P/E high:   {} ({:.1}x)", s.name, s.pe.unwrap_or(0.0)),
        None => info!("P/E high: N/A"),
    }
    match &pe_lowest {
        Some(s) => info!("P/E low:    {} ({:.1}x)", s.name, s.pe.unwrap_or(0.0)),
        None => info!("P/E low: N/A"),
    }

    let html = templates::top25_page(
        &enriched,
        spotlight_gainer.as_ref(),
        spotlight_loser.as_ref(),
        pe_highest.as_ref(),
        pe_lowest.as_ref(),
        &gainer_sparkline,
        &loser_sparkline,
        build_date,
    );

    publisher::publish_top25(&config, &html, &enriched, &report, build_date)
        .context("publishing the site")?;

    Ok(())
}
