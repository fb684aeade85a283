//! build-weekly: fetch quotes for the full SoCal roster, rank the week's
//! movers, and regenerate the weekly site.
//!
//! Usage:
//!   cargo run -p site-builder --bin build-weekly
//!
//! Reads data/socal_companies.json, keeps week-over-week state in
//! data/price_history.json, and writes the site to docs/.

use anyhow::{bail, Context};
use chrono::Utc;
use tracing::{info, warn};

use ranking_engine::{
    apply_year_change, enrich_weekly, missing_anchors, pe_extremes, rank_by_change,
};
use site_builder::publisher::{self, WeeklySite};
use site_builder::{config::SiteConfig, history, pipeline, templates};
use stockwatch_core::load_companies;
use yahoo_client::YahooClient;

/// Below this many quotes the data is too thin to publish.
const MIN_QUOTES: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "build_weekly=info,site_builder=info,yahoo_client=info".into()),
        )
        .init();

    info!("LA Stock Watch - Building site with live data");
    info!("{}", "=".repeat(50));

    let config = SiteConfig::weekly_from_env();
    let companies =
        load_companies(&config.companies_file()).context("loading the SoCal company roster")?;
    let tickers: Vec<String> = companies.iter().map(|c| c.ticker.clone()).collect();

    let previous_prices = history::load_price_history(&config.price_history_file())
        .context("loading price history")?;
    let is_first_run = previous_prices.is_empty();
    if is_first_run {
        info!("First run - no previous prices to compare");
        info!("(Next week's build will show true week-over-week change)");
    } else {
        info!(
            "Loaded {} previous prices for comparison",
            previous_prices.len()
        );
    }

    info!("Fetching market data for {} companies...", tickers.len());
    let source = YahooClient::new();
    let (quotes, failed) = source.fetch_quotes(&tickers).await;
    if !failed.is_empty() {
        warn!(
            "Failed to fetch {} tickers: {}",
            failed.len(),
            pipeline::summarize_failed(&failed, true)
        );
    }
    info!("Got quotes for {} companies", quotes.len());

    let missing = missing_anchors(&quotes);
    if !missing.is_empty() {
        warn!("{}", "=".repeat(60));
        warn!("ANCHOR COMPANY VALIDATION FAILED");
        warn!("{}", "=".repeat(60));
        for (ticker, name) in &missing {
            warn!("Missing anchor company: {} ({})", ticker, name);
        }
        warn!("These are major SoCal companies that should always be present.");
        warn!("Investigate why they failed to fetch before the next build.");
        warn!("{}", "=".repeat(60));
    }

    if quotes.len() < MIN_QUOTES {
        bail!(
            "too few quotes fetched ({} of {}), check network connection",
            quotes.len(),
            tickers.len()
        );
    }

    let (enriched, current_prices) = enrich_weekly(&companies, &quotes, &previous_prices);
    let (mut gainers, mut losers) = rank_by_change(&enriched);
    let (pe_highest, pe_lowest) = pe_extremes(&enriched, 3);
    apply_year_change(&mut gainers);
    apply_year_change(&mut losers);

    // The spotlight pair is simply the head of each ranked list.
    let spotlight_gainer = gainers.first().cloned();
    let spotlight_loser = losers.first().cloned();

    if let Some(g) = &spotlight_gainer {
        info!("Top gainer: {} ({}) +{}%", g.name, g.ticker, g.change_pct);
    }
    if let Some(l) = &spotlight_loser {
        info!("Top loser:  {} ({}) {}%", l.name, l.ticker, l.change_pct);
    }

    let (gainer_sparkline, loser_sparkline) = pipeline::spotlight_sparklines(
        &source,
        spotlight_gainer.as_ref().map(|s| s.ticker.as_str()),
        spotlight_loser.as_ref().map(|s| s.ticker.as_str()),
    )
    .await;

    let build_date = Utc::now();

    // Persist before publishing so a render problem never costs the snapshot.
    history::save_price_history(&config.price_history_file(), &current_prices, build_date)
        .context("saving price history")?;

    let index_html = templates::weekly_index(
        spotlight_gainer.as_ref(),
        spotlight_loser.as_ref(),
        &gainer_sparkline,
        &loser_sparkline,
        &pe_highest,
        &pe_lowest,
        build_date,
        is_first_run,
    );
    let rankings_html = templates::weekly_rankings(&gainers, &losers, build_date);

    publisher::publish_weekly(
        &config,
        &WeeklySite {
            index_html,
            rankings_html,
        },
    )
    .context("publishing the site")?;

    Ok(())
}
