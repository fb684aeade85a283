//! Merging, week-over-week change, and the ranked views.

use std::cmp::Ordering;
use std::collections::HashMap;

use stockwatch_core::{Company, EnrichedStock, Quote};

/// How many entries each ranked list carries.
pub const RANKING_SIZE: usize = 25;

/// Weeks in a year, used to approximate a weekly move on the first run.
const WEEKS_PER_YEAR: f64 = 52.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Merges quotes with the weekly universe and computes week-over-week change
/// against the persisted snapshot of last run's prices.
///
/// Quotes whose symbol is not in `companies` are dropped. Returns the
/// enriched stocks (in quote order, ranks unset) together with the current
/// price of every merged ticker, which the caller persists for next week.
pub fn enrich_weekly(
    companies: &[Company],
    quotes: &[Quote],
    previous_prices: &HashMap<String, f64>,
) -> (Vec<EnrichedStock>, HashMap<String, f64>) {
    let company_map: HashMap<&str, &Company> =
        companies.iter().map(|c| (c.ticker.as_str(), c)).collect();

    let mut enriched = Vec::new();
    let mut current_prices = HashMap::new();

    for quote in quotes {
        let meta = match company_map.get(quote.symbol.as_str()) {
            Some(meta) => meta,
            None => continue,
        };

        current_prices.insert(quote.symbol.clone(), quote.price);

        let change_pct = match previous_prices.get(&quote.symbol) {
            Some(&previous) if previous > 0.0 => (quote.price - previous) / previous * 100.0,
            _ if quote.year_low > 0.0 => {
                // No snapshot yet: approximate one week of the distance
                // travelled from the 52-week low.
                (quote.price - quote.year_low) / quote.year_low * 100.0 / WEEKS_PER_YEAR
            }
            _ => 0.0,
        };

        enriched.push(EnrichedStock {
            rank: 0,
            name: meta.name.clone(),
            ticker: quote.symbol.clone(),
            city: meta.city.clone(),
            county: None,
            price: quote.price,
            change_pct: round2(change_pct),
            year_high: quote.year_high,
            year_low: quote.year_low,
            market_cap: quote.market_cap,
            pe: quote.pe,
            volume: quote.volume,
            year_change: None,
            yahoo_url: None,
        });
    }

    (enriched, current_prices)
}

/// Merges quotes with the curated top-25 universe, preserving roster order.
///
/// Change here comes from the quote's own trailing week-ago close; a missing
/// or non-positive week-ago close yields a flat 0.0 rather than a guess.
pub fn enrich_top25(companies: &[Company], quotes: &[Quote]) -> Vec<EnrichedStock> {
    let quote_map: HashMap<&str, &Quote> =
        quotes.iter().map(|q| (q.symbol.as_str(), q)).collect();

    let mut enriched = Vec::new();
    for company in companies {
        let quote = match quote_map.get(company.ticker.as_str()) {
            Some(quote) => quote,
            None => continue,
        };

        let change_pct = match quote.week_ago_price {
            Some(week_ago) if week_ago > 0.0 => (quote.price - week_ago) / week_ago * 100.0,
            _ => 0.0,
        };

        enriched.push(EnrichedStock {
            rank: 0,
            name: company.name.clone(),
            ticker: company.ticker.clone(),
            city: company.city.clone(),
            county: company.county.clone(),
            price: quote.price,
            change_pct: round2(change_pct),
            year_high: quote.year_high,
            year_low: quote.year_low,
            market_cap: quote.market_cap,
            pe: quote.pe,
            volume: quote.volume,
            year_change: None,
            yahoo_url: Some(format!(
                "https://finance.yahoo.com/quote/{}/",
                company.ticker
            )),
        });
    }

    enriched
}

/// Top gainers and top losers by weekly change, each capped at
/// [`RANKING_SIZE`] and ranked 1..N.
///
/// Both lists come from independent stable sorts of the merged input, so
/// stocks with equal change keep their merge order in both directions.
pub fn rank_by_change(enriched: &[EnrichedStock]) -> (Vec<EnrichedStock>, Vec<EnrichedStock>) {
    let mut descending = enriched.to_vec();
    descending.sort_by(|a, b| b.change_pct.partial_cmp(&a.change_pct).unwrap_or(Ordering::Equal));

    let mut ascending = enriched.to_vec();
    ascending.sort_by(|a, b| a.change_pct.partial_cmp(&b.change_pct).unwrap_or(Ordering::Equal));

    let mut gainers: Vec<EnrichedStock> = descending.into_iter().take(RANKING_SIZE).collect();
    for (i, stock) in gainers.iter_mut().enumerate() {
        stock.rank = (i + 1) as u32;
    }

    let mut losers: Vec<EnrichedStock> = ascending.into_iter().take(RANKING_SIZE).collect();
    for (i, stock) in losers.iter_mut().enumerate() {
        stock.rank = (i + 1) as u32;
    }

    (gainers, losers)
}

/// Orders the whole list by market cap, largest first, and assigns dense
/// ranks 1..N. Stocks with no reported cap (0.0) land at the bottom.
pub fn rank_by_market_cap(mut enriched: Vec<EnrichedStock>) -> Vec<EnrichedStock> {
    enriched.sort_by(|a, b| b.market_cap.partial_cmp(&a.market_cap).unwrap_or(Ordering::Equal));
    for (i, stock) in enriched.iter_mut().enumerate() {
        stock.rank = (i + 1) as u32;
    }
    enriched
}

/// The single biggest gainer and biggest loser of the week.
///
/// Both are `None` only when the input is empty; with one stock the same
/// entry plays both roles.
pub fn spotlights(enriched: &[EnrichedStock]) -> (Option<EnrichedStock>, Option<EnrichedStock>) {
    let mut by_change: Vec<&EnrichedStock> = enriched.iter().collect();
    by_change.sort_by(|a, b| b.change_pct.partial_cmp(&a.change_pct).unwrap_or(Ordering::Equal));

    let gainer = by_change.first().map(|s| (*s).clone());
    let loser = by_change.last().map(|s| (*s).clone());
    (gainer, loser)
}

/// The `count` highest and `count` lowest positive P/E ratios.
///
/// Stocks with no P/E or a non-positive one are excluded entirely. When
/// fewer than `2 * count` stocks qualify the two lists overlap.
pub fn pe_extremes(
    enriched: &[EnrichedStock],
    count: usize,
) -> (Vec<EnrichedStock>, Vec<EnrichedStock>) {
    let mut with_pe: Vec<EnrichedStock> = enriched
        .iter()
        .filter(|s| s.pe.map_or(false, |pe| pe > 0.0))
        .cloned()
        .collect();
    with_pe.sort_by(|a, b| b.pe.partial_cmp(&a.pe).unwrap_or(Ordering::Equal));

    let highest: Vec<EnrichedStock> = with_pe.iter().take(count).cloned().collect();
    let lowest: Vec<EnrichedStock> = with_pe[with_pe.len().saturating_sub(count)..].to_vec();
    (highest, lowest)
}

/// Percent distance of the current price from the 52-week low, one decimal.
/// A missing or zero low yields 0.0.
pub fn year_change(stock: &EnrichedStock) -> f64 {
    if stock.year_low > 0.0 {
        round1((stock.price - stock.year_low) / stock.year_low * 100.0)
    } else {
        0.0
    }
}

/// Fills in `year_change` for every stock in a ranked list.
pub fn apply_year_change(stocks: &mut [EnrichedStock]) {
    for stock in stocks.iter_mut() {
        stock.year_change = Some(year_change(stock));
    }
}
