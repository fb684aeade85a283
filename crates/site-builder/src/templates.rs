//! Static HTML rendering. Pages are assembled from format! fragments so the
//! output needs nothing at runtime beyond the stylesheet.

use chrono::{DateTime, Datelike, Utc};
use stockwatch_core::EnrichedStock;

use crate::format;

const SPARKLINE_JS: &str = r#"function drawSparkline(id, points) {
  const canvas = document.getElementById(id);
  if (!canvas || points.length < 2) return;
  const ctx = canvas.getContext("2d");
  const min = Math.min(...points);
  const max = Math.max(...points);
  const span = max - min || 1;
  const w = canvas.width;
  const h = canvas.height;
  ctx.beginPath();
  points.forEach((p, i) => {
    const x = 2 + (i / (points.length - 1)) * (w - 4);
    const y = h - 3 - ((p - min) / span) * (h - 6);
    if (i === 0) {
      ctx.moveTo(x, y);
    } else {
      ctx.lineTo(x, y);
    }
  });
  ctx.strokeStyle = getComputedStyle(canvas).color;
  ctx.lineWidth = 2;
  ctx.stroke();
}
drawSparkline("gainer-sparkline", sparklines.gainer);
drawSparkline("loser-sparkline", sparklines.loser);"#;

/// Homepage of the weekly site: the spotlight pair and the P/E extremes.
#[allow(clippy::too_many_arguments)]
pub fn weekly_index(
    spotlight_gainer: Option<&EnrichedStock>,
    spotlight_loser: Option<&EnrichedStock>,
    gainer_sparkline: &[f64],
    loser_sparkline: &[f64],
    pe_highest: &[EnrichedStock],
    pe_lowest: &[EnrichedStock],
    build_date: DateTime<Utc>,
    is_first_run: bool,
) -> String {
    let notice = if is_first_run {
        r#"<aside class="notice">
  <p>First build: weekly change is approximated from each stock's distance off
  its 52-week low. Next week's build will show true week-over-week movement.</p>
</aside>
"#
    } else {
        ""
    };

    let gainer_card = spotlight_gainer
        .map(|s| spotlight_card(s, "Gainer of the week", "gainer"))
        .unwrap_or_default();
    let loser_card = spotlight_loser
        .map(|s| spotlight_card(s, "Loser of the week", "loser"))
        .unwrap_or_default();

    let main = format!(
        r#"{notice}<section class="spotlights">
{gainer_card}
{loser_card}
</section>
<section class="pe-extremes">
  <h2>P/E Extremes</h2>
  <div class="pe-columns">
{high_list}
{low_list}
  </div>
</section>"#,
        high_list = pe_list("Richest multiples", pe_highest),
        low_list = pe_list("Cheapest multiples", pe_lowest),
    );

    let script = format!(
        "<script>\n{}\n</script>",
        sparkline_script(gainer_sparkline, loser_sparkline)
    );
    weekly_page("LA Stock Watch", "index", &main, build_date, &script)
}

/// The gainers/losers tables of the weekly site.
pub fn weekly_rankings(
    gainers: &[EnrichedStock],
    losers: &[EnrichedStock],
    build_date: DateTime<Utc>,
) -> String {
    let main = format!(
        "{}\n{}",
        ranking_table("Top 25 Gainers", "gainers", gainers),
        ranking_table("Top 25 Losers", "losers", losers),
    );
    weekly_page("Rankings - LA Stock Watch", "rankings", &main, build_date, "")
}

/// The single-page top-25 site: spotlights, valuation extremes, and the
/// full market-cap table.
#[allow(clippy::too_many_arguments)]
pub fn top25_page(
    companies: &[EnrichedStock],
    spotlight_gainer: Option<&EnrichedStock>,
    spotlight_loser: Option<&EnrichedStock>,
    pe_highest: Option<&EnrichedStock>,
    pe_lowest: Option<&EnrichedStock>,
    gainer_sparkline: &[f64],
    loser_sparkline: &[f64],
    build_date: DateTime<Utc>,
) -> String {
    let gainer_card = spotlight_gainer
        .map(|s| spotlight_card(s, "7-day gainer", "gainer"))
        .unwrap_or_default();
    let loser_card = spotlight_loser
        .map(|s| spotlight_card(s, "7-day loser", "loser"))
        .unwrap_or_default();
    let rows: String = companies.iter().map(top25_row).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>LA Stock Watch: Top 25</title>
<link rel="stylesheet" href="static/style.css">
</head>
<body class="top25">
<header class="site-header">
  <div class="masthead">
    <h1>LA Stock Watch: Top 25</h1>
    <p class="tagline">Southern California's largest public companies, ranked by market cap</p>
  </div>
</header>
<main>
<section class="spotlights">
{gainer_card}
{loser_card}
</section>
<section class="pe-extremes">
  <h2>Valuation extremes</h2>
  <div class="pe-columns">
{high_card}
{low_card}
  </div>
</section>
<section class="cap-table">
  <h2>The Top 25</h2>
  <table>
    <thead>
      <tr><th>#</th><th>Company</th><th>HQ</th><th>Price</th><th>7-day</th><th>Market cap</th><th>P/E</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
</section>
</main>
<footer>
  <p>Data from Yahoo Finance. Built {date} UTC &middot; validation log in <a href="verification.txt">verification.txt</a>.</p>
  <p>&copy; {year} LA Stock Watch</p>
</footer>
<script>
{script}
</script>
</body>
</html>"#,
        high_card = pe_card("Highest P/E", pe_highest),
        low_card = pe_card("Lowest P/E", pe_lowest),
        date = build_date.format("%Y-%m-%d %H:%M"),
        year = build_date.year(),
        script = sparkline_script(gainer_sparkline, loser_sparkline),
    )
}

fn weekly_page(
    title: &str,
    active: &str,
    main: &str,
    build_date: DateTime<Utc>,
    script: &str,
) -> String {
    let nav_week = if active == "index" { r#" class="active""# } else { "" };
    let nav_rankings = if active == "rankings" { r#" class="active""# } else { "" };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="static/style.css">
</head>
<body>
<header class="site-header">
  <div class="masthead">
    <h1>LA Stock Watch</h1>
    <p class="tagline">Weekly movers across Southern California's public companies</p>
  </div>
  <nav>
    <a href="index.html"{nav_week}>This Week</a>
    <a href="rankings.html"{nav_rankings}>Rankings</a>
  </nav>
</header>
<main>
{main}
</main>
<footer>
  <p>Data from Yahoo Finance. Updated {date}.</p>
  <p>&copy; {year} LA Stock Watch</p>
</footer>
{script}
</body>
</html>"#,
        date = build_date.format("%B %d, %Y"),
        year = build_date.year(),
    )
}

fn spotlight_card(stock: &EnrichedStock, label: &str, kind: &str) -> String {
    let year_note = stock
        .year_change
        .map(|yc| format!(r#"<p class="year-note">{yc:+.1}% off its 52-week low</p>"#))
        .unwrap_or_default();

    format!(
        r#"<article class="spotlight {kind}">
  <p class="label">{label}</p>
  <div class="identity">
    <span class="avatar">{avatar}</span>
    <div>
      <h2>{name}</h2>
      <p class="meta">{ticker} &middot; {city}</p>
    </div>
  </div>
  <p class="quote"><span class="price">{price}</span> <span class="change {dir}">{change:+.2}%</span></p>
  <canvas id="{kind}-sparkline" width="240" height="56"></canvas>
  {year_note}
  <dl class="facts">
    <div><dt>Market cap</dt><dd>{cap}</dd></div>
    <div><dt>P/E</dt><dd>{pe}</dd></div>
    <div><dt>52-week</dt><dd>{low} &ndash; {high}</dd></div>
  </dl>
</article>"#,
        avatar = format::initials(&stock.name),
        name = escape(&stock.name),
        ticker = stock.ticker,
        city = escape(&stock.city),
        price = format::price(stock.price),
        dir = change_class(stock.change_pct),
        change = stock.change_pct,
        cap = format::market_cap(stock.market_cap),
        pe = format::pe(stock.pe),
        low = format::price(stock.year_low),
        high = format::price(stock.year_high),
    )
}

fn pe_list(title: &str, stocks: &[EnrichedStock]) -> String {
    let items: String = stocks
        .iter()
        .map(|s| {
            format!(
                "      <li><span class=\"avatar\">{avatar}</span> {name} <span class=\"ticker\">{ticker}</span><span class=\"value\">{pe}</span></li>\n",
                avatar = format::initials(&s.name),
                name = escape(&s.name),
                ticker = s.ticker,
                pe = format::pe(s.pe),
            )
        })
        .collect();

    format!(
        r#"    <div class="pe-list">
      <h3>{title}</h3>
      <ul>
{items}      </ul>
    </div>"#
    )
}

fn pe_card(title: &str, stock: Option<&EnrichedStock>) -> String {
    match stock {
        Some(s) => format!(
            r#"    <div class="pe-card">
      <h3>{title}</h3>
      <p><span class="avatar">{avatar}</span> {name} <span class="ticker">{ticker}</span></p>
      <p class="value">{pe}</p>
    </div>"#,
            avatar = format::initials(&s.name),
            name = escape(&s.name),
            ticker = s.ticker,
            pe = format::pe(s.pe),
        ),
        None => format!(
            r#"    <div class="pe-card">
      <h3>{title}</h3>
      <p class="value">N/A</p>
    </div>"#
        ),
    }
}

fn ranking_table(title: &str, id: &str, stocks: &[EnrichedStock]) -> String {
    let rows: String = stocks.iter().map(ranking_row).collect();
    format!(
        r#"<section class="rankings" id="{id}">
  <h2>{title}</h2>
  <table>
    <thead>
      <tr><th>#</th><th>Company</th><th>Price</th><th>Weekly</th><th>52-week</th><th>Market cap</th><th>Volume</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
</section>"#
    )
}

fn ranking_row(stock: &EnrichedStock) -> String {
    let year_cell = match stock.year_change {
        Some(yc) => format!("{yc:+.1}%"),
        None => "&mdash;".to_string(),
    };

    format!(
        r#"      <tr>
        <td class="rank">{rank}</td>
        <td class="company"><span class="avatar">{avatar}</span><div><span class="name">{name}</span><span class="meta">{ticker} &middot; {city}</span></div></td>
        <td>{price}</td>
        <td class="change {dir}">{change:+.2}%</td>
        <td>{year_cell}</td>
        <td>{cap}</td>
        <td>{volume}</td>
      </tr>
"#,
        rank = stock.rank,
        avatar = format::initials(&stock.name),
        name = escape(&stock.name),
        ticker = stock.ticker,
        city = escape(&stock.city),
        price = format::price(stock.price),
        dir = change_class(stock.change_pct),
        change = stock.change_pct,
        cap = format::market_cap(stock.market_cap),
        volume = format::count(stock.volume),
    )
}

fn top25_row(stock: &EnrichedStock) -> String {
    let name_cell = match &stock.yahoo_url {
        Some(url) => format!(
            r#"<a href="{url}" target="_blank" rel="noopener">{}</a>"#,
            escape(&stock.name)
        ),
        None => escape(&stock.name),
    };
    let hq = match &stock.county {
        Some(county) => format!("{}, {} County", escape(&stock.city), escape(county)),
        None => escape(&stock.city),
    };

    format!(
        r#"      <tr>
        <td class="rank">{rank}</td>
        <td class="company"><span class="avatar">{avatar}</span><div><span class="name">{name_cell}</span><span class="meta">{ticker}</span></div></td>
        <td>{hq}</td>
        <td>{price}</td>
        <td class="change {dir}">{change:+.2}%</td>
        <td>{cap}</td>
        <td>{pe}</td>
      </tr>
"#,
        rank = stock.rank,
        avatar = format::initials(&stock.name),
        ticker = stock.ticker,
        price = format::price(stock.price),
        dir = change_class(stock.change_pct),
        change = stock.change_pct,
        cap = format::market_cap(stock.market_cap),
        pe = format::pe(stock.pe),
    )
}

fn sparkline_script(gainer: &[f64], loser: &[f64]) -> String {
    format!(
        "const sparklines = {{ gainer: {}, loser: {} }};\n{}",
        json_array(gainer),
        json_array(loser),
        SPARKLINE_JS,
    )
}

fn json_array(values: &[f64]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

fn change_class(change: f64) -> &'static str {
    if change >= 0.0 {
        "up"
    } else {
        "down"
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
