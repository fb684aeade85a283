//! Writes rendered pages, data handoffs, and static assets to the output
//! directory.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use stockwatch_core::{EnrichedStock, ValidationReport, WatchError};
use tracing::info;

use crate::config::SiteConfig;
use crate::format;

/// The two rendered pages of the weekly site.
pub struct WeeklySite {
    pub index_html: String,
    pub rankings_html: String,
}

/// Shape of `top25.json`, the machine-readable handoff.
#[derive(Serialize)]
pub struct Top25Handoff<'a> {
    pub build_date: DateTime<Utc>,
    pub companies: &'a [EnrichedStock],
}

/// Writes the weekly site: both pages plus a fresh copy of static assets.
pub fn publish_weekly(config: &SiteConfig, site: &WeeklySite) -> Result<(), WatchError> {
    fs::create_dir_all(&config.output_dir)?;
    fs::write(config.output_dir.join("index.html"), &site.index_html)?;
    fs::write(config.output_dir.join("rankings.html"), &site.rankings_html)?;
    copy_static(&config.static_dir, &config.output_dir)?;

    info!("Site built -> {}", config.output_dir.display());
    info!(
        "  index.html    ({} bytes)",
        format::count(site.index_html.len() as u64)
    );
    info!(
        "  rankings.html ({} bytes)",
        format::count(site.rankings_html.len() as u64)
    );
    Ok(())
}

/// Writes the top-25 site: the page, the JSON handoff, the verification log,
/// and a fresh copy of static assets.
pub fn publish_top25(
    config: &SiteConfig,
    html: &str,
    companies: &[EnrichedStock],
    report: &ValidationReport,
    build_date: DateTime<Utc>,
) -> Result<(), WatchError> {
    fs::create_dir_all(&config.output_dir)?;
    fs::write(config.output_dir.join("index.html"), html)?;

    let handoff = Top25Handoff {
        build_date,
        companies,
    };
    fs::write(
        config.output_dir.join("top25.json"),
        serde_json::to_string_pretty(&handoff)?,
    )?;

    let mut lines = vec![
        format!("Build: {} UTC", build_date.format("%Y-%m-%d %H:%M")),
        "-".repeat(40),
    ];
    lines.extend(report.lines.iter().cloned());
    fs::write(config.output_dir.join("verification.txt"), lines.join("\n"))?;

    copy_static(&config.static_dir, &config.output_dir)?;

    info!("Site built -> {}", config.output_dir.display());
    info!("  index.html        ({} bytes)", format::count(html.len() as u64));
    info!("  top25.json        (data handoff)");
    info!("  verification.txt  (validation log)");
    Ok(())
}

/// Replaces `<output>/static` with the contents of the source static dir.
fn copy_static(static_dir: &Path, output_dir: &Path) -> Result<(), WatchError> {
    let target = output_dir.join("static");
    if target.exists() {
        fs::remove_dir_all(&target)?;
    }
    copy_tree(static_dir, &target)
}

fn copy_tree(from: &Path, to: &Path) -> Result<(), WatchError> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
