//! Everything between "quotes are in hand" and "the site is on disk":
//! configuration, the price-history file, page rendering, and publishing.

pub mod config;
pub mod format;
pub mod history;
pub mod pipeline;
pub mod publisher;
pub mod templates;

pub use config::SiteConfig;
