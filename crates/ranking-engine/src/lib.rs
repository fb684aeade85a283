//! Pure ranking and validation logic for the stock watch pipelines.
//!
//! Everything in this crate is synchronous and side-effect free: the
//! binaries fetch quotes, hand them in here, and write whatever comes out.

pub mod engine;
pub mod validator;

pub use engine::{
    apply_year_change, enrich_top25, enrich_weekly, pe_extremes, rank_by_change,
    rank_by_market_cap, spotlights, year_change,
};
pub use validator::{missing_anchors, validate};
