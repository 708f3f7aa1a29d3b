// ABOUTME: Format-specific listing extractors and the normalization helpers they share.
// ABOUTME: HTML result pages go through a selector fallback chain, README tables through a line scan.

//! Listing extraction module.
//!
//! Submodules:
//! - `compiled`: cached CSS selector compilation.
//! - `html`: search result page extraction.
//! - `markdown`: README pipe-table extraction.
//! - `normalize`: trimming, emptiness checks and result capping.

pub mod compiled;
pub mod html;
pub mod markdown;
pub mod normalize;
