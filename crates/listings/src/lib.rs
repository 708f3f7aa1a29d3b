// ABOUTME: Library entry point for jobscout listing extraction.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, the extractors, listing records and errors.

//! Jobscout - fetches job and internship listings from heterogeneous sources.
//!
//! Two pipelines share one output shape:
//! - search result pages (HTML) go through an ordered selector fallback chain
//!   and yield [`JobListing`]s;
//! - a curated README (Markdown pipe tables) is scanned line by line and yields
//!   [`InternshipListing`]s.
//!
//! Scrapes never fail loudly: the plain methods return an empty list on any
//! transport or parse failure, while the `try_*` methods report the cause.
//!
//! # Example
//!
//! ```no_run
//! use jobscout_listings::Client;
//!
//! let client = Client::builder().build();
//! for job in client.scrape_indeed("rust developer", "Remote", 10) {
//!     println!("{} -> {}", job.title, job.link);
//! }
//! ```

pub mod client;
pub mod error;
pub mod extractors;
pub mod models;
pub mod options;
pub mod readme;
pub mod resource;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extractors::html::{default_rules, resolve_link, HtmlListingExtractor, SelectorRule};
pub use crate::extractors::markdown::MarkdownTableExtractor;
pub use crate::models::{InternshipListing, JobListing};
pub use crate::options::{
    ClientBuilder, Options, DEFAULT_GITHUB_README_URL, DEFAULT_INDEED_URL, DEFAULT_MAX_RESULTS,
    DEFAULT_USER_AGENT,
};
pub use crate::readme::decode_readme;
