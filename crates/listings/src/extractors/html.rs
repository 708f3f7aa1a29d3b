// ABOUTME: Extracts job title/link pairs from search result pages using an ordered selector fallback chain.
// ABOUTME: The first rule with any match wins; relative links are resolved against the site origin.

//! Search result page extraction.
//!
//! Result pages change structure often, so several known layouts are tried as
//! an ordered list of [`SelectorRule`]s:
//! - Rules are tried in order; the first rule yielding at least one element wins
//!   and later rules are not consulted, even if the winner yields no valid listing.
//! - At most `max_results` matched elements are read from the winning rule.
//! - An element becomes a listing only if both its text and link are non-empty.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::extractors::compiled::{get_or_compile, precompile_selectors};
use crate::extractors::normalize::{cap, non_empty, normalize_whitespace};
use crate::models::JobListing;

/// Known result-link layouts, highest priority first.
pub const DEFAULT_RULES: &[(&str, &str)] = &[
    ("spinner-anchor", "a[data-hide-spinner='true']"),
    ("job-title-heading", "h2.jobTitle a"),
    ("job-key-anchor", "a[data-jk]"),
    ("job-beacon-card", ".job_seen_beacon a"),
    ("job-title-class", ".jobTitle a"),
];

/// A structural pattern locating candidate result links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorRule {
    pub name: String,
    pub css: String,
}

impl SelectorRule {
    pub fn new(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            css: css.into(),
        }
    }

    /// Elements matching this rule, in document order. An invalid selector matches nothing.
    pub fn matches<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        match get_or_compile(&self.css) {
            Some(selector) => doc.select(&selector).collect(),
            None => Vec::new(),
        }
    }
}

/// The default rule chain built from [`DEFAULT_RULES`].
pub fn default_rules() -> Vec<SelectorRule> {
    DEFAULT_RULES
        .iter()
        .map(|(name, css)| SelectorRule::new(*name, *css))
        .collect()
}

/// Resolves a result link against `origin`.
///
/// Links starting with `/` are prefixed with the origin; anything else is
/// returned unchanged.
pub fn resolve_link(origin: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct HtmlListingExtractor {
    origin: String,
    rules: Vec<SelectorRule>,
    link_attr: String,
}

impl HtmlListingExtractor {
    /// Creates an extractor with the default rule chain, reading links from `href`.
    pub fn new(origin: impl Into<String>) -> Self {
        let rules = default_rules();
        precompile_selectors(rules.iter().map(|r| r.css.as_str()));
        Self {
            origin: origin.into(),
            rules,
            link_attr: "href".to_string(),
        }
    }

    /// Replaces the rule chain.
    pub fn with_rules(mut self, rules: Vec<SelectorRule>) -> Self {
        precompile_selectors(rules.iter().map(|r| r.css.as_str()));
        self.rules = rules;
        self
    }

    /// Sets the attribute the raw link is read from.
    pub fn link_attr(mut self, attr: impl Into<String>) -> Self {
        self.link_attr = attr.into();
        self
    }

    /// Extracts up to `max_results` listings from a parsed document.
    pub fn extract(&self, doc: &Html, max_results: usize) -> Vec<JobListing> {
        let winner = self.rules.iter().find_map(|rule| {
            let matches = rule.matches(doc);
            if matches.is_empty() {
                debug!(rule = %rule.name, "selector rule matched nothing");
                None
            } else {
                Some((rule, matches))
            }
        });

        let Some((rule, matches)) = winner else {
            debug!("no selector rule matched");
            return Vec::new();
        };

        debug!(rule = %rule.name, matched = matches.len(), "using selector rule");
        cap(matches, max_results)
            .into_iter()
            .filter_map(|el| self.listing_from(el))
            .collect()
    }

    /// Parses `html` and extracts up to `max_results` listings.
    pub fn extract_str(&self, html: &str, max_results: usize) -> Vec<JobListing> {
        let doc = Html::parse_document(html);
        self.extract(&doc, max_results)
    }

    /// Builds a listing from a matched element.
    ///
    /// The title is the element's text with every whitespace run collapsed to a
    /// single space, which goes further than trimming the ends: `Dev\n  Ops`
    /// becomes `Dev Ops`. The link attribute is trimmed before resolution.
    fn listing_from(&self, el: ElementRef<'_>) -> Option<JobListing> {
        let title = non_empty(&normalize_whitespace(&el.text().collect::<String>()))?;
        let href = non_empty(el.value().attr(&self.link_attr)?)?;
        Some(JobListing::new(title, resolve_link(&self.origin, &href)))
    }
}
