// ABOUTME: Pre-compiled CSS selector cache shared by all selector rules.
// ABOUTME: Avoids re-parsing the same rule selectors on every extraction call.

//! Selector caching for repeated DOM queries.
//!
//! Only compiled selectors are cached. Matches and listings are never kept
//! here, so extraction calls stay independent of one another.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::Selector;

/// Thread-safe cache of compiled CSS selectors. Invalid selectors are cached as `None`.
static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` if the selector does not parse. A poisoned lock falls back
/// to compiling without the cache.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    if let Ok(cache) = SELECTOR_CACHE.read() {
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    if let Ok(mut cache) = SELECTOR_CACHE.write() {
        // Another thread may have inserted while we compiled.
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
        cache.insert(css.to_string(), compiled.clone());
    }
    compiled
}

/// Precompiles a batch of selectors into the cache.
pub fn precompile_selectors<I, S>(selectors: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for css in selectors {
        let _ = get_or_compile(css.as_ref());
    }
}

/// Returns the number of cached selectors.
#[cfg(test)]
pub fn cache_size() -> usize {
    SELECTOR_CACHE.read().map(|c| c.len()).unwrap_or(0)
}
