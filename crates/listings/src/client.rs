// ABOUTME: The Client that fetches both listing sources and runs the matching extractor.
// ABOUTME: Offers try_* methods returning Result and plain methods that degrade to an empty list.

use std::collections::HashMap;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::ScrapeError;
use crate::extractors::html::HtmlListingExtractor;
use crate::extractors::markdown::MarkdownTableExtractor;
use crate::models::{InternshipListing, JobListing};
use crate::options::{ClientBuilder, Options};
use crate::readme::decode_readme;
use crate::resource::{fetch, FetchOptions, FetchResult};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Extracts the base domain (scheme + host + optional port) from a URL.
fn base_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    match parsed.port() {
        Some(port) => Some(format!("{}://{}:{}", parsed.scheme(), host, port)),
        None => Some(format!("{}://{}", parsed.scheme(), host)),
    }
}

/// Fetches listing sources and extracts listings from them.
///
/// Every scrape performs exactly one blocking GET and keeps no state between calls.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: Option<reqwest::blocking::Client>,
}

impl Client {
    /// Create a ClientBuilder for configuring a new Client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    ///
    /// If the HTTP client cannot be built, every fetch fails with a transport error.
    pub fn new(opts: Options) -> Self {
        let http_client = match opts.http_client.clone() {
            Some(client) => Some(client),
            None => match reqwest::blocking::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
            {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!(error = %e, "failed to build HTTP client");
                    None
                }
            },
        };

        Self { opts, http_client }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Origin that relative result links are resolved against.
    pub fn indeed_origin(&self) -> String {
        base_domain(&self.opts.indeed_url)
            .unwrap_or_else(|| self.opts.indeed_url.trim_end_matches('/').to_string())
    }

    /// Builds `<origin>/jobs?q=<keywords>&l=<location>`.
    ///
    /// Keywords are split on whitespace and joined with `+` by form encoding.
    pub fn indeed_search_url(&self, keywords: &str, location: &str) -> Result<Url, ScrapeError> {
        let origin = self.indeed_origin();
        let mut url = Url::parse(&origin).map_err(|e| {
            ScrapeError::invalid_url(
                &self.opts.indeed_url,
                "SearchUrl",
                Some(anyhow::anyhow!("invalid URL: {}", e)),
            )
        })?;

        let query = keywords.split_whitespace().collect::<Vec<_>>().join(" ");
        url.set_path("/jobs");
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("l", location);
        Ok(url)
    }

    /// Fetches the search results page and extracts up to `max_results` job listings.
    pub fn try_scrape_indeed(
        &self,
        keywords: &str,
        location: &str,
        max_results: usize,
    ) -> Result<Vec<JobListing>, ScrapeError> {
        let url = self.indeed_search_url(keywords, location)?;
        debug!(url = %url, "fetching search results");

        let page = self.get(url.as_str(), &[])?;
        debug!(status = page.status, bytes = page.body.len(), "fetched search results");
        let jobs = self.parse_indeed_html(&page.text_utf8(), max_results);
        info!(count = jobs.len(), "found job listings");
        Ok(jobs)
    }

    /// Like [`Client::try_scrape_indeed`], but any failure yields an empty list.
    pub fn scrape_indeed(&self, keywords: &str, location: &str, max_results: usize) -> Vec<JobListing> {
        match self.try_scrape_indeed(keywords, location, max_results) {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!(error = %e, "error scraping search results");
                Vec::new()
            }
        }
    }

    /// Extracts job listings from an already fetched results page.
    pub fn parse_indeed_html(&self, html: &str, max_results: usize) -> Vec<JobListing> {
        HtmlListingExtractor::new(self.indeed_origin()).extract_str(html, max_results)
    }

    /// Fetches the internship README through the GitHub API and extracts its rows.
    pub fn try_scrape_github_internships(&self) -> Result<Vec<InternshipListing>, ScrapeError> {
        let url = self.opts.github_readme_url.as_str();
        debug!(url, "fetching internship README");

        let response = self.get(url, &[("Accept", GITHUB_ACCEPT)])?;
        debug!(status = response.status, bytes = response.body.len(), "fetched README payload");
        let text = decode_readme(url, &response.body)?;
        info!(chars = text.chars().count(), "downloaded internship README");

        let listings = self.parse_internships_markdown(&text);
        info!(count = listings.len(), "found internship listings");
        Ok(listings)
    }

    /// Like [`Client::try_scrape_github_internships`], but any failure yields an empty list.
    pub fn scrape_github_internships(&self) -> Vec<InternshipListing> {
        match self.try_scrape_github_internships() {
            Ok(listings) => listings,
            Err(e) => {
                warn!(error = %e, "error scraping GitHub internships");
                Vec::new()
            }
        }
    }

    /// Extracts internship listings from already fetched README text.
    pub fn parse_internships_markdown(&self, text: &str) -> Vec<InternshipListing> {
        MarkdownTableExtractor::new().extract(text)
    }

    fn get(&self, url: &str, extra: &[(&str, &str)]) -> Result<FetchResult, ScrapeError> {
        let Some(http_client) = self.http_client.as_ref() else {
            return Err(ScrapeError::transport(
                url,
                "Fetch",
                Some(anyhow::anyhow!("HTTP client unavailable")),
            ));
        };

        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), self.opts.user_agent.clone());
        for (key, value) in extra {
            headers.insert(key.to_string(), value.to_string());
        }
        for (key, value) in &self.opts.headers {
            headers.insert(key.clone(), value.clone());
        }

        fetch(http_client, url, &FetchOptions { headers })
    }
}
