// ABOUTME: Configuration options for the listing client and the ClientBuilder that applies them.
// ABOUTME: Defaults point at the public Indeed site and the SimplifyJobs internship README.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;

/// Browser identification sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Origin of the job search site. Relative result links are resolved against it.
pub const DEFAULT_INDEED_URL: &str = "https://www.indeed.com";

/// GitHub API endpoint returning the internship README.
pub const DEFAULT_GITHUB_README_URL: &str =
    "https://api.github.com/repos/SimplifyJobs/Summer2026-Internships/readme";

/// Default cap on search results.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Configuration options for the listing client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub indeed_url: String,
    pub github_readme_url: String,
    pub http_client: Option<reqwest::blocking::Client>,
    pub headers: HashMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            indeed_url: DEFAULT_INDEED_URL.to_string(),
            github_readme_url: DEFAULT_GITHUB_README_URL.to_string(),
            http_client: None,
            headers: HashMap::new(),
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the job search site origin (scheme, host and optional port).
    pub fn indeed_url(mut self, url: impl Into<String>) -> Self {
        self.opts.indeed_url = url.into();
        self
    }

    /// Set the README endpoint of the internship repository.
    pub fn github_readme_url(mut self, url: impl Into<String>) -> Self {
        self.opts.github_readme_url = url.into();
        self
    }

    /// Use a custom HTTP client. Timeout and user agent options are then ignored
    /// except for the per-request User-Agent header.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
