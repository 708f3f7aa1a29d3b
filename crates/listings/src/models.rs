// ABOUTME: Listing records produced by the extractors.
// ABOUTME: JobListing comes from search result pages, InternshipListing from README tables.

use serde::{Deserialize, Serialize};

/// A job found on a search results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    /// Absolute URL of the posting.
    pub link: String,
}

impl JobListing {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// An internship row taken from a README table, tagged with its section's company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipListing {
    pub company: String,
    pub role: String,
    pub location: String,
}

impl InternshipListing {
    pub fn new(
        company: impl Into<String>,
        role: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
            location: location.into(),
        }
    }
}
