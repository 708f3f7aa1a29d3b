// ABOUTME: Decodes the GitHub "get repository README" API response into Markdown text.
// ABOUTME: The payload carries the file as base64 wrapped across lines.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;

use crate::error::ScrapeError;

/// The subset of the README API response that is used.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmePayload {
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Parses the API response body and returns the decoded README text.
///
/// `url` is only used for error reporting.
pub fn decode_readme(url: &str, body: &[u8]) -> Result<String, ScrapeError> {
    let payload: ReadmePayload = serde_json::from_slice(body).map_err(|e| {
        ScrapeError::parse(url, "DecodeReadme", Some(anyhow::anyhow!("invalid JSON: {}", e)))
    })?;

    if let Some(encoding) = payload.encoding.as_deref() {
        if encoding != "base64" {
            return Err(ScrapeError::parse(
                url,
                "DecodeReadme",
                Some(anyhow::anyhow!("unsupported content encoding {:?}", encoding)),
            ));
        }
    }

    let compact: String = payload
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = BASE64.decode(compact.as_bytes()).map_err(|e| {
        ScrapeError::parse(url, "DecodeReadme", Some(anyhow::anyhow!("invalid base64: {}", e)))
    })?;

    String::from_utf8(bytes).map_err(|e| {
        ScrapeError::parse(url, "DecodeReadme", Some(anyhow::anyhow!("invalid UTF-8: {}", e)))
    })
}
