// ABOUTME: Resource handling module for fetching listing sources over HTTP.
// ABOUTME: Performs a single blocking GET with content-length limits and charset decoding.

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::ScrapeError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as text, using the charset from the content-type header when present.
    pub fn text_utf8(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

/// Fetch a resource from the given URL.
///
/// Any non-2xx status is a transport error. No retry is attempted.
pub fn fetch(
    client: &reqwest::blocking::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, ScrapeError> {
    if url.is_empty() {
        return Err(ScrapeError::invalid_url(url, "Fetch", None));
    }

    let parsed_url = url::Url::parse(url).map_err(|e| {
        ScrapeError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ScrapeError::invalid_url(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    let mut request = client.get(parsed_url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request.send().map_err(|e| {
        ScrapeError::transport(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", e)))
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::transport(
            url,
            "Fetch",
            Some(anyhow::anyhow!("HTTP status {}", status.as_u16())),
        ));
    }

    if let Some(len) = response.content_length() {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(ScrapeError::transport(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response.bytes().map_err(|e| {
        ScrapeError::transport(
            url,
            "Fetch",
            Some(anyhow::anyhow!("failed to read body: {}", e)),
        )
    })?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(ScrapeError::transport(
            url,
            "Fetch",
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    Ok(FetchResult {
        status: status.as_u16(),
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn create_test_client() -> reqwest::blocking::Client {
        reqwest::blocking::Client::builder()
            .user_agent("test-agent")
            .build()
            .unwrap()
    }

    #[test]
    fn test_fetch_ok_utf8() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/test");
            then.status(200)
                .header("content-type", "text/plain; charset=utf-8")
                .body("hello");
        });

        let client = create_test_client();
        let result = fetch(&client, &server.url("/test"), &FetchOptions::default());
        mock.assert();

        let result = result.expect("fetch should succeed");
        assert_eq!(result.status, 200);
        assert_eq!(result.text_utf8(), "hello");
    }

    #[test]
    fn test_fetch_sends_custom_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/readme")
                .header("accept", "application/vnd.github.v3+json");
            then.status(200).body("{}");
        });

        let mut headers = HashMap::new();
        headers.insert(
            "Accept".to_string(),
            "application/vnd.github.v3+json".to_string(),
        );
        let opts = FetchOptions { headers };

        let result = fetch(&create_test_client(), &server.url("/readme"), &opts);
        mock.assert();
        assert!(result.is_ok());
    }

    #[test]
    fn test_fetch_non_2xx_is_transport_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/blocked");
            then.status(403).body("forbidden");
        });

        let result = fetch(
            &create_test_client(),
            &server.url("/blocked"),
            &FetchOptions::default(),
        );
        mock.assert();

        let err = result.expect_err("should fail on 403");
        assert!(err.is_transport());
        assert!(err.to_string().contains("HTTP status 403"));
    }

    #[test]
    fn test_fetch_connection_refused_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections locally.
        let result = fetch(
            &create_test_client(),
            "http://127.0.0.1:9/jobs",
            &FetchOptions::default(),
        );
        let err = result.expect_err("should fail to connect");
        assert!(err.is_transport());
    }

    #[test]
    fn test_fetch_rejects_bad_urls() {
        let client = create_test_client();
        let opts = FetchOptions::default();

        assert!(fetch(&client, "", &opts).unwrap_err().is_invalid_url());
        assert!(fetch(&client, "not a url", &opts)
            .unwrap_err()
            .is_invalid_url());
        assert!(fetch(&client, "ftp://example.com/readme", &opts)
            .unwrap_err()
            .is_invalid_url());
    }

    #[test]
    fn test_fetch_rejects_oversized_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/huge");
            then.status(200)
                .header("content-type", "text/html")
                .body(vec![b'a'; MAX_CONTENT_LENGTH + 1024 * 1024]);
        });

        let result = fetch(
            &create_test_client(),
            &server.url("/huge"),
            &FetchOptions::default(),
        );
        mock.assert();

        let err = result.expect_err("11 MB body should be rejected");
        assert!(err.is_transport());
        assert!(err.to_string().contains("content too large"));
    }

    #[test]
    fn test_fetch_accepts_body_at_limit() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/limit");
            then.status(200).body(vec![b'a'; MAX_CONTENT_LENGTH]);
        });

        let result = fetch(
            &create_test_client(),
            &server.url("/limit"),
            &FetchOptions::default(),
        )
        .expect("body at the limit should be accepted");
        assert_eq!(result.body.len(), MAX_CONTENT_LENGTH);
    }

    #[test]
    fn test_decode_iso_8859_1_with_charset() {
        let iso_bytes: &[u8] = &[0x63, 0x61, 0x66, 0xe9];
        let decoded = decode_body(iso_bytes, Some("text/html; charset=iso-8859-1"));
        assert_eq!(decoded, "café");
    }

    #[test]
    fn test_extract_charset() {
        assert_eq!(
            extract_charset("text/html; charset=utf-8"),
            Some("utf-8".to_string())
        );
        assert_eq!(
            extract_charset("text/html; charset=\"UTF-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(extract_charset("application/json"), None);
    }
}
