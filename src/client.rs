use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::Url;

use crate::error::{QuotelyError, Result};
use crate::models::Quote;

/// Default public quote API root.
pub const DEFAULT_API_URL: &str = "https://api.quotable.io";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Source seam
// ---------------------------------------------------------------------------

/// Anything that can produce a batch of random quotes for a tag.
///
/// [`QuoteClient`] is the network implementation; the fetch flow only
/// depends on this trait.
pub trait QuoteSource {
    /// Fetch random quotes matching `tag` (an empty tag means no filter).
    fn random(&self, tag: &str) -> Result<Vec<Quote>>;
}

impl<S: QuoteSource + ?Sized> QuoteSource for &S {
    fn random(&self, tag: &str) -> Result<Vec<Quote>> {
        (**self).random(tag)
    }
}

impl<S: QuoteSource + ?Sized> QuoteSource for std::sync::Arc<S> {
    fn random(&self, tag: &str) -> Result<Vec<Quote>> {
        (**self).random(tag)
    }
}

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// Blocking HTTP client for the quote API.
///
/// ```no_run
/// use quotely::QuoteClient;
///
/// let client = QuoteClient::new("https://api.quotable.io").unwrap();
/// let quotes = client.random_quotes("inspirational").unwrap();
/// if let Some(q) = quotes.first() {
///     println!("\"{}\" - {}", q.content, q.author);
/// }
/// ```
#[derive(Clone)]
pub struct QuoteClient {
    base_url: String,
    http: Client,
}

impl QuoteClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `<base>/quotes/random?tags=<tag>`.
    pub fn random_url(&self, tag: &str) -> Result<Url> {
        let raw = format!("{}/quotes/random", self.base_url);
        let mut url = Url::parse(&raw).map_err(|e| QuotelyError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(QuotelyError::InvalidUrl {
                url: raw,
                message: "not a hierarchical URL".into(),
            });
        }
        url.query_pairs_mut().append_pair("tags", tag);
        Ok(url)
    }

    /// Issue one `GET /quotes/random` and decode the array of quotes.
    pub fn random_quotes(&self, tag: &str) -> Result<Vec<Quote>> {
        let url = self.random_url(tag)?;
        debug!("GET {url}");
        let resp = self.http.get(url).send()?;
        let body = handle_response(resp)?;
        let quotes: Vec<Quote> = serde_json::from_str(&body)?;
        debug!("decoded {} quote(s)", quotes.len());
        Ok(quotes)
    }
}

impl QuoteSource for QuoteClient {
    fn random(&self, tag: &str) -> Result<Vec<Quote>> {
        self.random_quotes(tag)
    }
}

// ---------------------------------------------------------------------------
// Internal response handling
// ---------------------------------------------------------------------------

/// Map non-2xx statuses to [`QuotelyError::Http`] and return the body text.
fn handle_response(response: Response) -> Result<String> {
    let status = response.status().as_u16();
    let body = response.text()?;

    if (200..300).contains(&status) {
        return Ok(body);
    }

    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("statusMessage").or(v.get("message")).cloned())
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();

    Err(QuotelyError::Http {
        status,
        message: if msg.is_empty() {
            format!("HTTP {status}")
        } else {
            msg
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_url_appends_tag_filter() {
        let client = QuoteClient::new("https://api.quotable.io/").unwrap();
        let url = client.random_url("inspirational").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.quotable.io/quotes/random?tags=inspirational"
        );
    }

    #[test]
    fn random_url_keeps_empty_tag() {
        let client = QuoteClient::new("https://api.quotable.io").unwrap();
        let url = client.random_url("").unwrap();
        assert_eq!(url.as_str(), "https://api.quotable.io/quotes/random?tags=");
    }

    #[test]
    fn random_url_encodes_tag() {
        let client = QuoteClient::new("https://api.quotable.io").unwrap();
        let url = client.random_url("a&b").unwrap();
        assert_eq!(url.query(), Some("tags=a%26b"));
    }

    #[test]
    fn malformed_base_is_invalid_url() {
        let client = QuoteClient::new("not a url").unwrap();
        let err = client.random_url("art").unwrap_err();
        assert!(matches!(err, QuotelyError::InvalidUrl { .. }));
    }
}
