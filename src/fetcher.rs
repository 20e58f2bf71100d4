use reqwest::blocking::Client;
use reqwest::redirect;
use tracing::debug;
use url::Url;

use crate::config::{MAX_REDIRECTS, REQUEST_TIMEOUT, USER_AGENT};
use crate::error::FetchError;

/// Blocking GET returning the response body as text.
pub trait Fetch {
    fn fetch_text(&self, url: &Url) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let redirect_policy = redirect::Policy::custom(|attempt| {
            if attempt.previous().len() > MAX_REDIRECTS {
                attempt.error(format!("Too many redirects (>{MAX_REDIRECTS})"))
            } else {
                attempt.follow()
            }
        });

        let client = Client::builder()
            .redirect(redirect_policy)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        debug!(url = %redacted(url), "GET");
        let http_err = |source| FetchError::Http {
            url: redacted(url),
            source,
        };

        let resp = self.client.get(url.clone()).send().map_err(http_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: redacted(url),
                status: status.as_u16(),
            });
        }
        resp.text().map_err(http_err)
    }
}

/// The URL with its `key` query parameter masked, for logs and errors.
pub fn redacted(url: &Url) -> String {
    if !url.query_pairs().any(|(name, _)| name == "key") {
        return url.to_string();
    }
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" { "***".to_string() } else { value.into_owned() };
            (name.into_owned(), value)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
