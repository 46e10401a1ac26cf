use tracing::{debug, instrument};

use crate::error::{EspnError, Result};

/// Root of the fantasy baseball pages.
pub const DEFAULT_BASE_URL: &str = "http://games.espn.com/flb";

/// Anything that can hand back the HTML body of a league page.
///
/// [`EspnClient`] fetches over HTTP; tests and offline callers can serve
/// saved pages instead.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetch the raw HTML body behind `url`.
    async fn fetch_page(&self, url: &str) -> Result<String>;

    /// Site root that page URLs are built against.
    fn base_url(&self) -> &str {
        DEFAULT_BASE_URL
    }
}

impl<T: PageSource + ?Sized> PageSource for &T {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        (**self).fetch_page(url).await
    }

    fn base_url(&self) -> &str {
        (**self).base_url()
    }
}

/// HTTP page source backed by a [`reqwest::Client`].
///
/// Private leagues need the ESPN session cookies; configure them (along
/// with timeouts, proxies, headers) on the client passed to
/// [`EspnClient::with_client`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> espn_tables::Result<()> {
/// use espn_tables::{EspnClient, League};
///
/// let league = League::connect(EspnClient::new(), 12345, 2017).await?;
/// for table in league.standings().await? {
///     println!("{:?}: {} teams", table.title, table.row_count());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EspnClient {
    http: reqwest::Client,
    base_url: String,
}

impl EspnClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a new client using the provided [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different site root (mirrors, archived copies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for EspnClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for EspnClient {
    #[instrument(skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send().await.map_err(|e| EspnError::Http {
            url: url.to_owned(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EspnError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| EspnError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })?;
        debug!(bytes = body.len(), "fetched page");
        Ok(body)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_trims_slash() {
        let client = EspnClient::new().with_base_url("http://localhost:8080/flb/");
        assert_eq!(client.base_url(), "http://localhost:8080/flb");
        assert_eq!(EspnClient::default().base_url(), DEFAULT_BASE_URL);
    }
}
