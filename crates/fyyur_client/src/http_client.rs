//! reqwest-based implementation of the [`Transport`](crate::Transport) trait.

use crate::config::Config;
use crate::{FyyurError, Transport, VenueResponse};
use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Method, StatusCode};

/// Talks to the Fyyur site over HTTP, following redirects the way a browser
/// `fetch` does.
///
/// Redirects are followed here rather than inside reqwest so that a chain
/// ending on the request URL still counts as redirected.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    base_url: String,
    max_redirects: usize,
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default redirect limit.
    ///
    /// # Arguments
    /// * `base_url` - Site root, e.g. "http://localhost:5000"
    pub fn new(base_url: &str) -> Result<Self, FyyurError> {
        Self::with_max_redirects(base_url, crate::config::DEFAULT_MAX_REDIRECTS)
    }

    pub fn from_config(config: &Config) -> Result<Self, FyyurError> {
        Self::with_max_redirects(&config.base_url, config.max_redirects)
    }

    /// `max_redirects == 0` returns 3xx responses as-is instead of following
    /// them. Longer chains than the limit are an error.
    pub fn with_max_redirects(base_url: &str, max_redirects: usize) -> Result<Self, FyyurError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            max_redirects,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<reqwest::Url, FyyurError> {
        let raw = format!("{}{}", self.base_url, path);
        reqwest::Url::parse(&raw).map_err(|e| FyyurError::InvalidUrl(format!("{raw}: {e}")))
    }
}

/// Method for the next hop. Only 303 turns a non-GET request into a GET;
/// 301 and 302 rewrite POST alone.
fn method_after(status: StatusCode, method: Method) -> Method {
    if status == StatusCode::SEE_OTHER && method != Method::GET && method != Method::HEAD {
        Method::GET
    } else {
        method
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn delete(&self, path: &str) -> Result<VenueResponse, FyyurError> {
        let mut url = self.resolve(path)?;
        let mut method = Method::DELETE;
        let mut hops = 0usize;
        tracing::debug!(%url, "sending DELETE");
        loop {
            let resp = self.client.request(method.clone(), url.clone()).send().await?;
            let status = resp.status();
            let location = resp
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let next = match location {
                Some(location) if is_redirect(status) && self.max_redirects > 0 => location,
                _ => {
                    let response = VenueResponse {
                        status: status.as_u16(),
                        redirected: hops > 0,
                        url: url.to_string(),
                    };
                    tracing::debug!(
                        status = response.status,
                        redirected = response.redirected,
                        url = %response.url,
                        "DELETE settled"
                    );
                    return Ok(response);
                }
            };

            if hops == self.max_redirects {
                return Err(FyyurError::Redirect(format!(
                    "more than {} redirects starting at {}",
                    self.max_redirects, path
                )));
            }
            hops += 1;
            url = url
                .join(&next)
                .map_err(|e| FyyurError::InvalidUrl(format!("{next}: {e}")))?;
            method = method_after(status, method);
            tracing::debug!(%status, %url, %method, hop = hops, "following redirect");
        }
    }
}
