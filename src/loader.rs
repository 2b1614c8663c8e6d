//! HTML Loaders
//!
//! The extractor only needs a string. A loader turns a URL into one and
//! is the only asynchronous boundary of the crate; timeouts, retries and
//! cancellation belong to the loader, never to the extractor.

use std::future::Future;

use url::Url;

use crate::error::Result;

/// Source of page HTML.
///
/// Implementations report transport failures as `InvalidResponse`,
/// non-success statuses as `HttpStatus`, undecodable bodies as
/// `DecodingFailed` and empty bodies as `EmptyHtml`.
pub trait HtmlLoader {
    /// Fetch the HTML of `url`.
    fn fetch_html(&self, url: &Url) -> impl Future<Output = Result<String>> + Send;
}

#[cfg(feature = "fetch")]
pub use http::HttpLoader;

#[cfg(feature = "fetch")]
mod http {
    use reqwest::header::CONTENT_TYPE;
    use url::Url;

    use super::HtmlLoader;
    use crate::encoding;
    use crate::error::{Error, Result};

    /// Direct network fetch with `reqwest`.
    #[derive(Debug, Clone, Default)]
    pub struct HttpLoader {
        client: reqwest::Client,
    }

    impl HttpLoader {
        /// Loader with a default client.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Loader reusing a configured client (timeouts, proxy, headers).
        #[must_use]
        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl HtmlLoader for HttpLoader {
        async fn fetch_html(&self, url: &Url) -> Result<String> {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| Error::InvalidResponse(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::HttpStatus(status.as_u16()));
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response
                .bytes()
                .await
                .map_err(|e| Error::InvalidResponse(e.to_string()))?;
            tracing::debug!(%url, bytes = body.len(), "fetched page");

            if body.is_empty() {
                return Err(Error::EmptyHtml);
            }
            let html = encoding::decode_strict(&body, content_type.as_deref())?;
            if html.trim().is_empty() {
                return Err(Error::EmptyHtml);
            }
            Ok(html)
        }
    }
}
