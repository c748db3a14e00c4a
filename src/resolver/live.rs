//! Live backend seam for the resolver's first stage.

use crate::core::types::DatasetRequest;
use crate::error::DashboardResult;

/// A reachable data service answering dataset requests with raw JSON.
///
/// The resolver owns the fallback policy; implementations only perform the
/// fetch and report failure through `Err`.
pub trait LiveBackend {
    fn fetch(&self, request: &DatasetRequest) -> DashboardResult<serde_json::Value>;

    /// Short human-readable identity used in log lines.
    fn describe(&self) -> String {
        "live backend".to_owned()
    }
}

#[cfg(feature = "http-backend")]
pub use http::HttpLiveBackend;

#[cfg(feature = "http-backend")]
mod http {
    use std::time::Duration;

    use crate::core::types::DatasetRequest;
    use crate::error::{DashboardError, DashboardResult};

    use super::LiveBackend;

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(12);

    /// Blocking HTTP implementation of [`LiveBackend`].
    ///
    /// Side-effect-free reads travel as GET; form-driven datasets POST their
    /// parameters as a JSON body.
    #[derive(Debug)]
    pub struct HttpLiveBackend {
        base_url: String,
        client: reqwest::blocking::Client,
    }

    impl HttpLiveBackend {
        pub fn new(base_url: impl Into<String>) -> DashboardResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|e| DashboardError::Backend(format!("http client error: {e}")))?;
            Ok(Self {
                base_url: base_url.into().trim_end_matches('/').to_owned(),
                client,
            })
        }

        fn url_for(&self, request: &DatasetRequest) -> String {
            format!("{}{}", self.base_url, request.name.route())
        }
    }

    impl LiveBackend for HttpLiveBackend {
        fn fetch(&self, request: &DatasetRequest) -> DashboardResult<serde_json::Value> {
            let url = self.url_for(request);
            let builder = if request.name.is_idempotent_read() {
                self.client.get(&url)
            } else {
                self.client.post(&url).json(&request.params)
            };
            builder
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|e| DashboardError::Backend(format!("request error for {url}: {e}")))?
                .json()
                .map_err(|e| DashboardError::Backend(format!("decode error for {url}: {e}")))
        }

        fn describe(&self) -> String {
            format!("http backend at {}", self.base_url)
        }
    }
}
