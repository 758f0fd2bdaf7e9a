//! HTTP dataset source.
//!
//! Fetches `{base_url}/data/{dataset}.json` once per load. There is no retry
//! and, unless configured, no timeout.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use poimap_core::{LoadError, PoiRecord, PoiSource};
use reqwest::Client;
use thiserror::Error;

use crate::icons::HttpIconLoader;
use crate::wire::parse_records;

/// Default user agent for dataset and icon requests.
pub const DEFAULT_USER_AGENT: &str = "poimap/0.1";
/// Default server root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Default dataset name.
pub const DEFAULT_DATASET: &str = "college";

/// Errors raised while building an HTTP adapter.
#[derive(Debug, Error)]
pub enum SourceBuildError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration for [`HttpPoiSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpPoiSourceConfig {
    /// Server root, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Dataset name; fetched from `/data/{dataset}.json`.
    pub dataset: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for HttpPoiSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            dataset: DEFAULT_DATASET.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: None,
        }
    }
}

impl HttpPoiSourceConfig {
    /// Configuration for the default dataset under `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the dataset name.
    #[must_use]
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Bound each request by `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full dataset URL.
    #[must_use]
    pub fn dataset_url(&self) -> String {
        format!(
            "{}/data/{}.json",
            self.base_url.trim_end_matches('/'),
            self.dataset
        )
    }

    pub(crate) fn build_client(&self) -> Result<Client, reqwest::Error> {
        let mut builder = Client::builder().user_agent(self.user_agent.as_str());
        if let Some(timeout) = self.timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        builder.build()
    }
}

/// Dataset source backed by an HTTP server.
///
/// # Examples
///
/// ```no_run
/// use poimap_core::PoiSource;
/// use poimap_data::{HttpPoiSource, HttpPoiSourceConfig};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let config = HttpPoiSourceConfig::new("http://localhost:8080").with_dataset("college");
/// let source = HttpPoiSource::with_config(config)?;
/// let records = source.load().await?;
/// println!("{} records", records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpPoiSource {
    client: Client,
    config: HttpPoiSourceConfig,
}

impl HttpPoiSource {
    /// Source for the default dataset under `base_url`.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceBuildError> {
        Self::with_config(HttpPoiSourceConfig::new(base_url))
    }

    /// Source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn with_config(config: HttpPoiSourceConfig) -> Result<Self, SourceBuildError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpPoiSourceConfig {
        &self.config
    }

    /// Icon loader sharing this source's client and server root.
    #[must_use]
    pub fn icon_loader(&self) -> HttpIconLoader {
        HttpIconLoader::with_client(self.client.clone(), self.config.base_url.clone())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| convert_reqwest_error(&err, url))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| convert_reqwest_error(&err, url))?;
        Ok(body.to_vec())
    }
}

/// Map a transport or status failure onto [`LoadError::Fetch`].
fn convert_reqwest_error(error: &reqwest::Error, url: &str) -> LoadError {
    let message = if error.is_timeout() {
        "request timed out".to_owned()
    } else {
        error.to_string()
    };
    LoadError::Fetch {
        url: url.to_owned(),
        status: error.status().map(|status| status.as_u16()),
        message,
    }
}

#[async_trait(?Send)]
impl PoiSource for HttpPoiSource {
    async fn load(&self) -> Result<Vec<PoiRecord>, LoadError> {
        let url = self.config.dataset_url();
        debug!("fetching POI dataset from {url}");
        let payload = self.fetch(&url).await?;
        parse_records(&payload, &url)
    }
}
