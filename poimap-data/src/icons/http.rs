//! Icons fetched from the same server as the dataset.

use async_trait::async_trait;
use log::debug;
use poimap_core::{IconImage, IconLoadError, IconLoader};
use reqwest::Client;

use crate::source::{HttpPoiSourceConfig, SourceBuildError};

/// Loads icon paths relative to a server root.
#[derive(Debug, Clone)]
pub struct HttpIconLoader {
    client: Client,
    base_url: String,
}

impl HttpIconLoader {
    /// Loader for icons under `base_url` using default client settings.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceBuildError> {
        let config = HttpPoiSourceConfig::new(base_url);
        let client = config.build_client()?;
        Ok(Self::with_client(client, config.base_url))
    }

    /// Loader reusing an existing client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// URL an icon path resolves to.
    #[must_use]
    pub fn icon_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn unavailable(path: &str, error: &reqwest::Error) -> IconLoadError {
        IconLoadError::Unavailable {
            path: path.to_owned(),
            message: error.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl IconLoader for HttpIconLoader {
    async fn load(&self, path: &str) -> Result<IconImage, IconLoadError> {
        let url = self.icon_url(path);
        debug!("fetching icon from {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| Self::unavailable(path, &err))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| Self::unavailable(path, &err))?;
        if body.is_empty() {
            return Err(IconLoadError::Empty {
                path: path.to_owned(),
            });
        }
        Ok(IconImage::new(body.to_vec()))
    }
}
