//! CMS catalog client.

use crate::error::{CmsClientError, Result};
use crate::types::CmsConfig;
use async_trait::async_trait;
use cadence_core::{Song, SongCatalog, SongResponse};
use reqwest::Client;
use tracing::{debug, info};

/// Client for the song catalog served by the CMS.
///
/// # Example
///
/// ```ignore
/// use cadence_cms_client::{CmsClient, CmsConfig};
///
/// let client = CmsClient::new(CmsConfig::new("https://cms.samespace.com"))?;
/// let songs = client.songs().await?;
/// println!("Found {} songs", songs.len());
/// ```
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    url: String,
}

impl CmsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CmsConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(CmsClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CmsClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, url })
    }

    /// Get the normalized base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL of a cover image asset.
    pub fn asset_url(&self, cover: &str) -> String {
        format!("{}/assets/{}", self.url, cover)
    }

    /// Fetch the song catalog.
    pub async fn songs(&self) -> Result<Vec<Song>> {
        let url = format!("{}/items/songs", self.url);
        debug!(url = %url, "Fetching songs");

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CmsClientError::ServerUnreachable(e.to_string())
            } else {
                CmsClientError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let body: SongResponse = response.json().await.map_err(|e| {
                CmsClientError::ParseError(format!("Failed to parse songs response: {}", e))
            })?;

            info!(
                songs = body.data.len(),
                top_tracks = body.data.iter().filter(|s| s.top_track).count(),
                "Fetched song catalog"
            );

            Ok(body.data)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CmsClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl SongCatalog for CmsClient {
    async fn fetch_songs(&self) -> cadence_core::Result<Vec<Song>> {
        Ok(self.songs().await?)
    }
}
