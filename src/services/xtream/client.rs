//! Xtream Codes API Client
//!
//! HTTP client for the Xtream Player API v2, with a one-shot scheme-fallback
//! retry: a request that fails over `http` is retried once over `https` and
//! vice versa. A logical fetch therefore makes at most two attempts.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{
    AuthResponse, Category, Channel, ContentKind, Credentials, SeriesDetails, SeriesItem, VodInfo,
    VodItem,
};
use crate::config::Config;
use crate::error::{Error, Result};

/// Xtream API Client
///
/// One instance per session; holds the shared HTTP client and the
/// credentials used to build request and playback URLs.
pub struct XtreamClient {
    http: Client,
    creds: Credentials,
    user_agent: String,
}

impl XtreamClient {
    pub fn new(creds: Credentials, config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http,
            creds,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.creds
    }

    /// Single request attempt, no fallback
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }

    /// GET an API action and decode the JSON body.
    ///
    /// On failure the request is retried exactly once with the URL scheme
    /// swapped; if both attempts fail, the second error is returned.
    async fn get<T: DeserializeOwned>(&self, action: &str, params: &[(&str, String)]) -> Result<T> {
        let url = self.creds.api_url(action, params);
        debug!(action, "portal request");

        let text = match self.fetch_text(&url).await {
            Ok(text) => text,
            Err(first) => {
                let Some(alternate) = swap_scheme(&url) else {
                    return Err(first);
                };
                debug!(action, error = %first, "retrying with swapped scheme");
                self.fetch_text(&alternate).await?
            }
        };

        if text.is_empty() || text == "null" {
            return Err(Error::EmptyResponse);
        }

        serde_json::from_str(&text).map_err(|e| {
            warn!(action, error = %e, "failed to decode portal response");
            let preview: String = text.chars().take(500).collect();
            debug!("response text: {preview}");
            Error::Malformed(e.to_string())
        })
    }

    /// Account and server info from the bare player_api.php call
    pub async fn authenticate(&self) -> Result<AuthResponse> {
        self.get("", &[]).await
    }

    /// Category list for a content kind
    pub async fn categories(&self, kind: ContentKind) -> Result<Vec<Category>> {
        self.get(kind.categories_action(), &[]).await
    }

    /// Live channels in a category
    pub async fn live_streams(&self, category_id: &str) -> Result<Vec<Channel>> {
        self.get(
            ContentKind::Live.streams_action(),
            &[("category_id", category_id.to_string())],
        )
        .await
    }

    /// Movies in a category
    pub async fn vod_streams(&self, category_id: &str) -> Result<Vec<VodItem>> {
        self.get(
            ContentKind::Vod.streams_action(),
            &[("category_id", category_id.to_string())],
        )
        .await
    }

    /// Series in a category
    pub async fn series(&self, category_id: &str) -> Result<Vec<SeriesItem>> {
        self.get(
            ContentKind::Series.streams_action(),
            &[("category_id", category_id.to_string())],
        )
        .await
    }

    /// Detailed series info with episodes
    pub async fn series_info(&self, series_id: i64) -> Result<SeriesDetails> {
        self.get("get_series_info", &[("series_id", series_id.to_string())])
            .await
    }

    /// Detailed VOD info
    pub async fn vod_info(&self, vod_id: i64) -> Result<VodInfo> {
        self.get("get_vod_info", &[("vod_id", vod_id.to_string())])
            .await
    }
}

/// Swap `http` <-> `https` in a URL, if it uses either scheme
pub(crate) fn swap_scheme(url: &str) -> Option<String> {
    url.strip_prefix("http://")
        .map(|rest| format!("https://{rest}"))
        .or_else(|| {
            url.strip_prefix("https://")
                .map(|rest| format!("http://{rest}"))
        })
}
