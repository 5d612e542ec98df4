//! Xtream Codes API Types
//!
//! Type definitions for Xtream Codes Player API v2 responses, plus the
//! credential object that owns playback-URL construction.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Portal credentials
///
/// Owned exclusively by the session; never persisted. The server URL is
/// normalized (a single trailing slash stripped) at construction and is
/// immutable afterwards — a new login builds a new `Credentials`.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Server base URL (e.g., "http://example.com:8080")
    pub server: String,
    /// Username for authentication
    pub username: String,
    /// Password for authentication
    pub password: String,
}

impl Credentials {
    /// Build credentials from a raw server URL.
    ///
    /// Rejects anything that does not parse as an http/https URL.
    pub fn new(server: &str, username: &str, password: &str) -> Result<Self> {
        let server = server.trim();
        let server = server.strip_suffix('/').unwrap_or(server);

        let parsed = Url::parse(server).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            server: server.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Build a player_api.php request URL for the given action
    pub(crate) fn api_url(&self, action: &str, params: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}/player_api.php?username={}&password={}",
            self.server,
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password),
        );
        if !action.is_empty() {
            url.push_str("&action=");
            url.push_str(action);
        }
        for (name, value) in params {
            url.push_str(&format!("&{}={}", name, urlencoding::encode(value)));
        }
        url
    }

    /// Playback URL for live streams (HLS)
    pub fn live_url(&self, stream_id: i64) -> String {
        format!(
            "{}/live/{}/{}/{}.m3u8",
            self.server, self.username, self.password, stream_id
        )
    }

    /// Playback URL for VOD
    ///
    /// The container extension is normalized (leading dot stripped) and
    /// defaults to `mp4` when absent.
    pub fn vod_url(&self, stream_id: i64, extension: Option<&str>) -> String {
        format!(
            "{}/movie/{}/{}/{}.{}",
            self.server,
            self.username,
            self.password,
            stream_id,
            normalize_extension(extension)
        )
    }

    /// Playback URL for series episodes
    pub fn series_url(&self, episode_id: &str, extension: Option<&str>) -> String {
        format!(
            "{}/series/{}/{}/{}.{}",
            self.server,
            self.username,
            self.password,
            episode_id,
            normalize_extension(extension)
        )
    }
}

fn normalize_extension(extension: Option<&str>) -> &str {
    match extension.map(|e| e.trim_start_matches('.')) {
        Some(ext) if !ext.is_empty() => ext,
        _ => "mp4",
    }
}

/// Content kind partitioning the catalog and the API actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Live,
    Vod,
    Series,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Live, ContentKind::Vod, ContentKind::Series];

    /// Action name for the kind's category listing
    pub fn categories_action(self) -> &'static str {
        match self {
            ContentKind::Live => "get_live_categories",
            ContentKind::Vod => "get_vod_categories",
            ContentKind::Series => "get_series_categories",
        }
    }

    /// Action name for the kind's stream listing
    pub fn streams_action(self) -> &'static str {
        match self {
            ContentKind::Live => "get_live_streams",
            ContentKind::Vod => "get_vod_streams",
            ContentKind::Series => "get_series",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Live => write!(f, "live"),
            ContentKind::Vod => write!(f, "vod"),
            ContentKind::Series => write!(f, "series"),
        }
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Category for live, VOD, or series
///
/// One flat list per content kind; `parent_id` is carried opaquely.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Category {
    pub category_id: String,
    pub category_name: String,
    #[serde(default)]
    pub parent_id: i64,
}

/// Live stream (channel) information
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Channel {
    pub stream_id: i64,
    pub name: String,
    #[serde(default)]
    pub stream_icon: Option<String>,
    #[serde(default)]
    pub epg_channel_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

/// VOD (movie) entry from get_vod_streams
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VodItem {
    pub stream_id: i64,
    pub name: String,
    #[serde(default)]
    pub stream_icon: Option<String>,
    #[serde(default)]
    pub container_extension: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default, rename = "releaseDate")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

/// Series entry from get_series
///
/// Identified by `series_id`, not `stream_id`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeriesItem {
    pub series_id: i64,
    pub name: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default, rename = "releaseDate")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

// ============================================================================
// Series Details
// ============================================================================

/// Detailed series information (from get_series_info)
///
/// The wire format keys episodes by stringified season number; decoding
/// normalizes them into an ordered map with episodes sorted by number.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeriesDetails {
    pub info: SeriesMeta,
    #[serde(default, deserialize_with = "de_episode_map")]
    pub episodes: BTreeMap<u32, Vec<Episode>>,
}

impl SeriesDetails {
    /// Season numbers in ascending order
    pub fn seasons(&self) -> Vec<u32> {
        self.episodes.keys().copied().collect()
    }
}

/// Series metadata details
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeriesMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default, rename = "releaseDate")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub episode_run_time: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

/// Episode information
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Episode {
    pub id: String,
    pub episode_num: i32,
    pub title: String,
    pub container_extension: String,
    #[serde(default)]
    pub season: Option<i32>,
    #[serde(default)]
    pub info: Option<EpisodeMeta>,
}

/// Episode metadata
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EpisodeMeta {
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub movie_image: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
}

fn de_episode_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<u32, Vec<Episode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: HashMap<String, Vec<Episode>> = HashMap::deserialize(deserializer)?;
    let mut seasons = BTreeMap::new();
    for (key, mut episodes) in raw {
        let Ok(season) = key.parse::<u32>() else {
            tracing::warn!(season = %key, "ignoring non-numeric season key");
            continue;
        };
        episodes.sort_by_key(|e| e.episode_num);
        seasons.insert(season, episodes);
    }
    Ok(seasons)
}

// ============================================================================
// VOD Details
// ============================================================================

/// Detailed VOD information (from get_vod_info)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VodInfo {
    pub info: VodMeta,
    pub movie_data: VodItem,
}

/// VOD metadata details
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VodMeta {
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub releasedate: Option<String>,
    #[serde(default)]
    pub movie_image: Option<String>,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Authentication response from the bare player_api.php call
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthResponse {
    pub user_info: UserInfo,
    pub server_info: ServerInfo,
}

/// User account information
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UserInfo {
    pub username: String,
    pub status: String,
    #[serde(default)]
    pub exp_date: Option<String>,
    #[serde(default)]
    pub is_trial: Option<String>,
    #[serde(default)]
    pub max_connections: Option<String>,
}

impl UserInfo {
    /// Check if the account is active
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

/// Server information
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerInfo {
    pub url: String,
    pub port: String,
    #[serde(default)]
    pub https_port: Option<String>,
    #[serde(default)]
    pub server_protocol: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(server: &str) -> Credentials {
        Credentials::new(server, "alice", "secret").expect("valid credentials")
    }

    #[test]
    fn test_server_normalization() {
        assert_eq!(creds("http://host:80").server, "http://host:80");
        assert_eq!(creds("http://host:80/").server, "http://host:80");
        // Only a single trailing slash is stripped
        assert_eq!(creds("http://host:80//").server, "http://host:80/");
    }

    #[test]
    fn test_invalid_server_rejected() {
        assert!(Credentials::new("host:80", "u", "p").is_err());
        assert!(Credentials::new("ftp://host/file", "u", "p").is_err());
        assert!(Credentials::new("not a url", "u", "p").is_err());
    }

    #[test]
    fn test_live_url() {
        assert_eq!(
            creds("http://host:80").live_url(42),
            "http://host:80/live/alice/secret/42.m3u8"
        );
    }

    #[test]
    fn test_vod_url_extension_normalization() {
        let c = creds("http://host:80");
        // Leading dot stripped, not duplicated
        assert_eq!(
            c.vod_url(77, Some(".mkv")),
            "http://host:80/movie/alice/secret/77.mkv"
        );
        assert_eq!(
            c.vod_url(77, Some("avi")),
            "http://host:80/movie/alice/secret/77.avi"
        );
        // Absent or empty extension defaults to mp4
        assert_eq!(
            c.vod_url(77, None),
            "http://host:80/movie/alice/secret/77.mp4"
        );
        assert_eq!(
            c.vod_url(77, Some("")),
            "http://host:80/movie/alice/secret/77.mp4"
        );
    }

    #[test]
    fn test_series_url() {
        assert_eq!(
            creds("http://host:80").series_url("3001", Some("mp4")),
            "http://host:80/series/alice/secret/3001.mp4"
        );
    }

    #[test]
    fn test_media_urls_are_pure() {
        let c = creds("http://host:80");
        assert_eq!(c.live_url(42), c.live_url(42));
        assert_eq!(c.vod_url(7, Some("mkv")), c.vod_url(7, Some("mkv")));
    }

    #[test]
    fn test_api_url_encodes_credentials() {
        let c = Credentials::new("http://host", "user name", "p&ss").expect("valid");
        let url = c.api_url("get_live_categories", &[]);
        assert_eq!(
            url,
            "http://host/player_api.php?username=user%20name&password=p%26ss&action=get_live_categories"
        );
    }

    #[test]
    fn test_api_url_with_params() {
        let url = creds("http://host").api_url("get_live_streams", &[("category_id", "5".into())]);
        assert!(url.ends_with("&action=get_live_streams&category_id=5"));
    }

    #[test]
    fn test_content_kind_actions() {
        assert_eq!(ContentKind::Live.categories_action(), "get_live_categories");
        assert_eq!(ContentKind::Vod.categories_action(), "get_vod_categories");
        assert_eq!(
            ContentKind::Series.categories_action(),
            "get_series_categories"
        );
        assert_eq!(ContentKind::Live.streams_action(), "get_live_streams");
        assert_eq!(ContentKind::Vod.streams_action(), "get_vod_streams");
        assert_eq!(ContentKind::Series.streams_action(), "get_series");
    }

    #[test]
    fn test_series_details_season_ordering() {
        let json = r#"{
            "info": { "name": "Show" },
            "episodes": {
                "2": [
                    { "id": "22", "episode_num": 2, "title": "S2E2", "container_extension": "mp4" },
                    { "id": "21", "episode_num": 1, "title": "S2E1", "container_extension": "mp4" }
                ],
                "1": [
                    { "id": "11", "episode_num": 1, "title": "S1E1", "container_extension": "mkv" }
                ]
            }
        }"#;
        let details: SeriesDetails = serde_json::from_str(json).expect("valid series info");
        assert_eq!(details.seasons(), vec![1, 2]);
        let season2: Vec<_> = details.episodes[&2].iter().map(|e| e.episode_num).collect();
        assert_eq!(season2, vec![1, 2]);
    }

    #[test]
    fn test_series_details_skips_bad_season_keys() {
        let json = r#"{
            "info": {},
            "episodes": {
                "first": [
                    { "id": "1", "episode_num": 1, "title": "E1", "container_extension": "mp4" }
                ],
                "3": [
                    { "id": "2", "episode_num": 1, "title": "E1", "container_extension": "mp4" }
                ]
            }
        }"#;
        let details: SeriesDetails = serde_json::from_str(json).expect("valid series info");
        assert_eq!(details.seasons(), vec![3]);
    }

    #[test]
    fn test_user_info_is_active() {
        let active: UserInfo =
            serde_json::from_str(r#"{ "username": "u", "status": "Active" }"#).expect("valid");
        assert!(active.is_active());
        let expired: UserInfo =
            serde_json::from_str(r#"{ "username": "u", "status": "Expired" }"#).expect("valid");
        assert!(!expired.is_active());
    }
}
