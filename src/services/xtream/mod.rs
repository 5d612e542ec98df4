//! Xtream Codes Integration
//!
//! Typed client for the Xtream Codes Player API v2 (`player_api.php`) and
//! the conventional media path templates portals expose alongside it:
//!
//! ```text
//! {server}/player_api.php?username=X&password=Y&action=...
//! {server}/live/{user}/{pass}/{stream_id}.m3u8
//! {server}/movie/{user}/{pass}/{vod_id}.{ext}
//! {server}/series/{user}/{pass}/{episode_id}.{ext}
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use xtreamplay::services::xtream::{ContentKind, Credentials, XtreamClient};
//!
//! let creds = Credentials::new("http://example.com:8080", "user", "pass")?;
//! let client = XtreamClient::new(creds, &config)?;
//! let categories = client.categories(ContentKind::Vod).await?;
//! ```

pub mod client;
pub mod types;

// Re-exports for convenience
pub use client::XtreamClient;
pub use types::{
    AuthResponse, Category, Channel, ContentKind, Credentials, Episode, EpisodeMeta, SeriesDetails,
    SeriesItem, SeriesMeta, ServerInfo, UserInfo, VodInfo, VodItem, VodMeta,
};
