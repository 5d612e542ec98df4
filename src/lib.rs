//! Client-side core for Xtream Codes IPTV portals.
//!
//! This crate holds everything between the view layer and the wire: a typed
//! client for the `player_api.php` endpoint, a per-login [`Session`] owning
//! credentials and the loaded catalog, and a [`PlaybackAdapter`] state
//! machine for the media surface. Rendering, routing, toast presentation
//! and the HLS engine itself are external collaborators.
//!
//! # Overview
//!
//! ```rust,ignore
//! use xtreamplay::{Config, ContentKind, Notifier, Selection, Session};
//!
//! let (notices, mut toasts) = Notifier::channel();
//! let session = Session::login(&Config::from_env(), "user", "pass",
//!                              "http://portal.example:8080", notices).await?;
//!
//! // Categories for all three kinds were loaded eagerly at login
//! let live = session.categories(ContentKind::Live).await;
//! session.fetch_streams(ContentKind::Live, &live[0].category_id).await;
//!
//! let channel = session.catalog().await.live_streams[0].clone();
//! let url = session.resolve_media_url(&Selection::Channel(channel));
//! ```
//!
//! Every recovered failure — HTTP errors, malformed bodies, playback
//! failures that exhausted the protocol fallback — surfaces as a
//! [`Notice`] on the channel; no operation corrupts previously loaded
//! state.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use models::{CatalogState, Notice, NoticeLevel, Notifier, Selection, VodPlayback};
pub use services::catalog::Session;
pub use services::playback::{PlaybackAdapter, PlaybackState, PlayerCommand, PlayerEvent};
pub use services::xtream::{
    AuthResponse, Category, Channel, ContentKind, Credentials, Episode, SeriesDetails, SeriesItem,
    VodInfo, VodItem, XtreamClient,
};
