//! Session & Catalog Manager
//!
//! A `Session` is the explicit context object for one logged-in portal:
//! it owns the credentials, the HTTP client and the loaded catalog, and is
//! created by [`Session::login`] and destroyed by dropping it. All catalog
//! operations report recovered failures through the session's [`Notifier`]
//! and leave prior state untouched, so the UI always stays retryable.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::models::{CatalogState, Notifier, Selection, VodPlayback};
use crate::services::xtream::{
    AuthResponse, Category, Channel, ContentKind, Credentials, SeriesDetails, SeriesItem, VodItem,
    XtreamClient,
};

/// Per-kind fetch generation counters.
///
/// Each fetch takes a fresh token before awaiting the network; a result is
/// only committed while its token is still current, so a superseded in-flight
/// fetch cannot overwrite newer state with stale data.
#[derive(Default)]
struct KindGenerations {
    live: AtomicU64,
    vod: AtomicU64,
    series: AtomicU64,
}

impl KindGenerations {
    fn cell(&self, kind: ContentKind) -> &AtomicU64 {
        match kind {
            ContentKind::Live => &self.live,
            ContentKind::Vod => &self.vod,
            ContentKind::Series => &self.series,
        }
    }

    fn begin(&self, kind: ContentKind) -> u64 {
        self.cell(kind).fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, kind: ContentKind, token: u64) -> bool {
        self.cell(kind).load(Ordering::SeqCst) == token
    }
}

enum StreamList {
    Live(Vec<Channel>),
    Vod(Vec<VodItem>),
    Series(Vec<SeriesItem>),
}

/// One logged-in portal session
pub struct Session {
    client: XtreamClient,
    catalog: Mutex<CatalogState>,
    notices: Notifier,
    loading: AtomicBool,
    category_gens: KindGenerations,
    stream_gens: KindGenerations,
    series_gen: AtomicU64,
}

impl Session {
    /// Log in to a portal and eagerly load categories for all three kinds.
    ///
    /// Credentials are committed without pre-verification; the category
    /// fetches are issued concurrently and awaited, so when this returns the
    /// catalog is settled. A failed fetch for one kind does not touch the
    /// others' slices and is reported through the notice channel, meaning
    /// `Ok` does not imply every kind loaded.
    ///
    /// Fails only when the session itself cannot be built (bad URL or HTTP
    /// client construction).
    pub async fn login(
        config: &Config,
        username: &str,
        password: &str,
        server: &str,
        notices: Notifier,
    ) -> Result<Self> {
        let creds = Credentials::new(server, username, password)?;
        let client = XtreamClient::new(creds, config)?;

        let session = Self {
            client,
            catalog: Mutex::new(CatalogState::default()),
            notices,
            loading: AtomicBool::new(true),
            category_gens: KindGenerations::default(),
            stream_gens: KindGenerations::default(),
            series_gen: AtomicU64::new(0),
        };

        let (live, vod, series) = futures::join!(
            session.refresh_categories(ContentKind::Live),
            session.refresh_categories(ContentKind::Vod),
            session.refresh_categories(ContentKind::Series),
        );
        if live && vod && series {
            session.notices.info("Connected successfully");
        }

        session.loading.store(false, Ordering::SeqCst);
        Ok(session)
    }

    /// True while login's eager category fetches are in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn credentials(&self) -> &Credentials {
        self.client.credentials()
    }

    /// Snapshot of the loaded catalog
    pub async fn catalog(&self) -> CatalogState {
        self.catalog.lock().await.clone()
    }

    /// Categories currently loaded for a kind
    pub async fn categories(&self, kind: ContentKind) -> Vec<Category> {
        self.catalog.lock().await.categories(kind).to_vec()
    }

    /// Fetch and replace the category list for one kind.
    ///
    /// Returns whether the fetch succeeded. On failure the prior list is
    /// left untouched and exactly one error notice is emitted.
    pub async fn refresh_categories(&self, kind: ContentKind) -> bool {
        let token = self.category_gens.begin(kind);
        match self.client.categories(kind).await {
            Ok(list) => {
                let mut catalog = self.catalog.lock().await;
                if !self.category_gens.is_current(kind, token) {
                    debug!(%kind, "discarding stale category fetch");
                    return false;
                }
                *catalog.categories_mut(kind) = list;
                true
            }
            Err(e) => {
                warn!(%kind, error = %e, "category fetch failed");
                self.notices.error(format!("Failed to fetch {kind} categories"));
                false
            }
        }
    }

    /// Fetch the stream list for a category and make it the selected one.
    ///
    /// On success the kind's stream list is replaced and the global
    /// `selected_category_id` updated; on failure both are left untouched.
    /// A result that was superseded by a newer fetch is discarded.
    pub async fn fetch_streams(&self, kind: ContentKind, category_id: &str) -> bool {
        let token = self.stream_gens.begin(kind);
        let result = match kind {
            ContentKind::Live => self
                .client
                .live_streams(category_id)
                .await
                .map(StreamList::Live),
            ContentKind::Vod => self
                .client
                .vod_streams(category_id)
                .await
                .map(StreamList::Vod),
            ContentKind::Series => self.client.series(category_id).await.map(StreamList::Series),
        };

        match result {
            Ok(list) => {
                let mut catalog = self.catalog.lock().await;
                if !self.stream_gens.is_current(kind, token) {
                    debug!(%kind, category_id, "discarding stale stream fetch");
                    return false;
                }
                catalog.selected_category_id = Some(category_id.to_string());
                match list {
                    StreamList::Live(streams) => catalog.live_streams = streams,
                    StreamList::Vod(streams) => catalog.vod_streams = streams,
                    StreamList::Series(streams) => catalog.series_streams = streams,
                }
                true
            }
            Err(e) => {
                warn!(%kind, category_id, error = %e, "stream fetch failed");
                self.notices.error(format!("Failed to fetch {kind} streams"));
                false
            }
        }
    }

    /// Fetch episode details for a series and make it the selected series.
    ///
    /// Failure clears the previous `selected_series`, so the UI can never
    /// act on a selection that no longer matches the user's intent. An
    /// outcome superseded by a newer fetch, success or failure, is
    /// discarded without touching the selection.
    pub async fn fetch_series_details(&self, series_id: i64) -> Option<SeriesDetails> {
        let token = self.series_gen.fetch_add(1, Ordering::SeqCst) + 1;
        match self.client.series_info(series_id).await {
            Ok(details) => {
                let mut catalog = self.catalog.lock().await;
                if self.series_gen.load(Ordering::SeqCst) != token {
                    debug!(series_id, "discarding stale series info fetch");
                    return None;
                }
                catalog.selected_series = Some(details.clone());
                Some(details)
            }
            Err(e) => {
                warn!(series_id, error = %e, "series info fetch failed");
                let mut catalog = self.catalog.lock().await;
                if self.series_gen.load(Ordering::SeqCst) != token {
                    debug!(series_id, "discarding stale series info failure");
                    return None;
                }
                catalog.selected_series = None;
                self.notices.error("Failed to fetch series info");
                None
            }
        }
    }

    /// Fetch movie details merged with the derived playback URL
    pub async fn fetch_vod_details(&self, vod_id: i64) -> Option<VodPlayback> {
        match self.client.vod_info(vod_id).await {
            Ok(details) => {
                let extension = details.movie_data.container_extension.as_deref();
                let video_url = self.client.credentials().vod_url(vod_id, extension);
                Some(VodPlayback { details, video_url })
            }
            Err(e) => {
                warn!(vod_id, error = %e, "vod info fetch failed");
                self.notices.error("Failed to fetch movie info");
                None
            }
        }
    }

    /// Account and server info; not required for catalog operations
    pub async fn authenticate(&self) -> Result<AuthResponse> {
        self.client.authenticate().await
    }

    /// Resolve a selection into its playable media URL.
    ///
    /// Pure with respect to the session credentials: identical selections
    /// always yield the identical string, recomputed on demand rather than
    /// cached.
    pub fn resolve_media_url(&self, selection: &Selection) -> String {
        let creds = self.client.credentials();
        match selection {
            Selection::Channel(channel) => creds.live_url(channel.stream_id),
            Selection::Movie(movie) => {
                creds.vod_url(movie.stream_id, movie.container_extension.as_deref())
            }
            Selection::Episode(episode) => {
                creds.series_url(&episode.id, Some(&episode.container_extension))
            }
        }
    }
}
