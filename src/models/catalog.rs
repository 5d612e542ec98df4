use serde::{Deserialize, Serialize};

use crate::services::xtream::{Category, Channel, ContentKind, SeriesDetails, SeriesItem, VodInfo, VodItem};

/// Loaded catalog slices for a session.
///
/// Lists start empty and are replaced wholesale on each successful fetch;
/// a failed fetch leaves the prior list untouched. Category selection is a
/// single global value, not per kind.
#[derive(Debug, Default, Clone)]
pub struct CatalogState {
    pub live_categories: Vec<Category>,
    pub vod_categories: Vec<Category>,
    pub series_categories: Vec<Category>,

    pub live_streams: Vec<Channel>,
    pub vod_streams: Vec<VodItem>,
    pub series_streams: Vec<SeriesItem>,

    pub selected_category_id: Option<String>,
    pub selected_series: Option<SeriesDetails>,
}

impl CatalogState {
    pub fn categories(&self, kind: ContentKind) -> &[Category] {
        match kind {
            ContentKind::Live => &self.live_categories,
            ContentKind::Vod => &self.vod_categories,
            ContentKind::Series => &self.series_categories,
        }
    }

    pub(crate) fn categories_mut(&mut self, kind: ContentKind) -> &mut Vec<Category> {
        match kind {
            ContentKind::Live => &mut self.live_categories,
            ContentKind::Vod => &mut self.vod_categories,
            ContentKind::Series => &mut self.series_categories,
        }
    }
}

/// VOD details merged with the derived playback URL
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VodPlayback {
    #[serde(flatten)]
    pub details: VodInfo,
    pub video_url: String,
}
