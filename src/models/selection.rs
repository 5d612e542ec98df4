use crate::services::xtream::{Channel, ContentKind, Episode, VodItem};

/// The item currently chosen for playback, tagged by content kind.
///
/// At most one selection is active at a time; selecting an item of a
/// different kind replaces the previous selection outright.
#[derive(Debug, Clone)]
pub enum Selection {
    Channel(Channel),
    Movie(VodItem),
    Episode(Episode),
}

impl Selection {
    pub fn kind(&self) -> ContentKind {
        match self {
            Selection::Channel(_) => ContentKind::Live,
            Selection::Movie(_) => ContentKind::Vod,
            Selection::Episode(_) => ContentKind::Series,
        }
    }

    /// Display name of the selected item
    pub fn name(&self) -> &str {
        match self {
            Selection::Channel(channel) => &channel.name,
            Selection::Movie(movie) => &movie.name,
            Selection::Episode(episode) => &episode.title,
        }
    }
}
