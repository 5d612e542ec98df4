//! Session-level types: catalog state, playback selection, user notices.

mod catalog;
mod notice;
mod selection;

pub use catalog::{CatalogState, VodPlayback};
pub use notice::{Notice, NoticeLevel, Notifier};
pub use selection::Selection;
