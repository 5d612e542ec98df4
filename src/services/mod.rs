pub mod catalog;
pub mod playback;
pub mod xtream;
