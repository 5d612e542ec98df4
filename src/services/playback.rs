//! Playback Adapter
//!
//! State machine wrapping an external media surface (an HLS-capable player
//! owned by the view layer). The adapter consumes player lifecycle events
//! and emits [`PlayerCommand`]s for the surface to execute; it never touches
//! media itself.
//!
//! Its one piece of recovery logic is the protocol-fallback retry: when a
//! stream fails to load, the URL is retried once with `http`/`https`
//! swapped. Attempted URLs are tracked per playback session (reset on every
//! source change), so the retry can never cycle: after both schemes have
//! been tried the adapter settles in [`PlaybackState::Error`].

use std::collections::HashSet;

use tracing::debug;

use crate::models::Notifier;
use crate::services::xtream::client::swap_scheme;

/// Lifecycle of the current playback attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No source supplied
    #[default]
    Idle,
    /// Source handed to the surface, waiting for it to load
    Loading,
    /// Surface signalled a successful load; controls are enabled
    Ready,
    /// Load failed on every attempted URL
    Error,
}

/// Signals from the media surface
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The current source loaded successfully
    Loaded,
    /// The current source failed to load or play
    Failed(String),
    /// The browser/window fullscreen state changed, by any means
    FullscreenChanged(bool),
}

/// Instructions for the media surface
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Load(String),
    Play,
    Pause,
    SetVolume(f32),
    SetMuted(bool),
    EnterFullscreen,
    ExitFullscreen,
}

/// UI playback state for one media surface
pub struct PlaybackAdapter {
    state: PlaybackState,
    current_url: Option<String>,
    attempted: HashSet<String>,
    switched_scheme: bool,
    playing: bool,
    volume: f32,
    muted: bool,
    fullscreen: bool,
    notices: Notifier,
}

impl PlaybackAdapter {
    pub fn new(notices: Notifier) -> Self {
        Self {
            state: PlaybackState::Idle,
            current_url: None,
            attempted: HashSet::new(),
            switched_scheme: false,
            playing: false,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            notices,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// URL currently handed to the surface (may differ in scheme from the
    /// externally supplied one after a fallback retry)
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Supply a new source URL.
    ///
    /// Any URL change starts a fresh playback session: the attempted-URL
    /// set is reset and the adapter re-enters Loading.
    pub fn set_source(&mut self, url: impl Into<String>) -> PlayerCommand {
        let url = url.into();
        self.attempted.clear();
        self.attempted.insert(url.clone());
        self.current_url = Some(url.clone());
        self.switched_scheme = false;
        self.playing = false;
        self.state = PlaybackState::Loading;
        PlayerCommand::Load(url)
    }

    /// Drop the current source and return to Idle
    pub fn reset(&mut self) {
        self.attempted.clear();
        self.current_url = None;
        self.switched_scheme = false;
        self.playing = false;
        self.state = PlaybackState::Idle;
    }

    /// Feed a surface event into the state machine
    pub fn handle_event(&mut self, event: PlayerEvent) -> Option<PlayerCommand> {
        match event {
            PlayerEvent::Loaded => {
                if self.state == PlaybackState::Loading {
                    self.state = PlaybackState::Ready;
                    self.playing = true;
                    if self.switched_scheme {
                        self.notices.info("Stream recovered after protocol switch");
                    }
                }
                None
            }
            PlayerEvent::Failed(reason) => self.on_failure(reason),
            // The external signal is authoritative: fullscreen can change by
            // means the adapter did not initiate (e.g. the Escape key)
            PlayerEvent::FullscreenChanged(fullscreen) => {
                self.fullscreen = fullscreen;
                None
            }
        }
    }

    fn on_failure(&mut self, reason: String) -> Option<PlayerCommand> {
        if matches!(self.state, PlaybackState::Idle | PlaybackState::Error) {
            return None;
        }

        let alternate = self.current_url.as_deref().and_then(swap_scheme);
        match alternate {
            Some(alternate) if !self.attempted.contains(&alternate) => {
                debug!(url = %alternate, "retrying stream with swapped scheme");
                self.attempted.insert(alternate.clone());
                self.current_url = Some(alternate.clone());
                self.switched_scheme = true;
                self.playing = false;
                self.state = PlaybackState::Loading;
                Some(PlayerCommand::Load(alternate))
            }
            _ => {
                self.state = PlaybackState::Error;
                self.playing = false;
                self.notices.error(format!("Playback failed: {reason}"));
                None
            }
        }
    }

    /// Toggle between play and pause; enabled only once Ready
    pub fn toggle_play(&mut self) -> Option<PlayerCommand> {
        if self.state != PlaybackState::Ready {
            return None;
        }
        self.playing = !self.playing;
        Some(if self.playing {
            PlayerCommand::Play
        } else {
            PlayerCommand::Pause
        })
    }

    /// Set volume, clamped to [0.0, 1.0]; enabled only once Ready
    pub fn set_volume(&mut self, volume: f32) -> Option<PlayerCommand> {
        if self.state != PlaybackState::Ready {
            return None;
        }
        self.volume = volume.clamp(0.0, 1.0);
        Some(PlayerCommand::SetVolume(self.volume))
    }

    /// Toggle mute; enabled only once Ready
    pub fn toggle_mute(&mut self) -> Option<PlayerCommand> {
        if self.state != PlaybackState::Ready {
            return None;
        }
        self.muted = !self.muted;
        Some(PlayerCommand::SetMuted(self.muted))
    }

    /// Request entering or exiting fullscreen based on the current flag.
    ///
    /// The flag itself only changes when the surface reports
    /// [`PlayerEvent::FullscreenChanged`].
    pub fn toggle_fullscreen(&mut self) -> Option<PlayerCommand> {
        if self.state != PlaybackState::Ready {
            return None;
        }
        Some(if self.fullscreen {
            PlayerCommand::ExitFullscreen
        } else {
            PlayerCommand::EnterFullscreen
        })
    }
}
