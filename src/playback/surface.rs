use crate::playback::state::{LoadToken, PlaybackRate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tokio::sync::mpsc as tokio_mpsc;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Playback surface unavailable: {0}")]
    Unavailable(String),
    #[error("Playback surface rejected the request: {0}")]
    Rejected(String),
}

/// Lifecycle signals reported by a playback surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEventKind {
    /// Metadata for the loaded source is available; playback may start.
    MetadataLoaded { duration: Option<f64> },
    Playing,
    Paused,
    /// Natural end of playback.
    Ended,
    /// The play request was refused, typically by an autoplay policy.
    PlayRefused { reason: String },
    /// The source could not be loaded or decoded.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceEvent {
    pub token: LoadToken,
    pub kind: SurfaceEventKind,
}

impl SurfaceEvent {
    pub fn new(token: LoadToken, kind: SurfaceEventKind) -> Self {
        Self { token, kind }
    }
}

pub type SurfaceEventSender = tokio_mpsc::UnboundedSender<SurfaceEvent>;
pub type SurfaceEventReceiver = tokio_mpsc::UnboundedReceiver<SurfaceEvent>;

/// Capability set the playlist controller drives.
///
/// Calls return immediately. Outcomes (metadata, play started or refused,
/// end of playback, failures) come back asynchronously as [`SurfaceEvent`]s
/// tagged with the token passed to [`PlaybackSurface::load`].
pub trait PlaybackSurface {
    /// Point the surface at `url` and start loading it.
    fn load(&mut self, url: &str, token: LoadToken) -> Result<(), SurfaceError>;

    /// Request playback of the currently loaded source.
    fn play(&mut self, token: LoadToken);

    fn pause(&mut self);

    fn set_rate(&mut self, rate: PlaybackRate);
}

/// Which surface implementation the player widget mounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceKind {
    /// Plain video element with native controls.
    Bare,
    /// Muted autoplay fallback and first-frame nudge; the widget's own bar is
    /// the only control surface.
    #[default]
    Enhanced,
}

impl SurfaceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKind::Bare => "bare",
            SurfaceKind::Enhanced => "enhanced",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurfaceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bare" => Ok(SurfaceKind::Bare),
            "enhanced" => Ok(SurfaceKind::Enhanced),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_kind_parses_case_insensitively() {
        assert_eq!("Bare".parse::<SurfaceKind>(), Ok(SurfaceKind::Bare));
        assert_eq!(" enhanced ".parse::<SurfaceKind>(), Ok(SurfaceKind::Enhanced));
        assert!("videojs".parse::<SurfaceKind>().is_err());
    }
}
