use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Speed multipliers offered by the speed selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaybackRate {
    #[default]
    X1,
    X2,
    X4,
    X8,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 4] = [
        PlaybackRate::X1,
        PlaybackRate::X2,
        PlaybackRate::X4,
        PlaybackRate::X8,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            PlaybackRate::X1 => 1.0,
            PlaybackRate::X2 => 2.0,
            PlaybackRate::X4 => 4.0,
            PlaybackRate::X8 => 8.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaybackRate::X1 => "1x",
            PlaybackRate::X2 => "2x",
            PlaybackRate::X4 => "4x",
            PlaybackRate::X8 => "8x",
        }
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported playback rate: {0}")]
pub struct UnknownRate(pub String);

impl FromStr for PlaybackRate {
    type Err = UnknownRate;

    /// Accepts the select option values ("1", "2x", "4.0", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['x', 'X']);
        let value: f64 = trimmed.parse().map_err(|_| UnknownRate(s.to_string()))?;
        PlaybackRate::ALL
            .into_iter()
            .find(|rate| rate.multiplier() == value)
            .ok_or_else(|| UnknownRate(s.to_string()))
    }
}

/// Identifies one load request on the playback surface.
///
/// Surface events carry the token of the load that produced them so the
/// controller can drop callbacks that belong to an abandoned item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadToken(pub u64);

impl LoadToken {
    pub fn next(self) -> Self {
        LoadToken(self.0 + 1)
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Uninitialized,
    NoMedia,
    Ready {
        index: usize,
    },
    Loading {
        index: usize,
    },
    Playing {
        index: usize,
    },
    Paused {
        index: usize,
    },
    Ended {
        index: usize,
    },
}

impl PlayerState {
    pub fn index(&self) -> Option<usize> {
        match *self {
            PlayerState::Ready { index }
            | PlayerState::Loading { index }
            | PlayerState::Playing { index }
            | PlayerState::Paused { index }
            | PlayerState::Ended { index } => Some(index),
            PlayerState::Uninitialized | PlayerState::NoMedia => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlayerState::Playing { .. })
    }
}

/// "i+1 / N" position readout shown in the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionIndicator {
    pub index: usize,
    pub total: usize,
}

impl fmt::Display for PositionIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.index + 1, self.total)
    }
}

/// Blocking, user-visible notices raised by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoMoreVideos,
    LoadFailed { index: usize, reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoMoreVideos => f.write_str("No more videos"),
            Notice::LoadFailed { index, .. } => write!(f, "Could not load video {}", index + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_parses_select_values() {
        assert_eq!("1".parse::<PlaybackRate>(), Ok(PlaybackRate::X1));
        assert_eq!("4x".parse::<PlaybackRate>(), Ok(PlaybackRate::X4));
        assert_eq!("8.0".parse::<PlaybackRate>(), Ok(PlaybackRate::X8));
        assert!("3".parse::<PlaybackRate>().is_err());
        assert!("fast".parse::<PlaybackRate>().is_err());
    }

    #[test]
    fn default_rate_is_normal_speed() {
        assert_eq!(PlaybackRate::default().multiplier(), 1.0);
    }

    #[test]
    fn indicator_is_one_based() {
        let indicator = PositionIndicator { index: 0, total: 3 };
        assert_eq!(indicator.to_string(), "1 / 3");
    }

    #[test]
    fn state_index() {
        assert_eq!(PlayerState::NoMedia.index(), None);
        assert_eq!(PlayerState::Ended { index: 2 }.index(), Some(2));
    }
}
