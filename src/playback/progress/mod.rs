pub mod handle;

use crate::playback::state::{Notice, PlaybackRate, PlayerState, PositionIndicator};
pub use handle::PlayerEventHub;

/// Updates published by the playlist controller
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    PlaylistOpened {
        len: usize,
    },
    StateChanged {
        state: PlayerState,
    },
    PositionChanged {
        indicator: PositionIndicator,
    },
    RateChanged {
        rate: PlaybackRate,
    },
    Notice {
        notice: Notice,
    },
}
