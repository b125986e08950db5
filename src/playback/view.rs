use crate::playback::progress::PlayerEvent;
use crate::playback::state::{Notice, PlaybackRate, PlayerState, PositionIndicator};

/// Render model for the player widget, folded from [`PlayerEvent`]s
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerView {
    pub state: PlayerState,
    pub indicator: Option<PositionIndicator>,
    pub rate: PlaybackRate,
    pub total: usize,
}

impl PlayerView {
    /// Apply one event. Returns the notice to show, if the event carries one.
    pub fn apply(&mut self, event: &PlayerEvent) -> Option<Notice> {
        match event {
            PlayerEvent::PlaylistOpened { len } => self.total = *len,
            PlayerEvent::StateChanged { state } => self.state = *state,
            PlayerEvent::PositionChanged { indicator } => self.indicator = Some(*indicator),
            PlayerEvent::RateChanged { rate } => self.rate = *rate,
            PlayerEvent::Notice { notice } => return Some(notice.clone()),
        }
        None
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            PlayerState::Uninitialized | PlayerState::Loading { .. }
        )
    }

    /// The "no media available" indicator replaces the whole widget
    pub fn shows_no_media(&self) -> bool {
        self.state == PlayerState::NoMedia
    }

    /// Navigation controls exist only once a playlist has been opened
    pub fn shows_navigation(&self) -> bool {
        self.total > 0 && !matches!(self.state, PlayerState::NoMedia | PlayerState::Uninitialized)
    }

    pub fn indicator_text(&self) -> String {
        match self.indicator {
            Some(indicator) => format!("Video {}", indicator),
            None => "Video 0 / 0".to_string(),
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.state.is_playing() {
            "Pause"
        } else {
            "Play"
        }
    }
}
