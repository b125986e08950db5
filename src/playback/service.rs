use crate::host::MediaSource;
use crate::playback::progress::{PlayerEvent, PlayerEventHub};
use crate::playback::state::{LoadToken, Notice, PlaybackRate, PlayerState, PositionIndicator};
use crate::playback::surface::{
    PlaybackSurface, SurfaceEvent, SurfaceEventKind, SurfaceEventReceiver,
};
use crate::playlist::Playlist;
use serde_json::Value;
use tokio::sync::mpsc as tokio_mpsc;
use tracing::{debug, info, warn};

/// Commands sent to the playlist controller
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    PlayIndex(isize),
    Next,
    Previous,
    TogglePlayPause,
    SetRate(PlaybackRate),
}

/// Handle to a running controller for sending commands and observing events
#[derive(Clone)]
pub struct PlaylistHandle {
    command_tx: tokio_mpsc::UnboundedSender<PlaybackCommand>,
    events: PlayerEventHub,
}

impl PlaylistHandle {
    pub fn play_index(&self, index: isize) {
        let _ = self.command_tx.send(PlaybackCommand::PlayIndex(index));
    }

    pub fn next(&self) {
        let _ = self.command_tx.send(PlaybackCommand::Next);
    }

    pub fn previous(&self) {
        let _ = self.command_tx.send(PlaybackCommand::Previous);
    }

    pub fn toggle_play_pause(&self) {
        let _ = self.command_tx.send(PlaybackCommand::TogglePlayPause);
    }

    pub fn set_rate(&self, rate: PlaybackRate) {
        let _ = self.command_tx.send(PlaybackCommand::SetRate(rate));
    }

    pub fn subscribe(&self) -> tokio_mpsc::UnboundedReceiver<PlayerEvent> {
        self.events.subscribe_all()
    }
}

/// Load that is waiting for its metadata callback
#[derive(Debug, Clone, Copy)]
struct PendingLoad {
    index: usize,
    autoplay: bool,
}

enum Step {
    Command(Option<PlaybackCommand>),
    Surface(SurfaceEvent),
}

/// Sequences a playlist through a single playback surface.
///
/// All state lives here and is only mutated from the controller's own task:
/// commands and surface events are consumed one at a time by [`run`].
///
/// [`run`]: PlaylistController::run
pub struct PlaylistController {
    surface: Box<dyn PlaybackSurface>,
    events: PlayerEventHub,
    command_rx: tokio_mpsc::UnboundedReceiver<PlaybackCommand>,
    surface_rx: SurfaceEventReceiver,
    playlist: Option<Playlist>,
    state: PlayerState,
    rate: PlaybackRate,
    indicator: Option<PositionIndicator>,
    token: LoadToken,
    pending: Option<PendingLoad>,
}

impl PlaylistController {
    /// Create a controller around `surface`. `surface_rx` must receive the
    /// events the surface reports.
    pub fn new(
        surface: Box<dyn PlaybackSurface>,
        surface_rx: SurfaceEventReceiver,
    ) -> (Self, PlaylistHandle) {
        let (command_tx, command_rx) = tokio_mpsc::unbounded_channel();
        let events = PlayerEventHub::new();

        let handle = PlaylistHandle {
            command_tx,
            events: events.clone(),
        };

        let controller = Self {
            surface,
            events,
            command_rx,
            surface_rx,
            playlist: None,
            state: PlayerState::Uninitialized,
            rate: PlaybackRate::default(),
            indicator: None,
            token: LoadToken(0),
            pending: None,
        };

        (controller, handle)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    pub fn indicator(&self) -> Option<PositionIndicator> {
        self.indicator
    }

    pub fn playlist(&self) -> Option<&Playlist> {
        self.playlist.as_ref()
    }

    /// Token of the most recent load request
    pub fn current_token(&self) -> LoadToken {
        self.token
    }

    pub fn subscribe(&self) -> tokio_mpsc::UnboundedReceiver<PlayerEvent> {
        self.events.subscribe_all()
    }

    /// Fetch the playlist from `source` and start on the first item.
    pub async fn open(&mut self, source: &dyn MediaSource) {
        let payload = match source.list_media_urls().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to fetch media URLs: {}", e);
                Value::Null
            }
        };
        self.open_with_payload(&payload);
    }

    /// Open the controller with an already-fetched provider payload
    pub fn open_with_payload(&mut self, payload: &Value) {
        if self.state != PlayerState::Uninitialized {
            warn!("Playlist already opened, ignoring new payload");
            return;
        }

        match Playlist::from_payload(payload) {
            Some(playlist) => {
                info!("Opened playlist with {} videos", playlist.len());
                let len = playlist.len();
                self.playlist = Some(playlist);
                self.events.emit(PlayerEvent::PlaylistOpened { len });
                self.set_state(PlayerState::Ready { index: 0 });
                self.load(0, true);
            }
            None => {
                info!("No media available for this session");
                self.set_state(PlayerState::NoMedia);
            }
        }
    }

    /// Process commands and surface events until every handle is dropped
    pub async fn run(mut self) {
        info!("Playlist controller started");

        loop {
            let step = tokio::select! {
                command = self.command_rx.recv() => Step::Command(command),
                Some(event) = self.surface_rx.recv() => Step::Surface(event),
            };

            match step {
                Step::Command(Some(command)) => self.dispatch(command),
                Step::Command(None) => break,
                Step::Surface(event) => self.on_surface_event(event),
            }
        }

        info!("Playlist controller stopped");
    }

    pub fn dispatch(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::PlayIndex(index) => self.play_index(index),
            PlaybackCommand::Next => self.next(),
            PlaybackCommand::Previous => self.previous(),
            PlaybackCommand::TogglePlayPause => self.toggle_play_pause(),
            PlaybackCommand::SetRate(rate) => self.set_rate(rate),
        }
    }

    /// Request playback of item `index`. Out-of-range requests leave the
    /// state untouched and raise a "no more videos" notice.
    pub fn play_index(&mut self, index: isize) {
        let Some(playlist) = &self.playlist else {
            debug!("Ignoring navigation to {} without a playlist", index);
            return;
        };

        match playlist.checked_index(index) {
            Some(index) => self.load(index, true),
            None => {
                debug!(
                    "Navigation to {} outside playlist of {}",
                    index,
                    playlist.len()
                );
                self.notice(Notice::NoMoreVideos);
            }
        }
    }

    pub fn next(&mut self) {
        if let Some(index) = self.state.index() {
            self.play_index(index as isize + 1);
        }
    }

    pub fn previous(&mut self) {
        if let Some(index) = self.state.index() {
            self.play_index(index as isize - 1);
        }
    }

    pub fn toggle_play_pause(&mut self) {
        match self.state {
            PlayerState::Playing { index } => {
                self.surface.pause();
                self.set_state(PlayerState::Paused { index });
            }
            PlayerState::Paused { .. } | PlayerState::Ended { .. } | PlayerState::Ready { .. } => {
                // State follows once the surface reports Playing
                self.surface.play(self.token);
            }
            PlayerState::Loading { .. } => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.autoplay = !pending.autoplay;
                    debug!("Autoplay after load set to {}", pending.autoplay);
                } else {
                    self.surface.play(self.token);
                }
            }
            PlayerState::Uninitialized | PlayerState::NoMedia => {}
        }
    }

    /// Select a playback rate; it sticks for every later item this session
    pub fn set_rate(&mut self, rate: PlaybackRate) {
        if self.rate != rate {
            self.rate = rate;
            self.events.emit(PlayerEvent::RateChanged { rate });
        }

        if self.state.index().is_some() && self.pending.is_none() {
            self.surface.set_rate(rate);
        }
    }

    /// Apply a surface lifecycle event, dropping events from abandoned loads
    pub fn on_surface_event(&mut self, event: SurfaceEvent) {
        if event.token != self.token {
            debug!(
                "Ignoring stale surface event {:?} for load {:?} (current {:?})",
                event.kind, event.token, self.token
            );
            return;
        }

        match event.kind {
            SurfaceEventKind::MetadataLoaded { duration } => self.on_metadata_loaded(duration),
            SurfaceEventKind::Playing => {
                if self.pending.is_some() {
                    debug!("Ignoring playing signal before metadata");
                    return;
                }
                if let Some(index) = self.state.index() {
                    self.set_state(PlayerState::Playing { index });
                }
            }
            SurfaceEventKind::Paused => {
                if let PlayerState::Playing { index } = self.state {
                    self.set_state(PlayerState::Paused { index });
                }
            }
            SurfaceEventKind::Ended => self.on_ended(),
            SurfaceEventKind::PlayRefused { reason } => {
                warn!("Playback refused: {}", reason);
                if let Some(index) = self.state.index() {
                    self.set_state(PlayerState::Paused { index });
                }
            }
            SurfaceEventKind::Failed { reason } => {
                let Some(index) = self.state.index() else {
                    return;
                };
                warn!("Failed to load video {}: {}", index + 1, reason);
                self.pending = None;
                self.set_indicator(index);
                self.set_state(PlayerState::Paused { index });
                self.notice(Notice::LoadFailed { index, reason });
            }
        }
    }

    fn load(&mut self, index: usize, autoplay: bool) {
        let Some(url) = self.playlist.as_ref().and_then(|p| p.get(index)) else {
            return;
        };
        let url = url.to_string();

        self.token = self.token.next();
        self.pending = Some(PendingLoad { index, autoplay });
        self.set_state(PlayerState::Loading { index });

        info!("Loading video {} ({})", index + 1, url);

        if let Err(e) = self.surface.load(&url, self.token) {
            self.on_surface_event(SurfaceEvent::new(
                self.token,
                SurfaceEventKind::Failed {
                    reason: e.to_string(),
                },
            ));
        }
    }

    fn on_metadata_loaded(&mut self, duration: Option<f64>) {
        let Some(pending) = self.pending.take() else {
            debug!("Metadata reported without a pending load");
            return;
        };
        debug!("Video {} metadata loaded, duration {:?}", pending.index + 1, duration);

        self.set_indicator(pending.index);

        self.surface.set_rate(self.rate);

        if pending.autoplay {
            self.surface.play(self.token);
        } else {
            self.set_state(PlayerState::Paused {
                index: pending.index,
            });
        }
    }

    fn on_ended(&mut self) {
        let Some(index) = self.state.index() else {
            return;
        };
        self.set_state(PlayerState::Ended { index });

        let len = self.playlist.as_ref().map_or(0, Playlist::len);
        if index + 1 < len {
            self.load(index + 1, true);
        } else {
            info!("Reached end of playlist");
        }
    }

    fn set_indicator(&mut self, index: usize) {
        let total = self.playlist.as_ref().map_or(0, Playlist::len);
        let indicator = PositionIndicator { index, total };
        self.indicator = Some(indicator);
        self.events.emit(PlayerEvent::PositionChanged { indicator });
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            self.state = state;
            self.events.emit(PlayerEvent::StateChanged { state });
        }
    }

    fn notice(&mut self, notice: Notice) {
        self.events.emit(PlayerEvent::Notice { notice });
    }
}
