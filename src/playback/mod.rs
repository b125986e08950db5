pub mod keymap;
pub mod progress;
pub mod service;
pub mod state;
pub mod surface;
pub mod view;

pub use progress::{PlayerEvent, PlayerEventHub};
pub use service::{PlaybackCommand, PlaylistController, PlaylistHandle};
pub use state::{LoadToken, Notice, PlaybackRate, PlayerState, PositionIndicator};
pub use surface::{PlaybackSurface, SurfaceError, SurfaceEvent, SurfaceEventKind, SurfaceKind};
pub use view::PlayerView;
