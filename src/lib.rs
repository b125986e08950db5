// Library exports for integration tests and the desktop binary

pub mod config;
pub mod host;
pub mod playback;
pub mod playlist;

#[cfg(feature = "desktop")]
pub mod ui;

pub use config::Config;
pub use playlist::Playlist;
