pub mod app;
pub mod document_form;
pub mod home;
pub mod navbar;
pub mod notice;
pub mod notice_context;
pub mod playback_hooks;
pub mod video_playlist;

pub use app::App;
pub use document_form::{DefinitionForm, DocumentForm, SessionForm, TestForm};
pub use home::Home;
pub use navbar::Navbar;
pub use notice::GlobalNotice;
pub use notice_context::NoticeContext;
pub use playback_hooks::{use_playlist_player, PlaylistPlayer};
pub use video_playlist::VideoPlaylist;
