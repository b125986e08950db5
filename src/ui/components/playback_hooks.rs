use crate::host::{DocRef, SessionMediaSource};
use crate::playback::{PlayerView, PlaylistController, PlaylistHandle};
use crate::ui::surface::mount_surface;
use crate::ui::AppContext;
use dioxus::prelude::*;
use tokio::sync::mpsc as tokio_mpsc;
use tracing::debug;

use super::notice_context::NoticeContext;

/// Player state shared by the playlist widget and its controls
#[derive(Clone)]
pub struct PlaylistPlayer {
    pub handle: PlaylistHandle,
    pub view: Signal<PlayerView>,
}

/// Mount a surface on `video_id`, start a controller for the session's
/// recordings and keep a [`PlayerView`] in sync with its events.
///
/// Runs once per component instance; remount the component to start over.
pub fn use_playlist_player(doc: DocRef, video_id: &'static str) -> PlaylistPlayer {
    let context = use_context::<AppContext>();
    let notice = use_context::<NoticeContext>();
    let view = use_signal(PlayerView::default);

    let handle = use_hook(move || {
        let (surface_tx, surface_rx) = tokio_mpsc::unbounded_channel();
        let surface = mount_surface(context.config.surface, video_id, surface_tx);
        let (mut controller, handle) = PlaylistController::new(surface, surface_rx);

        let mut view = view;
        let mut events = controller.subscribe();
        spawn(async move {
            while let Some(event) = events.recv().await {
                let shown = view.with_mut(|v| v.apply(&event));
                if let Some(shown) = shown {
                    notice.show("Video", shown.to_string());
                }
            }
        });

        let source = SessionMediaSource::new(context.client.clone(), doc.clone());
        spawn(async move {
            debug!("Opening playlist for {}", doc);
            controller.open(&source).await;
            controller.run().await;
        });

        handle
    });

    PlaylistPlayer { handle, view }
}
