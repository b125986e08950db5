use crate::host::DocRef;
use crate::playback::keymap::command_for_key;
use crate::playback::{PlaybackCommand, PlaybackRate, PlaylistHandle, SurfaceKind};
use crate::ui::AppContext;
use dioxus::prelude::*;

use super::playback_hooks::use_playlist_player;

const VIDEO_ID: &str = "video_html";

#[component]
fn PlaylistControlsZone(
    on_previous: EventHandler<()>,
    on_toggle: EventHandler<()>,
    on_next: EventHandler<()>,
    on_rate: EventHandler<PlaybackRate>,
    on_editing: EventHandler<bool>,
    indicator: ReadOnlySignal<String>,
    toggle_label: ReadOnlySignal<&'static str>,
    rate: ReadOnlySignal<PlaybackRate>,
    is_loading: ReadOnlySignal<bool>,
) -> Element {
    rsx! {
        div { class: "flex items-center gap-3 mt-3",
            button {
                class: "px-3 py-2 bg-gray-700 text-white rounded hover:bg-gray-600",
                onclick: move |_| on_previous.call(()),
                "Prev"
            }
            span { class: "text-sm text-gray-700 w-28 text-center", "{indicator}" }
            button {
                class: "px-3 py-2 bg-gray-700 text-white rounded hover:bg-gray-600",
                onclick: move |_| on_next.call(()),
                "Next"
            }
            button {
                class: if is_loading() {
                    "px-4 py-2 bg-blue-600 text-white rounded opacity-75"
                } else {
                    "px-4 py-2 bg-blue-600 text-white rounded hover:bg-blue-500"
                },
                onclick: move |_| on_toggle.call(()),
                "{toggle_label}"
            }
            label { class: "text-sm text-gray-700", "Speed" }
            select {
                class: "p-2 border border-gray-300 rounded",
                // While focused, keys belong to the select
                onfocus: move |_| on_editing.call(true),
                onblur: move |_| on_editing.call(false),
                onchange: move |evt| {
                    if let Ok(parsed) = evt.value().parse::<PlaybackRate>() {
                        on_rate.call(parsed);
                    }
                },
                for option_rate in PlaybackRate::ALL {
                    option {
                        value: "{option_rate}",
                        selected: option_rate == rate(),
                        "{option_rate}"
                    }
                }
            }
        }
    }
}

fn send(handle: &PlaylistHandle, command: PlaybackCommand) {
    match command {
        PlaybackCommand::PlayIndex(index) => handle.play_index(index),
        PlaybackCommand::Next => handle.next(),
        PlaybackCommand::Previous => handle.previous(),
        PlaybackCommand::TogglePlayPause => handle.toggle_play_pause(),
        PlaybackCommand::SetRate(rate) => handle.set_rate(rate),
    }
}

/// Recorded videos of a session, played back one after another
#[component]
pub fn VideoPlaylist(doc: DocRef) -> Element {
    let context = use_context::<AppContext>();
    let bare = context.config.surface == SurfaceKind::Bare;
    let toggle_key = context.config.toggle_key.clone();
    let player = use_playlist_player(doc, VIDEO_ID);
    let view = player.view;

    let indicator = use_memo(move || view.read().indicator_text());
    let toggle_label = use_memo(move || view.read().toggle_label());
    let rate = use_memo(move || view.read().rate);
    let is_loading = use_memo(move || view.read().is_loading());
    let mut editing = use_signal(|| false);

    let onkeydown = {
        let handle = player.handle.clone();
        move |evt: KeyboardEvent| {
            if let Some(command) = command_for_key(&evt.key().to_string(), &toggle_key, editing()) {
                evt.prevent_default();
                send(&handle, command);
            }
        }
    };

    if view.read().shows_no_media() {
        return rsx! {
            div { class: "p-6 bg-gray-100 text-gray-600 rounded-lg", "No videos found" }
        };
    }

    let show_navigation = view.read().shows_navigation();
    let previous = player.handle.clone();
    let next = player.handle.clone();
    let toggle = player.handle.clone();
    let set_rate = player.handle.clone();

    rsx! {
        div {
            id: "video_container",
            class: "outline-none",
            tabindex: "0",
            onkeydown: onkeydown,
            video {
                id: VIDEO_ID,
                class: "w-full max-h-[60vh] bg-black rounded-lg",
                controls: bare,
                preload: "metadata",
                playsinline: true,
            }
            if show_navigation {
                PlaylistControlsZone {
                    on_previous: move |_| previous.previous(),
                    on_toggle: move |_| toggle.toggle_play_pause(),
                    on_next: move |_| next.next(),
                    on_rate: move |r| set_rate.set_rate(r),
                    on_editing: move |focused| editing.set(focused),
                    indicator,
                    toggle_label,
                    rate,
                    is_loading,
                }
            } else {
                p { class: "text-sm text-gray-500 mt-3", "Loading videos..." }
            }
        }
    }
}
