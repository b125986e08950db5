use crate::host::{form_layout, run_form_action, DocRef, Doctype, Document, HostAction, HostActions};
use crate::ui::AppContext;
use dioxus::prelude::*;
use tracing::warn;

use super::notice_context::NoticeContext;
use super::video_playlist::VideoPlaylist;

#[component]
pub fn SessionForm(name: String) -> Element {
    let doc = DocRef::new(Doctype::DriftSession, name.clone());
    rsx! { DocumentForm { key: "{doc}", doc: doc.clone() } }
}

#[component]
pub fn TestForm(name: String) -> Element {
    let doc = DocRef::new(Doctype::DriftTest, name.clone());
    rsx! { DocumentForm { key: "{doc}", doc: doc.clone() } }
}

#[component]
pub fn DefinitionForm(name: String) -> Element {
    let doc = DocRef::new(Doctype::DriftTestDefinition, name.clone());
    rsx! { DocumentForm { key: "{doc}", doc: doc.clone() } }
}

/// Document view with the status-dependent action buttons.
///
/// A successful action reloads the document; the player is remounted so a
/// refreshed session starts its playlist over.
#[component]
pub fn DocumentForm(doc: DocRef) -> Element {
    let context = use_context::<AppContext>();
    let notice = use_context::<NoticeContext>();
    let mut document = use_signal(|| None::<Document>);
    let mut load_error = use_signal(|| None::<String>);
    let mut running = use_signal(|| None::<HostAction>);
    let mut generation = use_signal(|| 0u32);

    use_hook({
        let client = context.client.clone();
        let doc = doc.clone();
        move || {
            spawn(async move {
                match client.reload(&doc).await {
                    Ok(loaded) => document.set(Some(loaded)),
                    Err(e) => {
                        warn!("Failed to load {}: {}", doc, e);
                        load_error.set(Some(e.to_string()));
                    }
                }
            });
        }
    });

    let on_action = use_callback({
        let client = context.client.clone();
        let doc = doc.clone();
        let notice = notice.clone();
        move |action: HostAction| {
            let client = client.clone();
            let doc = doc.clone();
            let notice = notice.clone();
            spawn(async move {
                running.set(Some(action));
                match run_form_action(&client, &doc, action).await {
                    Ok(outcome) => {
                        if !outcome.reply.messages.is_empty() {
                            notice.show("Message", outcome.reply.messages.join("\n"));
                        }
                        document.set(Some(outcome.document));
                        generation.with_mut(|g| *g += 1);
                    }
                    Err(e) => notice.show("Action failed", e.to_string()),
                }
                running.set(None);
            });
        }
    });

    let layout = document.read().as_ref().map(form_layout);

    rsx! {
        div {
            h1 { class: "text-3xl font-bold mb-2", "{doc.name}" }
            p { class: "text-gray-500 mb-6", "{doc.doctype}" }

            if let Some(error) = load_error() {
                div { class: "bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4",
                    "Failed to load document: {error}"
                }
            } else if let Some(layout) = layout {
                if let Some(status) = document.read().as_ref().and_then(|d| d.status().map(str::to_string)) {
                    p { class: "mb-4", "Status: {status}" }
                }
                div { class: "flex gap-3 mb-6",
                    for button in layout.buttons.iter().copied() {
                        button {
                            key: "{button.label}",
                            class: "bg-gray-700 text-white px-4 py-2 rounded hover:bg-gray-600 disabled:opacity-50",
                            disabled: running().is_some(),
                            onclick: move |_| on_action.call(button.action),
                            if running() == Some(button.action) {
                                "Working..."
                            } else {
                                "{button.label}"
                            }
                        }
                    }
                }
                if layout.show_player {
                    VideoPlaylist { key: "{generation}", doc: doc.clone() }
                }
            } else {
                p { class: "text-gray-600", "Loading..." }
            }
        }
    }
}
