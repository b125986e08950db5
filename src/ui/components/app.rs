use crate::ui::{Route, MAIN_CSS};
use dioxus::prelude::*;
use tracing::debug;

use super::notice_context::NoticeContext;

#[component]
pub fn App() -> Element {
    debug!("Rendering app component");

    use_context_provider(NoticeContext::new);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
