use crate::ui::{AppContext, Route};
use dioxus::prelude::*;

use super::notice::GlobalNotice;

/// Layout component with the site header and the global notice
#[component]
pub fn Navbar() -> Element {
    let context = use_context::<AppContext>();
    let site_url = context.client.site_url().to_string();

    rsx! {
        div { class: "bg-gray-800 text-white p-4 flex items-center justify-between",
            Link { to: Route::Home {}, class: "font-semibold hover:text-blue-300 transition-colors",
                "Drift Review"
            }
            span { class: "text-sm text-gray-400", "{site_url}" }
        }
        div { class: "container mx-auto p-6", Outlet::<Route> {} }
        GlobalNotice {}
    }
}
