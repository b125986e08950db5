use dioxus::desktop::{Config as DioxusConfig, WindowBuilder};
use dioxus::prelude::*;

use crate::host::{DocRef, Doctype};
use crate::ui::components::*;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]
    #[route("/")]
    Home {},
    #[route("/session/:name")]
    SessionForm { name: String },
    #[route("/test/:name")]
    TestForm { name: String },
    #[route("/definition/:name")]
    DefinitionForm { name: String },
}

impl Route {
    /// Form route for a document
    pub fn for_doc(doc: &DocRef) -> Self {
        let name = doc.name.clone();
        match doc.doctype {
            Doctype::DriftSession => Route::SessionForm { name },
            Doctype::DriftTest => Route::TestForm { name },
            Doctype::DriftTestDefinition => Route::DefinitionForm { name },
        }
    }
}

pub fn make_config() -> DioxusConfig {
    DioxusConfig::default().with_window(make_window())
}

fn make_window() -> WindowBuilder {
    WindowBuilder::new()
        .with_title("Drift Review")
        .with_always_on_top(false)
        .with_inner_size(dioxus::desktop::LogicalSize::new(1100, 800))
}
