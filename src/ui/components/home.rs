use crate::host::{DocRef, Doctype};
use crate::ui::{AppContext, Route};
use dioxus::prelude::*;

const DOCTYPES: [Doctype; 3] = [
    Doctype::DriftSession,
    Doctype::DriftTest,
    Doctype::DriftTestDefinition,
];

/// Landing page: open a document form by type and name
#[component]
pub fn Home() -> Element {
    let context = use_context::<AppContext>();
    let start_document = context.config.start_document.clone();
    let mut doctype = use_signal(|| Doctype::DriftSession);
    let mut name = use_signal(String::new);

    let open = move |_: MouseEvent| {
        let trimmed = name.read().trim().to_string();
        if trimmed.is_empty() {
            return;
        }
        navigator().push(Route::for_doc(&DocRef::new(doctype(), trimmed)));
    };

    rsx! {
        div { class: "max-w-xl",
            h1 { class: "text-3xl font-bold mb-6", "Open a document" }

            if let Some(doc) = start_document {
                div { class: "mb-6",
                    Link {
                        to: Route::for_doc(&doc),
                        class: "text-blue-500 hover:text-blue-700 underline",
                        "Continue with {doc}"
                    }
                }
            }

            div { class: "flex gap-3",
                select {
                    class: "p-2 border border-gray-300 rounded-lg",
                    onchange: move |evt| {
                        if let Ok(parsed) = evt.value().parse::<Doctype>() {
                            doctype.set(parsed);
                        }
                    },
                    for option_doctype in DOCTYPES {
                        option {
                            value: "{option_doctype}",
                            selected: option_doctype == doctype(),
                            "{option_doctype}"
                        }
                    }
                }
                input {
                    class: "flex-1 p-2 border border-gray-300 rounded-lg",
                    placeholder: "Document name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                button {
                    class: "bg-blue-500 text-white px-4 py-2 rounded-lg hover:bg-blue-600 transition-colors",
                    onclick: open,
                    "Open"
                }
            }
        }
    }
}
