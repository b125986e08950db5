use crate::ui::components::notice_context::NoticeContext;
use dioxus::prelude::*;

#[component]
pub fn GlobalNotice() -> Element {
    let notice = use_context::<NoticeContext>();
    let notice_for_ok = notice.clone();
    let notice_for_overlay = notice.clone();

    rsx! {
        if *notice.is_open.read() {
            div {
                class: "fixed inset-0 bg-black/50 flex items-center justify-center z-[3000]",
                onclick: move |_| {
                    notice_for_overlay.hide();
                },
                div {
                    class: "bg-gray-800 rounded-lg p-6 max-w-md w-full mx-4",
                    onclick: move |evt| evt.stop_propagation(),
                    h2 { class: "text-xl font-bold text-white mb-4", "{notice.title()}" }
                    p { class: "text-gray-300 mb-6 whitespace-pre-line", "{notice.message()}" }
                    div { class: "flex justify-end",
                        button {
                            class: "px-4 py-2 bg-blue-600 hover:bg-blue-500 text-white rounded-lg",
                            onclick: move |_| {
                                notice_for_ok.hide();
                            },
                            "OK"
                        }
                    }
                }
            }
        }
    }
}
