use crate::ui::stores::use_app_stores;
use dioxus::prelude::*;

/// Blocking overlay driven by the loader store
#[component]
pub fn GlobalLoader() -> Element {
    let loader = use_app_stores().loader.state();

    rsx! {
        if loader.loading {
            div { class: "fixed inset-0 bg-black/50 flex items-center justify-center z-[3000]",
                div { class: "flex items-center bg-gray-800 rounded-lg px-6 py-4",
                    div { class: "animate-spin rounded-full h-8 w-8 border-b-2 border-blue-500" }
                    p { class: "ml-4 text-gray-300", "{loader.message}" }
                }
            }
        }
    }
}
