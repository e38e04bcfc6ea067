use crate::search::normalize_query;
use crate::ui::Route;
use dioxus::prelude::*;

use super::global_loader::GlobalLoader;

/// Layout with the top bar, the routed page and the global loader
#[component]
pub fn Navbar() -> Element {
    let mut search_input = use_signal(String::new);

    rsx! {
        div { id: "navbar", class: "bg-gray-800 text-white p-4 flex items-center gap-6",
            Link { to: Route::Home {}, class: "font-bold hover:text-blue-300 transition-colors",
                "picto"
            }
            form {
                class: "flex-1 max-w-xl",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    let raw = search_input.read().clone();
                    if let Some(q) = normalize_query(Some(raw.as_str())) {
                        navigator().push(Route::SearchPage { q });
                    }
                },
                input {
                    class: "w-full px-3 py-2 bg-gray-700 border border-gray-600 rounded-lg",
                    placeholder: "Search images...",
                    value: "{search_input}",
                    oninput: move |event| search_input.set(event.value()),
                }
            }
        }
        Outlet::<Route> {}
        GlobalLoader {}
    }
}
