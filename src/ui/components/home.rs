use crate::search::normalize_query;
use crate::ui::components::indexing_panel::IndexingPanel;
use crate::ui::Route;
use dioxus::prelude::*;

/// Home page: search box and indexing controls
#[component]
pub fn Home() -> Element {
    let mut search_input = use_signal(String::new);

    let submit = move || {
        let raw = search_input.read().clone();
        let q = normalize_query(Some(raw.as_str())).unwrap_or_default();
        navigator().push(Route::SearchPage { q });
    };

    rsx! {
        div { class: "container mx-auto p-6 max-w-3xl",
            div { class: "text-center py-12",
                h1 { class: "text-4xl font-bold text-white mb-4", "Search your photos" }
                p { class: "text-xl text-gray-400 mb-8",
                    "Describe what you are looking for in plain words"
                }
                form {
                    class: "flex gap-2",
                    onsubmit: move |evt| {
                        evt.prevent_default();
                        submit();
                    },
                    input {
                        class: "flex-1 p-3 bg-gray-800 border border-gray-600 text-white rounded-lg text-lg",
                        placeholder: "e.g. dog on a beach at sunset",
                        value: "{search_input}",
                        oninput: move |event| search_input.set(event.value()),
                    }
                    button {
                        class: "px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg",
                        r#type: "submit",
                        "Search"
                    }
                }
            }

            IndexingPanel {}
        }
    }
}
