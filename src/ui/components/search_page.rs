use crate::search::{derive_view, normalize_query, ViewBody};
use crate::ui::components::image_card::ImageCard;
use crate::ui::components::media_view::MediaView;
use crate::ui::components::search_hooks::use_search_images;
use crate::ui::stores::use_app_stores;
use crate::ui::Route;
use dioxus::prelude::*;
use tracing::debug;

/// Results page for the `q` query parameter
#[component]
pub fn SearchPage(q: String) -> Element {
    let query = normalize_query(Some(q.as_str()));
    debug!("Rendering search page for {:?}", query);

    let stores = use_app_stores();
    let search = use_search_images(query.clone());

    let images = stores.images.state();
    let snapshot = search.snapshot();
    let view = derive_view(query.as_deref(), &images, &snapshot);

    rsx! {
        div { class: "p-6 h-full overflow-y-auto",
            div { class: "mb-6 flex items-center gap-4",
                button {
                    class: "flex items-center gap-2 px-4 py-2 border border-gray-600 text-gray-200 rounded-lg hover:bg-gray-800",
                    onclick: move |_| {
                        navigator().push(Route::Home {});
                    },
                    "← Back Home"
                }
                if let Some(heading) = &view.heading {
                    h1 { class: "text-2xl font-bold text-white", "{heading}" }
                    span { class: "text-gray-400", "Found {view.result_count} results" }
                }
            }

            if view.show_retry {
                div { class: "flex items-center justify-between bg-red-900 border border-red-700 text-red-100 px-4 py-3 rounded mb-4",
                    p { "Search failed. Showing the last results that loaded." }
                    button {
                        class: "px-4 py-2 bg-red-700 hover:bg-red-600 text-white rounded-lg",
                        onclick: {
                            let search = search.clone();
                            move |_| search.refetch()
                        },
                        "Retry"
                    }
                }
            }

            match &view.body {
                ViewBody::Placeholder(message) => rsx! {
                    div { class: "flex h-[50vh] w-full items-center justify-center text-gray-400",
                        "{message}"
                    }
                },
                ViewBody::Grid => rsx! {
                    div { class: "grid grid-cols-1 gap-4 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 xl:grid-cols-5 pb-20",
                        for (index, image) in images.images().iter().enumerate() {
                            ImageCard {
                                key: "{image.id}",
                                image: image.clone(),
                                index,
                                on_open: move |index| stores.open_image(index),
                            }
                        }
                    }
                },
            }

            if view.show_viewer {
                MediaView { images: images.images_rc() }
            }
        }
    }
}
