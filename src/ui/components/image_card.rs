use crate::api::Image;
use crate::ui::local_file_url::media_url;
use dioxus::prelude::*;

/// Grid card for one search result
#[component]
pub fn ImageCard(image: Image, index: usize, on_open: EventHandler<usize>) -> Element {
    let src = media_url(image.preview_path());
    let name = image.file_name().to_string();

    rsx! {
        div {
            class: "image-card bg-gray-800 rounded-lg overflow-hidden shadow-lg hover:shadow-xl transition-shadow duration-300 cursor-pointer",
            onclick: move |_| on_open.call(index),
            if image.preview_path().is_empty() {
                div { class: "aspect-square bg-gray-700 flex items-center justify-center text-gray-500 text-4xl",
                    "🖼"
                }
            } else {
                img {
                    src: "{src}",
                    alt: "{name}",
                    loading: "lazy",
                    class: "w-full h-full object-cover",
                }
            }
            div { class: "p-2",
                p { class: "text-gray-300 text-sm truncate", title: "{name}", "{name}" }
            }
        }
    }
}
