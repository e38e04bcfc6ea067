use crate::api::Image;
use crate::store::ImageAction;
use crate::ui::local_file_url::media_url;
use crate::ui::stores::use_app_stores;
use dioxus::prelude::*;
use std::rc::Rc;

/// Full-screen viewer over the current result list
#[component]
pub fn MediaView(images: Rc<Vec<Image>>) -> Element {
    let stores = use_app_stores();
    let index = stores.images.state().current_view_index();

    let Some((index, image)) = index.and_then(|i| images.get(i).map(|image| (i, image.clone())))
    else {
        return rsx! {};
    };

    let total = images.len();
    let src = media_url(image.full_path());
    let name = image.file_name().to_string();

    rsx! {
        div {
            class: "media-view fixed inset-0 bg-black/90 flex flex-col items-center justify-center z-[2000]",
            tabindex: "0",
            onkeydown: move |evt| match evt.key() {
                Key::Escape => stores.images.dispatch(ImageAction::CloseImageView),
                Key::ArrowRight => stores.images.dispatch(ImageAction::NextImage),
                Key::ArrowLeft => stores.images.dispatch(ImageAction::PreviousImage),
                _ => {}
            },
            div { class: "absolute top-4 right-4 flex items-center gap-4",
                span { class: "text-gray-300 text-sm", "{index + 1} / {total}" }
                button {
                    class: "px-3 py-1 bg-gray-700 hover:bg-gray-600 text-white rounded",
                    onclick: move |_| stores.images.dispatch(ImageAction::CloseImageView),
                    "✕"
                }
            }
            div { class: "flex items-center gap-6",
                button {
                    class: "px-3 py-2 bg-gray-700/70 hover:bg-gray-600 text-white rounded-full text-2xl",
                    disabled: total < 2,
                    onclick: move |_| stores.images.dispatch(ImageAction::PreviousImage),
                    "‹"
                }
                img { src: "{src}", alt: "{name}", class: "rounded shadow-2xl" }
                button {
                    class: "px-3 py-2 bg-gray-700/70 hover:bg-gray-600 text-white rounded-full text-2xl",
                    disabled: total < 2,
                    onclick: move |_| stores.images.dispatch(ImageAction::NextImage),
                    "›"
                }
            }
            p { class: "mt-4 text-gray-400 text-sm", "{name}" }
        }
    }
}
