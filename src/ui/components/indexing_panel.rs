use crate::api::IndexingStatus;
use crate::ui::app_context::use_app_context;
use dioxus::prelude::*;
use tracing::{info, warn};

/// Starts backend indexing and polls its progress until it stops
#[component]
pub fn IndexingPanel() -> Element {
    let context = use_app_context();
    let mut status = use_signal(|| None::<IndexingStatus>);
    let mut message = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);
    let mut is_polling = use_signal(|| false);

    let mut start_indexing = move || {
        if is_polling() {
            return;
        }
        let client = context.client.clone();
        let poll_interval = context.config.status_poll_interval;
        is_polling.set(true);

        spawn(async move {
            error.set(None);
            message.set(None);

            match client.trigger_indexing().await {
                Ok(envelope) => {
                    if let Some(reason) = envelope.failure_reason() {
                        warn!("Indexing not started: {}", reason);
                        error.set(Some(reason));
                        is_polling.set(false);
                        return;
                    }
                    let started = envelope
                        .data
                        .map(|d| d.message)
                        .unwrap_or_else(|| "Indexing started".to_string());
                    info!("{}", started);
                    message.set(Some(started));
                }
                Err(e) => {
                    error.set(Some(format!("Failed to start indexing: {}", e)));
                    is_polling.set(false);
                    return;
                }
            }

            loop {
                match client.get_indexing_status().await {
                    Ok(envelope) => match envelope.into_result() {
                        Ok(Some(current)) => {
                            let keep_polling = current.is_active && current.error.is_none();
                            status.set(Some(current));
                            if !keep_polling {
                                break;
                            }
                        }
                        Ok(None) => break,
                        Err(failure) => {
                            error.set(Some(failure.to_string()));
                            break;
                        }
                    },
                    Err(e) => {
                        warn!("Indexing status poll failed: {}", e);
                        error.set(Some(format!("Failed to read indexing status: {}", e)));
                        break;
                    }
                }
                tokio::time::sleep(poll_interval).await;
            }

            is_polling.set(false);
        });
    };

    rsx! {
        div { class: "bg-gray-800 rounded-lg p-6 mt-8",
            div { class: "flex items-center justify-between mb-4",
                h2 { class: "text-xl font-bold text-white", "Semantic index" }
                button {
                    class: "px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg disabled:bg-gray-600",
                    disabled: is_polling(),
                    onclick: move |_| start_indexing(),
                    if is_polling() { "Indexing..." } else { "Index images" }
                }
            }

            if let Some(text) = message() {
                p { class: "text-gray-300 mb-2", "{text}" }
            }

            if let Some(current) = status() {
                div { class: "w-full bg-gray-700 rounded h-2 mb-2",
                    div {
                        class: "bg-blue-500 h-2 rounded",
                        style: "width: {current.percent()}%",
                    }
                }
                p { class: "text-gray-400 text-sm", "{current.summary()}" }
            }

            if let Some(err) = error() {
                div { class: "bg-red-900 border border-red-700 text-red-100 px-4 py-3 rounded mt-2",
                    p { "{err}" }
                }
            }
        }
    }
}
