use crate::api::SearchBackend;
use crate::query::{FetchTicket, QueryCoordinator, QuerySnapshot};
use crate::search::{plan_sync_for, plan_teardown, search_key};
use crate::ui::app_context::use_app_context;
use crate::ui::stores::use_app_stores;
use dioxus::prelude::*;
use serde_json::Value;
use std::sync::Arc;

/// Search state for one page instance
#[derive(Clone)]
pub struct SearchQuery {
    coordinator: Signal<QueryCoordinator<Value>>,
    backend: Arc<dyn SearchBackend>,
}

impl SearchQuery {
    /// Current fetch state; subscribes the calling component
    pub fn snapshot(&self) -> QuerySnapshot<Value> {
        self.coordinator.read().snapshot().clone()
    }

    /// Run the current query again, ignoring cached freshness
    pub fn refetch(&self) {
        let mut coordinator = self.coordinator;
        let ticket = coordinator.write().refetch();
        if let Some(ticket) = ticket {
            self.start(ticket);
        }
    }

    fn start(&self, ticket: FetchTicket) {
        let mut coordinator = self.coordinator;
        let backend = self.backend.clone();
        let query = ticket.key().query().to_string();

        spawn(async move {
            let result = backend.search_images(&query).await;
            coordinator.write().settle(ticket, result);
        });
    }
}

/// Hook that keeps a search for `query` running and mirrors its state into
/// the shared image and loader stores. Hides the loader when the page goes away.
pub fn use_search_images(query: Option<String>) -> SearchQuery {
    let context = use_app_context();
    let stores = use_app_stores();
    let stale_time = context.config.query_stale_time;
    let coordinator = use_signal(move || QueryCoordinator::new(stale_time));

    let search = SearchQuery {
        coordinator,
        backend: context.search_backend.clone(),
    };

    let driver = search.clone();
    use_effect(use_reactive((&query,), move |(query,)| {
        let (key, enabled) = search_key(query.as_deref());
        let mut coordinator = driver.coordinator;
        let ticket = coordinator.write().set_key(key, enabled);
        if let Some(ticket) = ticket {
            driver.start(ticket);
        }
    }));

    use_effect(use_reactive((&query,), move |(query,)| {
        let plan = plan_sync_for(query.as_deref(), &coordinator.read());
        if let Some(plan) = plan {
            stores.apply(plan);
        }
    }));

    use_drop(move || stores.apply(plan_teardown()));

    search
}
