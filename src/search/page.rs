use crate::api::images_from_payload;
use crate::query::{FetchStatus, QueryCoordinator, QueryKey, QuerySnapshot};
use crate::store::{ImageAction, ImageState, LoaderAction};
use serde_json::Value;
use tracing::debug;

pub const SEARCHING_MESSAGE: &str = "Searching images...";
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";
pub const NO_RESULTS_MESSAGE: &str = "No images found.";

/// Trimmed query, `None` when missing or blank
pub fn normalize_query(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
}

/// Coordinator key for a query, and whether fetching is enabled
pub fn search_key(query: Option<&str>) -> (QueryKey, bool) {
    let key = QueryKey::search_images(query.unwrap_or_default());
    let enabled = key.is_enabled();
    (key, enabled)
}

/// Store writes the page performs for one state observation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncPlan {
    pub images: Option<ImageAction>,
    pub loader: Option<LoaderAction>,
}

/// Decide which actions bring the shared stores in line with the query and
/// the coordinator's state.
///
/// - no query: clear the results, hide the loader
/// - loading: show the loader, leave results as they are
/// - error: hide the loader, keep the last good results
/// - success: replace the results with the payload, hide the loader
pub fn plan_sync(query: Option<&str>, snapshot: &QuerySnapshot<Value>) -> SyncPlan {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return SyncPlan {
            images: Some(ImageAction::SetImages(Vec::new())),
            loader: Some(LoaderAction::Hide),
        };
    };

    let plan = match snapshot.status {
        FetchStatus::Loading => SyncPlan {
            images: None,
            loader: Some(LoaderAction::show(SEARCHING_MESSAGE)),
        },
        FetchStatus::Error => SyncPlan {
            images: None,
            loader: Some(LoaderAction::Hide),
        },
        FetchStatus::Success => SyncPlan {
            images: Some(ImageAction::SetImages(images_from_payload(
                snapshot.data.as_ref(),
            ))),
            loader: Some(LoaderAction::Hide),
        },
        FetchStatus::Idle => SyncPlan::default(),
    };
    debug!("Sync for {:?} in {:?}", query, snapshot.status);
    plan
}

/// [`plan_sync`] against a live coordinator.
///
/// Returns `None` while the coordinator is still on an earlier key for a
/// non-empty query: its snapshot describes the previous search and must not
/// reach the stores. An empty query always plans, since it does not depend
/// on fetch state.
pub fn plan_sync_for(
    query: Option<&str>,
    coordinator: &QueryCoordinator<Value>,
) -> Option<SyncPlan> {
    let (key, enabled) = search_key(query);
    if enabled && coordinator.key() != Some(&key) {
        debug!("Skipping sync, coordinator still on {:?}", coordinator.key());
        return None;
    }
    Some(plan_sync(query, coordinator.snapshot()))
}

/// Store writes when the page goes away.
///
/// Any in-flight fetch dies with the page, so nothing would hide the loader.
pub fn plan_teardown() -> SyncPlan {
    SyncPlan {
        images: None,
        loader: Some(LoaderAction::Hide),
    }
}

/// Main area of the page
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    Placeholder(&'static str),
    Grid,
}

/// Everything the page renders, derived fresh on every render
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub heading: Option<String>,
    pub result_count: usize,
    pub body: ViewBody,
    pub show_viewer: bool,
    pub show_retry: bool,
}

pub fn derive_view(
    query: Option<&str>,
    images: &ImageState,
    snapshot: &QuerySnapshot<Value>,
) -> SearchView {
    let query = query.filter(|q| !q.is_empty());
    let result_count = images.images().len();

    let body = match query {
        None => ViewBody::Placeholder(EMPTY_QUERY_MESSAGE),
        Some(_) if result_count == 0 && !snapshot.is_loading() => {
            ViewBody::Placeholder(NO_RESULTS_MESSAGE)
        }
        Some(_) => ViewBody::Grid,
    };

    SearchView {
        heading: query.map(|q| format!("Search Results for \"{}\"", q)),
        result_count,
        body,
        show_viewer: images.is_image_view_open(),
        show_retry: query.is_some() && snapshot.is_error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Image;
    use crate::store::{Reducer, Store};
    use serde_json::json;

    fn snapshot(status: FetchStatus, data: Option<Value>) -> QuerySnapshot<Value> {
        QuerySnapshot {
            status,
            data,
            error: None,
        }
    }

    fn state_with(ids: &[&str]) -> ImageState {
        ImageState::default().reduce(ImageAction::SetImages(
            ids.iter().map(|id| Image::with_id(*id)).collect(),
        ))
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(None), None);
        assert_eq!(normalize_query(Some("")), None);
        assert_eq!(normalize_query(Some("   ")), None);
        assert_eq!(normalize_query(Some(" cats ")), Some("cats".to_string()));
    }

    #[test]
    fn test_search_key_enabled_iff_query() {
        for (query, expected) in [(None, false), (Some(""), false), (Some("cats"), true)] {
            let (key, enabled) = search_key(query);
            assert_eq!(enabled, expected);
            assert_eq!(key.scope(), QueryKey::SEARCH_IMAGES);
        }
    }

    #[test]
    fn test_empty_query_clears_and_hides() {
        let plan = plan_sync(None, &snapshot(FetchStatus::Loading, None));
        assert_eq!(plan.images, Some(ImageAction::SetImages(Vec::new())));
        assert_eq!(plan.loader, Some(LoaderAction::Hide));
    }

    #[test]
    fn test_loading_shows_loader_and_keeps_results() {
        let plan = plan_sync(Some("cats"), &snapshot(FetchStatus::Loading, None));
        assert_eq!(plan.images, None);
        assert_eq!(plan.loader, Some(LoaderAction::show("Searching images...")));
    }

    #[test]
    fn test_error_hides_loader_and_keeps_results() {
        let plan = plan_sync(Some("cats"), &snapshot(FetchStatus::Error, None));
        assert_eq!(plan.images, None);
        assert_eq!(plan.loader, Some(LoaderAction::Hide));
    }

    #[test]
    fn test_success_replaces_results() {
        let data = json!([{"id": "1"}, {"id": "2"}]);
        let plan = plan_sync(Some("cats"), &snapshot(FetchStatus::Success, Some(data)));

        assert_eq!(
            plan.images,
            Some(ImageAction::SetImages(vec![
                Image::with_id("1"),
                Image::with_id("2")
            ]))
        );
        assert_eq!(plan.loader, Some(LoaderAction::Hide));
    }

    #[test]
    fn test_success_with_non_array_payload_is_empty() {
        let plan = plan_sync(
            Some("cats"),
            &snapshot(FetchStatus::Success, Some(json!({"detail": "oops"}))),
        );
        assert_eq!(plan.images, Some(ImageAction::SetImages(Vec::new())));
    }

    #[test]
    fn test_sync_waits_for_coordinator_to_reach_query() {
        let mut coordinator = QueryCoordinator::<Value>::default();
        let (cats, enabled) = search_key(Some("cats"));
        let ticket = coordinator.set_key(cats, enabled).unwrap();
        coordinator.settle::<String>(ticket, Ok(json!([{"id": "cat"}])));

        // Query already moved on, coordinator still holds the cats result
        assert_eq!(plan_sync_for(Some("dogs"), &coordinator), None);

        let plan = plan_sync_for(Some("cats"), &coordinator).unwrap();
        assert_eq!(
            plan.images,
            Some(ImageAction::SetImages(vec![Image::with_id("cat")]))
        );
    }

    #[test]
    fn test_sync_for_empty_query_ignores_coordinator_key() {
        let mut coordinator = QueryCoordinator::<Value>::default();
        let (cats, enabled) = search_key(Some("cats"));
        coordinator.set_key(cats, enabled);

        let plan = plan_sync_for(None, &coordinator).unwrap();
        assert_eq!(plan.images, Some(ImageAction::SetImages(Vec::new())));
        assert_eq!(plan.loader, Some(LoaderAction::Hide));
    }

    #[test]
    fn test_teardown_hides_loader_only() {
        let plan = plan_teardown();
        assert_eq!(plan.images, None);
        assert_eq!(plan.loader, Some(LoaderAction::Hide));
    }

    #[test]
    fn test_view_without_query_is_placeholder() {
        let view = derive_view(None, &ImageState::default(), &QuerySnapshot::idle());
        assert_eq!(view.body, ViewBody::Placeholder(EMPTY_QUERY_MESSAGE));
        assert_eq!(view.heading, None);
        assert!(!view.show_retry);
    }

    #[test]
    fn test_view_no_results_only_when_not_loading() {
        let empty = ImageState::default();

        let settled = derive_view(Some("cats"), &empty, &snapshot(FetchStatus::Success, None));
        assert_eq!(settled.body, ViewBody::Placeholder(NO_RESULTS_MESSAGE));

        let loading = derive_view(Some("cats"), &empty, &snapshot(FetchStatus::Loading, None));
        assert_eq!(loading.body, ViewBody::Grid);
    }

    #[test]
    fn test_view_grid_with_results() {
        let mut store = Store::new(state_with(&["1", "2"]));
        store.dispatch(ImageAction::SetCurrentViewIndex(1));

        let view = derive_view(
            Some("cats"),
            store.state(),
            &snapshot(FetchStatus::Success, None),
        );
        assert_eq!(view.body, ViewBody::Grid);
        assert_eq!(view.result_count, 2);
        assert_eq!(view.heading.as_deref(), Some("Search Results for \"cats\""));
        assert!(view.show_viewer);
    }

    #[test]
    fn test_view_offers_retry_after_error() {
        let view = derive_view(
            Some("cats"),
            &state_with(&["1"]),
            &snapshot(FetchStatus::Error, None),
        );
        assert!(view.show_retry);
        assert_eq!(view.body, ViewBody::Grid);
    }
}
