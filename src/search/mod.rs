//! Search page orchestration independent of the UI runtime.
//!
//! The page component feeds the query and the coordinator snapshot through
//! [`plan_sync_for`] and dispatches the resulting actions, then renders from
//! [`derive_view`].

pub mod page;

pub use page::{
    derive_view, normalize_query, plan_sync, plan_sync_for, plan_teardown, search_key, SearchView, SyncPlan, ViewBody,
    EMPTY_QUERY_MESSAGE, NO_RESULTS_MESSAGE, SEARCHING_MESSAGE,
};
