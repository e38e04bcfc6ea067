use crate::search::SyncPlan;
use crate::store::{ImageAction, ImageState, LoaderState, Reducer};
use dioxus::prelude::*;
use tracing::trace;

/// Reducer state held in a signal so components re-render on change
pub struct SignalStore<S: Reducer> {
    state: Signal<S>,
}

impl<S: Reducer> Clone for SignalStore<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Reducer> Copy for SignalStore<S> {}

impl<S: Reducer> SignalStore<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: Signal::new(initial),
        }
    }

    /// Current state; subscribes the calling component
    pub fn state(&self) -> S {
        self.state.read().clone()
    }

    /// Reduce and replace the state. Does not subscribe the caller, and
    /// skips the write when nothing changed.
    pub fn dispatch(&self, action: S::Action) {
        let next = self.state.peek().reduce(action);
        let changed = *self.state.peek() != next;
        if changed {
            let mut state = self.state;
            state.set(next);
        }
    }
}

/// The process-wide stores
#[derive(Clone, Copy)]
pub struct AppStores {
    pub images: SignalStore<ImageState>,
    pub loader: SignalStore<LoaderState>,
}

impl AppStores {
    pub fn new() -> Self {
        Self {
            images: SignalStore::new(ImageState::default()),
            loader: SignalStore::new(LoaderState::default()),
        }
    }

    pub fn apply(&self, plan: SyncPlan) {
        trace!("Applying {:?}", plan);
        if let Some(action) = plan.images {
            self.images.dispatch(action);
        }
        if let Some(action) = plan.loader {
            self.loader.dispatch(action);
        }
    }

    pub fn open_image(&self, index: usize) {
        self.images.dispatch(ImageAction::SetCurrentViewIndex(index));
    }
}

impl Default for AppStores {
    fn default() -> Self {
        Self::new()
    }
}

/// Provider component that owns the stores for everything below it
#[component]
pub fn StoresProvider(children: Element) -> Element {
    use_context_provider(AppStores::new);

    rsx! {
        {children}
    }
}

pub fn use_app_stores() -> AppStores {
    use_context::<AppStores>()
}
