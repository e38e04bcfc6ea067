//! Process-wide UI state as plain values with pure reducers.
//!
//! Each state type implements [`Reducer`]; writers dispatch actions and the
//! result replaces the previous state wholesale.

pub mod images;
pub mod loader;

pub use images::{ImageAction, ImageState};
pub use loader::{LoaderAction, LoaderState};

pub trait Reducer: Clone + PartialEq + 'static {
    type Action;

    fn reduce(&self, action: Self::Action) -> Self;
}

/// A state value paired with its reducer, usable without any UI runtime
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store<S: Reducer> {
    state: S,
}

impl<S: Reducer> Store<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Apply an action; returns whether the state changed
    pub fn dispatch(&mut self, action: S::Action) -> bool {
        let next = self.state.reduce(action);
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }
}
