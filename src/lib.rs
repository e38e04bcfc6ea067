// Library exports for the desktop binary and integration tests

pub mod api;
pub mod config;
pub mod query;
pub mod search;
pub mod store;
pub mod ui;

// Re-export AppContext at crate root for easier access
pub use ui::AppContext;
