pub mod app;
pub mod app_context;
pub mod components;
pub mod local_file_url;
pub mod stores;

pub use app::*;
pub use app_context::{use_app_context, AppContext};
pub use components::*;
pub use stores::{use_app_stores, AppStores, SignalStore};
