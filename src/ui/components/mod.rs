pub mod global_loader;
pub mod home;
pub mod image_card;
pub mod indexing_panel;
pub mod media_view;
pub mod navbar;
pub mod search_hooks;
pub mod search_page;

pub use global_loader::GlobalLoader;
pub use home::Home;
pub use image_card::ImageCard;
pub use indexing_panel::IndexingPanel;
pub use media_view::MediaView;
pub use navbar::Navbar;
pub use search_hooks::{use_search_images, SearchQuery};
pub use search_page::SearchPage;
