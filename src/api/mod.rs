pub mod client;
pub mod models;

pub use client::{ClientError, SearchBackend, SearchClient};
pub use models::{
    images_from_payload, BackendResponse, Image, IndexingStarted, IndexingStatus, LogicalFailure,
};
