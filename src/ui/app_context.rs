use crate::api::{ClientError, SearchBackend, SearchClient};
use crate::config::Config;
use dioxus::prelude::*;
use std::sync::Arc;

/// Services shared by every page, provided once at launch
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub client: SearchClient,
    pub search_backend: Arc<dyn SearchBackend>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let client = SearchClient::new(&config)?;
        Ok(Self {
            search_backend: Arc::new(client.clone()),
            client,
            config,
        })
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>()
}
