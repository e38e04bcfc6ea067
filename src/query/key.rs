use std::fmt;

/// Cache key for a query: a fixed scope plus the query string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    scope: &'static str,
    query: String,
}

impl QueryKey {
    pub const SEARCH_IMAGES: &'static str = "search-images";

    pub fn new(scope: &'static str, query: impl Into<String>) -> Self {
        Self {
            scope,
            query: query.into(),
        }
    }

    /// `['search-images', query]`
    pub fn search_images(query: impl Into<String>) -> Self {
        Self::new(Self::SEARCH_IMAGES, query)
    }

    pub fn scope(&self) -> &'static str {
        self.scope
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// A key is only worth fetching when it carries a query
    pub fn is_enabled(&self) -> bool {
        !self.query.is_empty()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {:?}]", self.scope, self.query)
    }
}
