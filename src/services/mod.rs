//! Business logic services

pub mod authors;
pub mod catalog;

use crate::repository::SharedStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: SharedStore) -> Self {
        Self {
            authors: authors::AuthorsService::new(store.clone()),
            catalog: catalog::CatalogService::new(store),
        }
    }
}
