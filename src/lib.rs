//! Local Library
//!
//! A server-rendered library catalog: list, view, create, update and delete
//! authors, with each author's books shown alongside.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(store: repository::SharedStore) -> Self {
        Self {
            services: Arc::new(services::Services::new(store)),
        }
    }
}
