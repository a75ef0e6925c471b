//! Laptop Catalog
//!
//! An in-memory registry of laptop records with a REST JSON API: laptops are
//! created with a unique UUID and searched with a streaming, cancellable scan.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod repository;
pub mod sample;
pub mod search;
pub mod serializer;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state with a fresh, empty repository
    pub fn new(config: AppConfig) -> Self {
        let repository = repository::Repository::new();
        let services = services::Services::new(repository, &config.search);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
