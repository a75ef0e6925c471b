//! Business logic services

pub mod laptops;

use crate::{config::SearchConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub laptops: laptops::LaptopService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, search_config: &SearchConfig) -> Self {
        Self {
            laptops: laptops::LaptopService::new(repository, search_config),
        }
    }
}
