//! Repository layer: in-memory record storage

pub mod laptops;

use std::sync::Arc;

use thiserror::Error;

pub use laptops::LaptopStore;

/// Storage failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record with id {0} already exists")]
    AlreadyExists(String),

    #[error("storage fault: {0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Main repository struct holding every store
#[derive(Clone, Default)]
pub struct Repository {
    pub laptops: Arc<LaptopStore>,
}

impl Repository {
    /// Create a repository with empty stores
    pub fn new() -> Self {
        Self::default()
    }
}
