//! Storage layer
//!
//! Repositories over a process-wide concurrent store. The persistence
//! engine behind the repositories is deliberately abstract: every
//! operation is a self-contained read-modify-write against the store's
//! own concurrency guarantees, and the order aggregate occupies a single
//! slot so it is written as one unit.

pub mod repository;
mod store;

pub use store::{Database, Store};

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for shared::ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(resource) => shared::ApiError::NotFound(resource),
            RepoError::Duplicate(resource) => shared::ApiError::Conflict(resource),
            RepoError::Storage(message) => shared::ApiError::Database(message),
        }
    }
}

/// Common repository trait for the CRUD-shaped stores
#[allow(async_fn_in_trait)]
pub trait Repository<T, CreateDto, UpdateDto> {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>>;
    async fn create(&self, data: CreateDto) -> RepoResult<T>;
    async fn update(&self, id: &str, data: UpdateDto) -> RepoResult<T>;
    async fn delete(&self, id: &str) -> RepoResult<()>;
}
