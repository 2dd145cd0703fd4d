mod memory;
mod sql;

use async_trait::async_trait;

use crate::models::{Film, FilmFields};

pub use memory::MemoryStore;
pub use sql::SqlStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("film {0} not found")]
    NotFound(i64),
    #[error("film ids exhausted")]
    IdsExhausted,
    #[error(transparent)]
    Storage(#[from] sea_orm::DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The canonical collection of films.
///
/// Ids are assigned by the store, strictly increase in creation order and
/// are never handed out twice, even after the film holding one is deleted.
/// `update` and `delete` only touch existing ids and report
/// [`StoreError::NotFound`] otherwise.
#[async_trait]
pub trait FilmStore: Send + Sync + 'static {
    /// All films, ordered by id.
    async fn list(&self) -> StoreResult<Vec<Film>>;

    async fn create(&self, fields: FilmFields) -> StoreResult<Film>;

    async fn get(&self, id: i64) -> StoreResult<Film>;

    /// Replaces every field except the id.
    async fn update(&self, id: i64, fields: FilmFields) -> StoreResult<Film>;

    async fn delete(&self, id: i64) -> StoreResult<()>;

    fn backend(&self) -> &'static str;
}
