use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{FilmStore, StoreError, StoreResult};
use crate::{
    entities::film,
    models::{Film, FilmFields},
};

/// Table-backed store. Each call runs in its own transaction; an early
/// return drops the transaction, which rolls it back and hands the pooled
/// connection back.
///
/// Mutating transactions must open with their write. A deferred SQLite
/// transaction that reads first cannot be upgraded to a writer while another
/// writer is active and fails with `SQLITE_BUSY` instead of waiting.
#[derive(Clone)]
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn active_model(fields: FilmFields) -> film::ActiveModel {
    film::ActiveModel {
        id: NotSet,
        title: Set(fields.title),
        year: Set(fields.year),
        director: Set(fields.director),
        status: Set(fields.status),
        date_added: Set(fields.date_added),
        note: Set(fields.note),
    }
}

#[async_trait]
impl FilmStore for SqlStore {
    async fn list(&self) -> StoreResult<Vec<Film>> {
        let txn = self.db.begin().await?;
        let rows = film::Entity::find().order_by_asc(film::Column::Id).all(&txn).await?;
        txn.commit().await?;
        Ok(rows.into_iter().map(Film::from).collect())
    }

    async fn create(&self, fields: FilmFields) -> StoreResult<Film> {
        let txn = self.db.begin().await?;
        let row = active_model(fields).insert(&txn).await?;
        txn.commit().await?;
        tracing::debug!(id = row.id, "inserted film row");
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> StoreResult<Film> {
        let txn = self.db.begin().await?;
        let row = film::Entity::find_by_id(id).one(&txn).await?;
        txn.commit().await?;
        row.map(Film::from).ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: i64, fields: FilmFields) -> StoreResult<Film> {
        let txn = self.db.begin().await?;
        let res = film::Entity::update_many()
            .set(active_model(fields))
            .filter(film::Column::Id.eq(id))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }

        let row = film::Entity::find_by_id(id).one(&txn).await?.ok_or(StoreError::NotFound(id))?;
        txn.commit().await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let txn = self.db.begin().await?;
        let res = film::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        txn.commit().await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
