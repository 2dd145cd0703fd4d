use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{FilmStore, StoreError, StoreResult};
use crate::models::{Film, FilmFields};

/// In-process store. Nothing survives a restart.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    films: Vec<Film>,
    next_id: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    fn starting_at(next_id: i64) -> Self {
        Self {
            inner: RwLock::new(Inner { films: Vec::new(), next_id }),
        }
    }
}

#[async_trait]
impl FilmStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Film>> {
        Ok(self.inner.read().await.films.clone())
    }

    async fn create(&self, fields: FilmFields) -> StoreResult<Film> {
        // Counter and append happen under one write guard.
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let film = fields.into_film(id);
        inner.films.push(film.clone());
        Ok(film)
    }

    async fn get(&self, id: i64) -> StoreResult<Film> {
        let inner = self.inner.read().await;
        inner.films.iter().find(|f| f.id == id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: i64, fields: FilmFields) -> StoreResult<Film> {
        let mut inner = self.inner.write().await;
        let Some(slot) = inner.films.iter_mut().find(|f| f.id == id) else {
            return Err(StoreError::NotFound(id));
        };
        *slot = fields.into_film(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner.films.iter().position(|f| f.id == id) else {
            return Err(StoreError::NotFound(id));
        };
        inner.films.remove(pos);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::contract;

    #[tokio::test]
    async fn ids_strictly_increase() {
        contract::ids_strictly_increase(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn get_returns_what_was_created() {
        contract::get_returns_what_was_created(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        contract::update_replaces_all_fields(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        contract::deleted_ids_are_not_reused(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        contract::unknown_ids_are_not_found(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn arrival_scenario() {
        contract::arrival_scenario(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_after_delete() {
        let store = MemoryStore::new();
        for title in ["a", "b", "c", "d"] {
            store.create(contract::fields(title)).await.unwrap();
        }
        store.delete(2).await.unwrap();

        let titles: Vec<String> =
            store.list().await.unwrap().into_iter().map(|f| f.title).collect();
        assert_eq!(titles, vec!["a", "c", "d"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_distinct_gapless_ids() {
        let store = Arc::new(MemoryStore::new());

        let tasks = (0..64).map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store.create(contract::fields(&format!("film {i}"))).await.unwrap().id
            })
        });
        let mut ids: Vec<i64> =
            futures::future::join_all(tasks).await.into_iter().map(|r| r.unwrap()).collect();
        ids.sort_unstable();

        assert_eq!(ids, (1..=64).collect::<Vec<_>>());

        // list order matches id order
        let listed: Vec<i64> = store.list().await.unwrap().iter().map(|f| f.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_deletes_have_one_winner() {
        let store = Arc::new(MemoryStore::new());
        let id = store.create(contract::fields("contested")).await.unwrap().id;

        let tasks = (0..8).map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.delete(id).await.is_ok() })
        });
        let winners = futures::future::join_all(tasks)
            .await
            .into_iter()
            .filter(|deleted| *deleted.as_ref().unwrap())
            .count();

        assert_eq!(winners, 1);
        assert!(matches!(store.get(id).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_leave_one_complete_write() {
        let store = Arc::new(MemoryStore::new());
        let id = store.create(contract::fields("contested")).await.unwrap().id;

        let tasks = (0..8).map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let mut fields = contract::fields(&format!("writer {i}"));
                fields.note = format!("note {i}");
                store.update(id, fields).await
            })
        });
        let written: Vec<Film> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|r| r.unwrap().unwrap())
            .collect();

        // title and note always come from the same writer
        let stored = store.get(id).await.unwrap();
        assert!(written.contains(&stored));
        assert_eq!(store.list().await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn exhausted_counter_is_an_error_not_a_reused_id() {
        let store = MemoryStore::starting_at(i64::MAX);

        let result = store.create(contract::fields("one too many")).await;
        assert!(matches!(result, Err(StoreError::IdsExhausted)));
        assert!(store.list().await.unwrap().is_empty());
    }
}
