use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Actor, ActorFields, Movie, MovieFields};
use crate::database::store::CastingStore;

/// One table: rows keyed by id plus a SERIAL-like counter. Ids are never
/// reused after a delete.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn replace(&mut self, id: i32, row: &T) -> Option<T> {
        let slot = self.rows.get_mut(&id)?;
        *slot = row.clone();
        Some(row.clone())
    }
}

/// In-process store used by the test suite and by `serve --in-memory`.
pub struct MemoryStore {
    actors: RwLock<Table<Actor>>,
    movies: RwLock<Table<Movie>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            actors: RwLock::new(Table::new()),
            movies: RwLock::new(Table::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CastingStore for MemoryStore {
    async fn migrate(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn list_actors(&self) -> Result<Vec<Actor>, DatabaseError> {
        Ok(self.actors.read().await.rows.values().cloned().collect())
    }

    async fn find_actor(&self, id: i32) -> Result<Option<Actor>, DatabaseError> {
        Ok(self.actors.read().await.rows.get(&id).cloned())
    }

    async fn insert_actor(&self, fields: ActorFields) -> Result<Actor, DatabaseError> {
        let mut table = self.actors.write().await;
        Ok(table.insert_with(|id| Actor {
            id,
            name: fields.name,
            gender: fields.gender,
            age: fields.age,
        }))
    }

    async fn update_actor(&self, actor: &Actor) -> Result<Option<Actor>, DatabaseError> {
        Ok(self.actors.write().await.replace(actor.id, actor))
    }

    async fn delete_actor(&self, id: i32) -> Result<bool, DatabaseError> {
        Ok(self.actors.write().await.rows.remove(&id).is_some())
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, DatabaseError> {
        Ok(self.movies.read().await.rows.values().cloned().collect())
    }

    async fn find_movie(&self, id: i32) -> Result<Option<Movie>, DatabaseError> {
        Ok(self.movies.read().await.rows.get(&id).cloned())
    }

    async fn insert_movie(&self, fields: MovieFields) -> Result<Movie, DatabaseError> {
        let mut table = self.movies.write().await;
        Ok(table.insert_with(|id| Movie {
            id,
            title: fields.title,
            release_date: fields.release_date,
        }))
    }

    async fn update_movie(&self, movie: &Movie) -> Result<Option<Movie>, DatabaseError> {
        Ok(self.movies.write().await.replace(movie.id, movie))
    }

    async fn delete_movie(&self, id: i32) -> Result<bool, DatabaseError> {
        Ok(self.movies.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> ActorFields {
        ActorFields {
            name: name.to_string(),
            gender: Some("Male".to_string()),
            age: Some(56),
        }
    }

    #[tokio::test]
    async fn create_then_find_returns_submitted_fields() {
        let store = MemoryStore::new();
        let created = store.insert_actor(fields("Liam Neeson")).await.unwrap();
        let found = store.find_actor(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.name, "Liam Neeson");
    }

    #[tokio::test]
    async fn delete_removes_row_and_ids_are_not_reused() {
        let store = MemoryStore::new();
        let first = store.insert_actor(fields("one")).await.unwrap();
        assert!(store.delete_actor(first.id).await.unwrap());
        assert!(!store.delete_actor(first.id).await.unwrap());
        assert_eq!(store.find_actor(first.id).await.unwrap(), None);

        let second = store.insert_actor(fields("two")).await.unwrap();
        assert_ne!(second.id, first.id);
        assert_eq!(store.list_actors().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_none() {
        let store = MemoryStore::new();
        let ghost = Actor {
            id: 999,
            name: "ghost".to_string(),
            gender: None,
            age: None,
        };
        assert_eq!(store.update_actor(&ghost).await.unwrap(), None);
    }
}
