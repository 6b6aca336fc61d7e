use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Actor, ActorFields, Movie, MovieFields};

/// Persistence for the two casting tables.
///
/// Lookups by a missing id return `Ok(None)`; they never error. Every write
/// is committed before the call returns.
#[async_trait]
pub trait CastingStore: Send + Sync {
    /// Creates the `actor` and `movie` tables if they do not exist.
    async fn migrate(&self) -> Result<(), DatabaseError>;

    /// Cheap round trip used by `/health`.
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn list_actors(&self) -> Result<Vec<Actor>, DatabaseError>;
    async fn find_actor(&self, id: i32) -> Result<Option<Actor>, DatabaseError>;
    async fn insert_actor(&self, fields: ActorFields) -> Result<Actor, DatabaseError>;
    /// Writes every column of `actor` back to its row.
    async fn update_actor(&self, actor: &Actor) -> Result<Option<Actor>, DatabaseError>;
    /// Returns whether a row was removed.
    async fn delete_actor(&self, id: i32) -> Result<bool, DatabaseError>;

    async fn list_movies(&self) -> Result<Vec<Movie>, DatabaseError>;
    async fn find_movie(&self, id: i32) -> Result<Option<Movie>, DatabaseError>;
    async fn insert_movie(&self, fields: MovieFields) -> Result<Movie, DatabaseError>;
    async fn update_movie(&self, movie: &Movie) -> Result<Option<Movie>, DatabaseError>;
    async fn delete_movie(&self, id: i32) -> Result<bool, DatabaseError>;
}
