use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Actor, ActorFields, Movie, MovieFields};
use crate::database::store::CastingStore;

const CREATE_ACTOR_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS actor (
        id SERIAL PRIMARY KEY,
        name VARCHAR(120) NOT NULL,
        gender VARCHAR(120),
        age INTEGER
    )
"#;

const CREATE_MOVIE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS movie (
        id SERIAL PRIMARY KEY,
        title VARCHAR(120) NOT NULL,
        release_date TIMESTAMP
    )
"#;

/// PostgreSQL-backed store. Each call runs in autocommit mode on a pooled
/// connection.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CastingStore for PgRepository {
    async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_ACTOR_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_MOVIE_TABLE).execute(&self.pool).await?;
        tracing::info!("Ensured actor and movie tables exist");
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_actors(&self) -> Result<Vec<Actor>, DatabaseError> {
        let actors = sqlx::query_as::<_, Actor>(
            "SELECT id, name, gender, age FROM actor ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(actors)
    }

    async fn find_actor(&self, id: i32) -> Result<Option<Actor>, DatabaseError> {
        let actor = sqlx::query_as::<_, Actor>(
            "SELECT id, name, gender, age FROM actor WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(actor)
    }

    async fn insert_actor(&self, fields: ActorFields) -> Result<Actor, DatabaseError> {
        let actor = sqlx::query_as::<_, Actor>(
            "INSERT INTO actor (name, gender, age) VALUES ($1, $2, $3)
             RETURNING id, name, gender, age",
        )
        .bind(fields.name)
        .bind(fields.gender)
        .bind(fields.age)
        .fetch_one(&self.pool)
        .await?;
        Ok(actor)
    }

    async fn update_actor(&self, actor: &Actor) -> Result<Option<Actor>, DatabaseError> {
        let updated = sqlx::query_as::<_, Actor>(
            "UPDATE actor SET name = $2, gender = $3, age = $4 WHERE id = $1
             RETURNING id, name, gender, age",
        )
        .bind(actor.id)
        .bind(&actor.name)
        .bind(&actor.gender)
        .bind(actor.age)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_actor(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM actor WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, DatabaseError> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT id, title, release_date FROM movie ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    async fn find_movie(&self, id: i32) -> Result<Option<Movie>, DatabaseError> {
        let movie = sqlx::query_as::<_, Movie>(
            "SELECT id, title, release_date FROM movie WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(movie)
    }

    async fn insert_movie(&self, fields: MovieFields) -> Result<Movie, DatabaseError> {
        let movie = sqlx::query_as::<_, Movie>(
            "INSERT INTO movie (title, release_date) VALUES ($1, $2)
             RETURNING id, title, release_date",
        )
        .bind(fields.title)
        .bind(fields.release_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(movie)
    }

    async fn update_movie(&self, movie: &Movie) -> Result<Option<Movie>, DatabaseError> {
        let updated = sqlx::query_as::<_, Movie>(
            "UPDATE movie SET title = $2, release_date = $3 WHERE id = $1
             RETURNING id, title, release_date",
        )
        .bind(movie.id)
        .bind(&movie.title)
        .bind(movie.release_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_movie(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM movie WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
