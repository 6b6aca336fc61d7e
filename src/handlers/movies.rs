// handlers/movies.rs - /movies endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{json_object, parse_id};
use crate::app::AppState;
use crate::database::models::{MoviePatch, NewMovie};
use crate::error::ApiError;
use crate::middleware::JsonBody;

/// GET /movies - every movie; an empty table is a 404
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let movies = state.store.list_movies().await?;
    if movies.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({
        "success": true,
        "movies": movies,
    })))
}

/// POST /movies
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<Value>, ApiError> {
    let body = json_object(body).map_err(ApiError::unprocessable)?;
    let new_movie: NewMovie = serde_json::from_value(body).map_err(ApiError::unprocessable)?;
    let fields = new_movie.validate()?;

    let movie = state
        .store
        .insert_movie(fields)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!("Created movie {}", movie.id);

    Ok(Json(json!({
        "success": true,
        "created": movie.id,
        "title": movie.title,
        "release_date": movie.release_date,
    })))
}

/// PATCH /movies/:id
pub async fn update(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&movie_id)?;
    let movie = state
        .store
        .find_movie(id)
        .await
        .map_err(ApiError::bad_request)?
        .ok_or(ApiError::NotFound)?;

    let body = json_object(body).map_err(ApiError::bad_request)?;
    let patch: MoviePatch = serde_json::from_value(body).map_err(ApiError::bad_request)?;
    let movie = patch.apply(movie).map_err(ApiError::bad_request)?;

    state
        .store
        .update_movie(&movie)
        .await
        .map_err(ApiError::bad_request)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(json!({ "success": true })))
}

/// DELETE /movies/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&movie_id)?;
    if state.store.find_movie(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    if !state.store.delete_movie(id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!("Deleted movie {}", id);

    Ok(Json(json!({
        "success": true,
        "deleted": movie_id,
    })))
}
