// handlers/actors.rs - /actors endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{json_object, parse_id};
use crate::app::AppState;
use crate::database::models::{ActorPatch, NewActor};
use crate::error::ApiError;
use crate::middleware::JsonBody;

/// GET /actors - every actor; an empty table is a 404
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let actors = state.store.list_actors().await?;
    if actors.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({
        "success": true,
        "actors": actors,
    })))
}

/// POST /actors
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<Value>, ApiError> {
    let body = json_object(body).map_err(ApiError::unprocessable)?;
    let new_actor: NewActor = serde_json::from_value(body).map_err(ApiError::unprocessable)?;
    let fields = new_actor.validate()?;

    let actor = state
        .store
        .insert_actor(fields)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!("Created actor {}", actor.id);

    Ok(Json(json!({
        "success": true,
        "created": actor.id,
        "name": actor.name,
        "gender": actor.gender,
        "age": actor.age,
    })))
}

/// PATCH /actors/:id - only the keys present in the body change
pub async fn update(
    State(state): State<AppState>,
    Path(actor_id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&actor_id)?;
    let actor = state
        .store
        .find_actor(id)
        .await
        .map_err(ApiError::bad_request)?
        .ok_or(ApiError::NotFound)?;

    let body = json_object(body).map_err(ApiError::bad_request)?;
    let patch: ActorPatch = serde_json::from_value(body).map_err(ApiError::bad_request)?;
    let actor = patch.apply(actor).map_err(ApiError::bad_request)?;

    state
        .store
        .update_actor(&actor)
        .await
        .map_err(ApiError::bad_request)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(json!({ "success": true })))
}

/// DELETE /actors/:id - echoes the path id as given
pub async fn delete(
    State(state): State<AppState>,
    Path(actor_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&actor_id)?;
    if state.store.find_actor(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    if !state.store.delete_actor(id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!("Deleted actor {}", id);

    Ok(Json(json!({
        "success": true,
        "deleted": actor_id,
    })))
}
