/*
 * Responsibility
 * - /states 系 CRUD handler
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    api::v1::{extractors::JsonObject, handlers::resource},
    error::AppError,
    models::{self, Entity},
    state::AppState,
};

pub async fn list_states(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    resource::list::<models::State>(state.storage()).await
}

pub async fn get_state(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::show::<models::State>(state.storage(), &state_id).await
}

pub async fn create_state(
    State(state): State<AppState>,
    JsonObject(data): JsonObject,
) -> Result<(StatusCode, Json<Value>), AppError> {
    resource::require(&data, "name")?;

    let new_state = models::State::from_body(data)?;
    resource::create(state.storage(), new_state).await
}

pub async fn update_state(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<Json<Value>, AppError> {
    resource::update::<models::State>(state.storage(), &state_id, body).await
}

pub async fn delete_state(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::destroy::<models::State>(state.storage(), &state_id).await
}
