/*
 * Responsibility
 * - /amenities 系 CRUD handler
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
    models::{Amenity, Entity},
    state::AppState,
};

pub async fn list_amenities(
    State(state): State<AppState>,
) -> Result<Json<Vec<Value>>, AppError> {
    resource::list::<Amenity>(state.storage()).await
}

pub async fn get_amenity(
    State(state): State<AppState>,
    Path(amenity_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::show::<Amenity>(state.storage(), &amenity_id).await
}

pub async fn create_amenity(
    State(state): State<AppState>,
    JsonObject(data): JsonObject,
) -> Result<(StatusCode, Json<Value>), AppError> {
    resource::require(&data, "name")?;

    let amenity = Amenity::from_body(data)?;
    resource::create(state.storage(), amenity).await
}

pub async fn update_amenity(
    State(state): State<AppState>,
    Path(amenity_id): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<Json<Value>, AppError> {
    resource::update::<Amenity>(state.storage(), &amenity_id, body).await
}

pub async fn delete_amenity(
    State(state): State<AppState>,
    Path(amenity_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::destroy::<Amenity>(state.storage(), &amenity_id).await
}
