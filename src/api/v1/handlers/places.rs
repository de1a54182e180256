/*
 * Responsibility
 * - /cities/{city_id}/places, /places/{place_id} 系 CRUD handler
 * - create の検証順: City 存在 → JSON → user_id → User 存在 → name
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
    models::{City, Entity, ForeignKey, Place, User},
    state::AppState,
};

pub async fn list_places(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let city: City = resource::fetch(state.storage(), &city_id).await?;
    resource::list_children::<Place>(state.storage(), ForeignKey::CityId, city.id()).await
}

pub async fn get_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::show::<Place>(state.storage(), &place_id).await
}

pub async fn create_place(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let city: City = resource::fetch(state.storage(), &city_id).await?;
    let JsonObject(data) = body?;

    resource::require(&data, "user_id")?;
    let user: User = resource::fetch_referenced(state.storage(), data.get("user_id")).await?;
    resource::require(&data, "name")?;

    let mut place = Place::from_body(data)?;
    place.city_id = city.id().to_string();
    place.user_id = user.id().to_string();
    resource::create(state.storage(), place).await
}

pub async fn update_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<Json<Value>, AppError> {
    resource::update::<Place>(state.storage(), &place_id, body).await
}

pub async fn delete_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::destroy::<Place>(state.storage(), &place_id).await
}
