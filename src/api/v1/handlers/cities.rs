/*
 * Responsibility
 * - /states/{state_id}/cities, /cities/{city_id} 系 CRUD handler
 * - 親 State の存在確認は body 検証より先
 * - state_id は path から注入し、update では変更させない
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
    models::{self, City, Entity, ForeignKey},
    state::AppState,
};

pub async fn list_cities(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let parent: models::State = resource::fetch(state.storage(), &state_id).await?;
    resource::list_children::<City>(state.storage(), ForeignKey::StateId, parent.id()).await
}

pub async fn get_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::show::<City>(state.storage(), &city_id).await
}

pub async fn create_city(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let parent: models::State = resource::fetch(state.storage(), &state_id).await?;
    let JsonObject(data) = body?;
    resource::require(&data, "name")?;

    let mut city = City::from_body(data)?;
    city.state_id = parent.id().to_string();
    resource::create(state.storage(), city).await
}

pub async fn update_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<Json<Value>, AppError> {
    resource::update::<City>(state.storage(), &city_id, body).await
}

pub async fn delete_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::destroy::<City>(state.storage(), &city_id).await
}
