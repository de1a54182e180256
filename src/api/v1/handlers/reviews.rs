/*
 * Responsibility
 * - /places/{place_id}/reviews, /reviews/{review_id} 系 CRUD handler
 * - create の検証順: Place 存在 → JSON → user_id → User 存在 → text
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
    models::{Entity, ForeignKey, Place, Review, User},
    state::AppState,
};

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let place: Place = resource::fetch(state.storage(), &place_id).await?;
    resource::list_children::<Review>(state.storage(), ForeignKey::PlaceId, place.id()).await
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::show::<Review>(state.storage(), &review_id).await
}

pub async fn create_review(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let place: Place = resource::fetch(state.storage(), &place_id).await?;
    let JsonObject(data) = body?;

    resource::require(&data, "user_id")?;
    let user: User = resource::fetch_referenced(state.storage(), data.get("user_id")).await?;
    resource::require(&data, "text")?;

    let mut review = Review::from_body(data)?;
    review.place_id = place.id().to_string();
    review.user_id = user.id().to_string();
    resource::create(state.storage(), review).await
}

pub async fn update_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<Json<Value>, AppError> {
    resource::update::<Review>(state.storage(), &review_id, body).await
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::destroy::<Review>(state.storage(), &review_id).await
}
