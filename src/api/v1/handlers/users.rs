/*
 * Responsibility
 * - /users 系 CRUD handler
 * - email → password の順で必須チェック
 * - email は作成後に変更不可 (update では無視)
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
    models::{Entity, User},
    state::AppState,
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    resource::list::<User>(state.storage()).await
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::show::<User>(state.storage(), &user_id).await
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonObject(data): JsonObject,
) -> Result<(StatusCode, Json<Value>), AppError> {
    resource::require(&data, "email")?;
    resource::require(&data, "password")?;

    let user = User::from_body(data)?;
    resource::create(state.storage(), user).await
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<Json<Value>, AppError> {
    resource::update::<User>(state.storage(), &user_id, body).await
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::destroy::<User>(state.storage(), &user_id).await
}
