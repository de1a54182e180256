/*
 * Responsibility
 * - 全リソース共通の CRUD 手順 (lookup → body 検証 → storage 操作 → JSON 整形)
 * - status code / validation 順序をここで統一する
 *
 * Resource modules only add what differs per entity: the path parent,
 * the required fields and the foreign keys injected on create.
 */
use axum::{Json, http::StatusCode};
use serde_json::{Map, Value, json};

use crate::{
    api::v1::extractors::JsonObject,
    error::AppError,
    models::{Entity, ForeignKey, Record},
    storage::Storage,
};

/// Look up an entity by id, 404 if it does not exist.
pub async fn fetch<T: Entity>(storage: &dyn Storage, id: &str) -> Result<T, AppError> {
    let record = storage
        .get(T::KIND, id)
        .await?
        .ok_or_else(|| AppError::not_found(T::KIND.class_name()))?;

    Ok(T::try_from(record)?)
}

/// Resolve an id taken from a request body. Anything but a string cannot match.
pub async fn fetch_referenced<T: Entity>(
    storage: &dyn Storage,
    value: Option<&Value>,
) -> Result<T, AppError> {
    match value.and_then(Value::as_str) {
        Some(id) => fetch(storage, id).await,
        None => Err(AppError::not_found(T::KIND.class_name())),
    }
}

/// First missing field wins.
pub fn require(data: &Map<String, Value>, field: &str) -> Result<(), AppError> {
    if data.contains_key(field) {
        Ok(())
    } else {
        Err(AppError::missing(field))
    }
}

pub fn to_array(records: Vec<Record>) -> Json<Vec<Value>> {
    Json(records.iter().map(Record::to_dict).collect())
}

pub async fn list<T: Entity>(storage: &dyn Storage) -> Result<Json<Vec<Value>>, AppError> {
    Ok(to_array(storage.all(T::KIND).await?))
}

pub async fn list_children<T: Entity>(
    storage: &dyn Storage,
    foreign_key: ForeignKey,
    parent_id: &str,
) -> Result<Json<Vec<Value>>, AppError> {
    Ok(to_array(
        storage.children(T::KIND, foreign_key, parent_id).await?,
    ))
}

pub async fn show<T: Entity>(storage: &dyn Storage, id: &str) -> Result<Json<Value>, AppError> {
    let record: Record = fetch::<T>(storage, id).await?.into();
    Ok(Json(record.to_dict()))
}

/// Store and flush immediately. Returns the public representation.
pub async fn persist<T: Entity>(storage: &dyn Storage, entity: T) -> Result<Value, AppError> {
    let record: Record = entity.into();
    let body = record.to_dict();
    storage.put(record).await?;
    storage.save().await?;
    Ok(body)
}

pub async fn create<T: Entity>(
    storage: &dyn Storage,
    entity: T,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = entity.id().to_string();
    let body = persist(storage, entity).await?;
    tracing::info!(kind = %T::KIND, %id, "created");
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn update<T: Entity>(
    storage: &dyn Storage,
    id: &str,
    body: Result<JsonObject, AppError>,
) -> Result<Json<Value>, AppError> {
    let mut entity: T = fetch(storage, id).await?;
    let JsonObject(data) = body?;

    entity.apply_update(data)?;

    Ok(Json(persist(storage, entity).await?))
}

/// 200 with `{}`, not 204.
pub async fn destroy<T: Entity>(storage: &dyn Storage, id: &str) -> Result<Json<Value>, AppError> {
    let entity: T = fetch(storage, id).await?;

    storage.delete(T::KIND, entity.id()).await?;
    storage.save().await?;
    tracing::info!(kind = %T::KIND, id, "deleted");

    Ok(Json(json!({})))
}
