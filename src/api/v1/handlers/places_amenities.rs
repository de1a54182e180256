/*
 * Responsibility
 * - /places/{place_id}/amenities 系 handler (Place ↔ Amenity のリンク)
 * - リンクは Place.amenity_ids に持つ (Amenity 側は変更しない)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    api::v1::handlers::resource,
    error::AppError,
    models::{Amenity, Entity, Kind, Place, Record},
    state::AppState,
};

pub async fn list_place_amenities(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let place: Place = resource::fetch(state.storage(), &place_id).await?;

    let mut res = Vec::with_capacity(place.amenity_ids.len());
    for amenity_id in &place.amenity_ids {
        // Amenities deleted after linking are skipped.
        if let Some(record) = state.storage.get(Kind::Amenity, amenity_id).await? {
            res.push(record.to_dict());
        }
    }

    Ok(Json(res))
}

pub async fn link_place_amenity(
    State(state): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let mut place: Place = resource::fetch(state.storage(), &place_id).await?;
    let amenity: Amenity = resource::fetch(state.storage(), &amenity_id).await?;

    let status = if place.link_amenity(amenity.id()) {
        resource::persist(state.storage(), place).await?;
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(Record::from(amenity).to_dict())))
}

pub async fn unlink_place_amenity(
    State(state): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let mut place: Place = resource::fetch(state.storage(), &place_id).await?;
    let amenity: Amenity = resource::fetch(state.storage(), &amenity_id).await?;

    if !place.unlink_amenity(amenity.id()) {
        return Err(AppError::not_found("PlaceAmenity"));
    }
    resource::persist(state.storage(), place).await?;

    Ok(Json(json!({})))
}
