/*
 * Responsibility
 * - POST /places_search
 * - states / cities の和集合で候補を作り、amenities を全て持つ place に絞る
 */
use std::collections::HashSet;

use axum::{Json, extract::State};
use serde_json::Value;

use crate::{
    api::v1::{dto::places_search::PlacesSearchRequest, extractors::JsonObject},
    error::AppError,
    models::{ForeignKey, Kind, Place, Record},
    state::AppState,
    storage::Storage,
};

async fn places_in_city(storage: &dyn Storage, city_id: &str) -> Result<Vec<Record>, AppError> {
    Ok(storage
        .children(Kind::Place, ForeignKey::CityId, city_id)
        .await?)
}

async fn candidates(
    storage: &dyn Storage,
    req: &PlacesSearchRequest,
) -> Result<Vec<Record>, AppError> {
    if req.is_unscoped() {
        return Ok(storage.all(Kind::Place).await?);
    }

    // Unknown state / city ids simply contribute nothing.
    let mut city_ids: Vec<String> = Vec::new();
    for state_id in &req.states {
        for city in storage
            .children(Kind::City, ForeignKey::StateId, state_id)
            .await?
        {
            city_ids.push(city.id().to_string());
        }
    }
    city_ids.extend(req.cities.iter().cloned());

    let mut seen = HashSet::new();
    let mut res = Vec::new();
    for city_id in &city_ids {
        for place in places_in_city(storage, city_id).await? {
            if seen.insert(place.id().to_string()) {
                res.push(place);
            }
        }
    }

    Ok(res)
}

pub async fn search_places(
    State(state): State<AppState>,
    JsonObject(data): JsonObject,
) -> Result<Json<Vec<Value>>, AppError> {
    let req: PlacesSearchRequest = serde_json::from_value(Value::Object(data))
        .map_err(|_| AppError::bad_request("Invalid search criteria"))?;

    let places = candidates(state.storage(), &req).await?;

    let mut res = Vec::with_capacity(places.len());
    for record in places {
        let place = Place::try_from(record)?;
        if req
            .amenities
            .iter()
            .all(|amenity_id| place.has_amenity(amenity_id))
        {
            res.push(Record::from(place).to_dict());
        }
    }

    tracing::debug!(matches = res.len(), "places search");
    Ok(Json(res))
}
