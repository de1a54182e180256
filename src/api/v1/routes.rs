/*
 * Responsibility
 * - v1 の URL 構造を定義 (method, path, handler の明示的な表)
 * - 未定義の method は JSON の 405 を返す
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::{error::AppError, state::AppState};

use crate::api::v1::handlers::{
    amenities::{create_amenity, delete_amenity, get_amenity, list_amenities, update_amenity},
    cities::{create_city, delete_city, get_city, list_cities, update_city},
    index::{stats, status},
    places::{create_place, delete_place, get_place, list_places, update_place},
    places_amenities::{link_place_amenity, list_place_amenities, unlink_place_amenity},
    places_search::search_places,
    reviews::{create_review, delete_review, get_review, list_reviews, update_review},
    states::{create_state, delete_state, get_state, list_states, update_state},
    users::{create_user, delete_user, get_user, list_users, update_user},
};

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/stats", get(stats))
        // states / cities
        .route("/states", get(list_states).post(create_state))
        .route(
            "/states/{state_id}",
            get(get_state).put(update_state).delete(delete_state),
        )
        .route(
            "/states/{state_id}/cities",
            get(list_cities).post(create_city),
        )
        .route(
            "/cities/{city_id}",
            get(get_city).put(update_city).delete(delete_city),
        )
        // amenities
        .route("/amenities", get(list_amenities).post(create_amenity))
        .route(
            "/amenities/{amenity_id}",
            get(get_amenity).put(update_amenity).delete(delete_amenity),
        )
        // users
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        // places
        .route(
            "/cities/{city_id}/places",
            get(list_places).post(create_place),
        )
        .route(
            "/places/{place_id}",
            get(get_place).put(update_place).delete(delete_place),
        )
        .route("/places_search", post(search_places))
        .route(
            "/places/{place_id}/amenities",
            get(list_place_amenities),
        )
        .route(
            "/places/{place_id}/amenities/{amenity_id}",
            post(link_place_amenity).delete(unlink_place_amenity),
        )
        // reviews
        .route(
            "/places/{place_id}/reviews",
            get(list_reviews).post(create_review),
        )
        .route(
            "/reviews/{review_id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        .method_not_allowed_fallback(method_not_allowed)
}
