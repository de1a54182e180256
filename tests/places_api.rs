//! Integration tests for places, place amenities and /places_search.

mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, body_json, error_message, id_of};
use serde_json::{Value, json};

struct World {
    app: TestApp,
    state_id: String,
    city_id: String,
    user_id: String,
}

async fn world() -> World {
    let app = TestApp::new();
    let state_id = app.create_state("Lagos").await;
    let city_id = app.create_city(&state_id, "Ikeja").await;
    let user_id = app.create_user("host@example.com").await;
    World {
        app,
        state_id,
        city_id,
        user_id,
    }
}

fn ids(list: &Value) -> Vec<String> {
    let mut ids: Vec<String> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn create_place_validation_order() {
    let w = world().await;
    let uri = format!("/api/v1/cities/{}/places", w.city_id);

    // Missing city wins over everything else.
    let response = w
        .app
        .send_raw(Method::POST, "/api/v1/cities/missing/places", None, "x")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = w.app.send_raw(Method::POST, &uri, None, "x").await;
    assert_eq!(error_message(response).await, "Not a JSON");

    let response = w.app.post_json(&uri, json!({"name": "Loft"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "Missing user_id");

    // Unknown user is reported before the missing name.
    let response = w.app.post_json(&uri, json!({"user_id": "ghost"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = w.app.post_json(&uri, json!({"user_id": 7})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = w
        .app
        .post_json(&uri, json!({"user_id": w.user_id}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "Missing name");
}

#[tokio::test]
async fn create_and_get_place() {
    let w = world().await;
    let created = w
        .app
        .create(
            &format!("/api/v1/cities/{}/places", w.city_id),
            json!({
                "user_id": w.user_id,
                "name": "Loft",
                "number_rooms": 2,
                "price_by_night": 120,
                "latitude": 6.6,
                "pets_allowed": true,
            }),
        )
        .await;

    assert_eq!(created["city_id"], w.city_id.as_str());
    assert_eq!(created["user_id"], w.user_id.as_str());
    assert_eq!(created["number_rooms"], 2);
    assert_eq!(created["latitude"], 6.6);
    assert_eq!(created["pets_allowed"], true);
    assert_eq!(created["amenity_ids"], json!([]));

    let response = w
        .app
        .get(&format!("/api/v1/places/{}", id_of(&created)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let places = body_json(
        w.app
            .get(&format!("/api/v1/cities/{}/places", w.city_id))
            .await,
    )
    .await;
    assert_eq!(places, json!([created]));
}

#[tokio::test]
async fn update_place_protects_owner_and_city() {
    let w = world().await;
    let place_id = w.app.create_place(&w.city_id, &w.user_id, "Loft").await;
    let other_city = w.app.create_city(&w.state_id, "Lekki").await;

    let updated = body_json(
        w.app
            .put_json(
                &format!("/api/v1/places/{place_id}"),
                json!({
                    "city_id": other_city,
                    "user_id": "someone",
                    "description": "Quiet",
                    "max_guest": 4,
                }),
            )
            .await,
    )
    .await;

    assert_eq!(updated["city_id"], w.city_id.as_str());
    assert_eq!(updated["user_id"], w.user_id.as_str());
    assert_eq!(updated["description"], "Quiet");
    assert_eq!(updated["max_guest"], 4);
}

#[tokio::test]
async fn delete_place() {
    let w = world().await;
    let place_id = w.app.create_place(&w.city_id, &w.user_id, "Loft").await;

    let response = w.app.delete(&format!("/api/v1/places/{place_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));

    let response = w.app.get(&format!("/api/v1/places/{place_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn link_and_unlink_amenities() {
    let w = world().await;
    let place_id = w.app.create_place(&w.city_id, &w.user_id, "Loft").await;
    let wifi = w.app.create_amenity("Wifi").await;
    let link = format!("/api/v1/places/{place_id}/amenities/{wifi}");

    let response = w.app.post_json(&link, json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["id"], wifi.as_str());

    let response = w
        .app
        .send_raw(Method::POST, &link, None, "")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = body_json(
        w.app
            .get(&format!("/api/v1/places/{place_id}/amenities"))
            .await,
    )
    .await;
    assert_eq!(ids(&listed), vec![wifi.clone()]);

    let response = w.app.delete(&link).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));

    // No longer linked.
    let response = w.app.delete(&link).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = w
        .app
        .post_json(
            &format!("/api/v1/places/{place_id}/amenities/missing"),
            json!({}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = w.app.get("/api/v1/places/missing/amenities").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_amenities_are_skipped_in_listing() {
    let w = world().await;
    let place_id = w.app.create_place(&w.city_id, &w.user_id, "Loft").await;
    let wifi = w.app.create_amenity("Wifi").await;
    let pool = w.app.create_amenity("Pool").await;
    for amenity in [&wifi, &pool] {
        w.app
            .post_json(
                &format!("/api/v1/places/{place_id}/amenities/{amenity}"),
                json!({}),
            )
            .await;
    }

    w.app.delete(&format!("/api/v1/amenities/{wifi}")).await;

    let listed = body_json(
        w.app
            .get(&format!("/api/v1/places/{place_id}/amenities"))
            .await,
    )
    .await;
    assert_eq!(ids(&listed), vec![pool]);
}

#[tokio::test]
async fn search_places_by_state_city_and_amenity() {
    let w = world().await;
    let other_state = w.app.create_state("Kano").await;
    let kano_city = w.app.create_city(&other_state, "Kano").await;
    let lekki = w.app.create_city(&w.state_id, "Lekki").await;

    let ikeja_place = w.app.create_place(&w.city_id, &w.user_id, "Ikeja Loft").await;
    let lekki_place = w.app.create_place(&lekki, &w.user_id, "Lekki Villa").await;
    let kano_place = w.app.create_place(&kano_city, &w.user_id, "Kano House").await;

    let wifi = w.app.create_amenity("Wifi").await;
    w.app
        .post_json(
            &format!("/api/v1/places/{lekki_place}/amenities/{wifi}"),
            json!({}),
        )
        .await;
    w.app
        .post_json(
            &format!("/api/v1/places/{kano_place}/amenities/{wifi}"),
            json!({}),
        )
        .await;

    let search = |body: Value| {
        let app = &w.app;
        async move {
            let response = app.post_json("/api/v1/places_search", body).await;
            assert_eq!(response.status(), StatusCode::OK);
            ids(&body_json(response).await)
        }
    };

    let mut all = vec![ikeja_place.clone(), lekki_place.clone(), kano_place.clone()];
    all.sort();
    assert_eq!(search(json!({})).await, all);
    assert_eq!(
        search(json!({"states": [], "cities": [], "amenities": []})).await,
        all
    );

    let mut lagos = vec![ikeja_place.clone(), lekki_place.clone()];
    lagos.sort();
    assert_eq!(search(json!({"states": [w.state_id]})).await, lagos);

    // A city already covered by a listed state is not duplicated.
    let mut lagos_and_kano = vec![ikeja_place.clone(), lekki_place.clone(), kano_place.clone()];
    lagos_and_kano.sort();
    assert_eq!(
        search(json!({"states": [w.state_id], "cities": [lekki, kano_city]})).await,
        lagos_and_kano
    );

    let mut with_wifi = vec![lekki_place.clone(), kano_place.clone()];
    with_wifi.sort();
    assert_eq!(search(json!({"amenities": [wifi]})).await, with_wifi);
    assert_eq!(
        search(json!({"states": [w.state_id], "amenities": [wifi]})).await,
        vec![lekki_place.clone()]
    );

    assert_eq!(search(json!({"cities": ["missing"]})).await, Vec::<String>::new());
}

#[tokio::test]
async fn search_places_requires_json_object() {
    let w = world().await;

    let response = w
        .app
        .send_raw(Method::POST, "/api/v1/places_search", None, "{}")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "Not a JSON");

    let response = w
        .app
        .post_json("/api/v1/places_search", json!({"states": "Lagos"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
