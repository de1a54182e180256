//! Shared helpers for the HTTP integration tests.
//!
//! Requests go straight through the full application service (routes plus
//! every middleware layer) with `tower::ServiceExt::oneshot`, no TCP listener.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{Method, Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use hbnb_api::app::build_app;
use hbnb_api::config::{AppEnv, Config, StorageConfig};
use hbnb_api::state::AppState;
use hbnb_api::storage::{FileStorage, Storage};

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        storage: StorageConfig::File {
            path: PathBuf::from("unused.json"),
        },
    }
}

pub struct TestApp {
    pub state: AppState,
    config: Config,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_storage(Arc::new(FileStorage::in_memory()))
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            state: AppState::new(storage),
            config: test_config(),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        build_app(self.state.clone(), &self.config)
            .oneshot(request)
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send_json(Method::POST, uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send_json(Method::PUT, uri, body).await
    }

    async fn send_json(&self, method: Method, uri: &str, body: Value) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a raw body with an arbitrary (or no) content type.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// POST a JSON body with an explicit `Content-Length`.
    pub async fn send_sized_json(&self, uri: &str, body: &str) -> Response<Body> {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// POST and return the created object, asserting 201.
    pub async fn create(&self, uri: &str, body: Value) -> Value {
        let response = self.post_json(uri, body).await;
        assert_eq!(response.status(), 201, "POST {uri} should create");
        body_json(response).await
    }

    pub async fn create_state(&self, name: &str) -> String {
        id_of(&self.create("/api/v1/states", serde_json::json!({"name": name})).await)
    }

    pub async fn create_city(&self, state_id: &str, name: &str) -> String {
        id_of(
            &self
                .create(
                    &format!("/api/v1/states/{state_id}/cities"),
                    serde_json::json!({"name": name}),
                )
                .await,
        )
    }

    pub async fn create_user(&self, email: &str) -> String {
        id_of(
            &self
                .create(
                    "/api/v1/users",
                    serde_json::json!({"email": email, "password": "secret"}),
                )
                .await,
        )
    }

    pub async fn create_place(&self, city_id: &str, user_id: &str, name: &str) -> String {
        id_of(
            &self
                .create(
                    &format!("/api/v1/cities/{city_id}/places"),
                    serde_json::json!({"user_id": user_id, "name": name}),
                )
                .await,
        )
    }

    pub async fn create_amenity(&self, name: &str) -> String {
        id_of(&self.create("/api/v1/amenities", serde_json::json!({"name": name})).await)
    }
}

/// A well-formed JSON object of about 2 MiB, over the request body limit.
pub fn oversized_body() -> String {
    serde_json::json!({"name": "x".repeat(2 * 1024 * 1024)}).to_string()
}

pub fn id_of(object: &Value) -> String {
    object["id"].as_str().unwrap().to_string()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn error_message(response: Response<Body>) -> String {
    body_json(response).await["error"]
        .as_str()
        .unwrap()
        .to_string()
}
