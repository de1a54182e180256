/*
 * Responsibility
 * - request body を JSON object (Map<String, Value>) として受け取る
 * - Content-Type 不一致 / 壊れた JSON / object 以外 はすべて 400 "Not a JSON"
 * - body limit 超過 (Content-Length なしで流れてきた場合) は 413
 *
 * Handlers that must check a path parent first take
 * `Result<JsonObject, AppError>` and apply `?` after that check,
 * so a missing parent still wins over a bad body.
 */
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde_json::{Map, Value};

use crate::error::AppError;

#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<Map<String, Value>>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "rejected request body");
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge
                } else {
                    AppError::not_a_json()
                }
            })?;

        Ok(Self(data))
    }
}
