/*
 * Responsibility
 * - GET /status (疎通用)
 * - GET /stats (entity 種別ごとの件数, 毎回 storage から数える)
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Map, Value, json};

use crate::{error::AppError, models::Kind, state::AppState};

pub async fn status() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "OK"})))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let mut counts = Map::new();
    for kind in Kind::ALL {
        let n = state.storage.count(kind).await?;
        counts.insert(kind.plural().to_string(), Value::from(n));
    }

    Ok(Json(Value::Object(counts)))
}
