/*
 * Responsibility
 * - Config読み込み → 依存生成 (storage) → Router 組み立て
 * - Middleware の適用 (teardown / CORS / HTTP)
 * - axum::serve() で起動
 */
use std::any::Any;
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{
    Router, ServiceExt,
    extract::Request,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
};
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::{Config, StorageConfig},
    error::AppError,
    middleware,
    state::AppState,
    storage::{FileStorage, PgStorage, Storage},
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,hbnb_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost".
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    let storage = build_storage(&config.storage).await?;
    tracing::info!(
        "starting API in {:?} mode on {}:{} ({} storage)",
        config.app_env,
        config.host,
        config.port,
        storage.backend_name()
    );

    let app = build_app(AppState::new(storage), &config);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}

pub async fn build_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>> {
    let storage: Arc<dyn Storage> = match config {
        StorageConfig::File { path } => Arc::new(FileStorage::open(path).await?),
        StorageConfig::Db { database_url } => Arc::new(PgStorage::connect(database_url).await?),
    };
    Ok(storage)
}

fn handle_panic(_: Box<dyn Any + Send + 'static>) -> Response {
    AppError::Internal.into_response()
}

async fn not_found() -> AppError {
    AppError::not_found("route")
}

/// Full application: routes, middleware, trailing-slash normalization.
pub fn build_app(state: AppState, config: &Config) -> NormalizePath<Router> {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state.clone());

    let router = middleware::cors::apply(router, config);
    let router = middleware::http::apply(router);

    // Outermost, so timeouts and body-limit rejections are released too.
    let router = router.layer(from_fn_with_state(
        state,
        middleware::teardown::close_storage,
    ));

    // `/users/<id>/` and `/users/<id>` are the same resource.
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
