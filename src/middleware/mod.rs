/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - cors::apply, http::apply, teardown::close_storage
 */
pub mod cors;
pub mod http;
pub mod teardown;
