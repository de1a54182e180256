/*
 * Responsibility
 * - handler 引数として使う extractor の公開
 */
mod json_object;

pub use json_object::JsonObject;
