/**
 * Request Extractors
 *
 * Thin wrappers over axum's `Json` and `Path` whose rejections are
 * `ApiError`, so a malformed body or path parameter renders the same JSON
 * error envelope as every other failure.
 *
 * Responses keep using `axum::Json`; these wrappers only extract.
 */

use axum::extract::{FromRequest, FromRequestParts};

use crate::backend::error::ApiError;

/// JSON request body, rejected as a 400 `ApiError::Validation`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Typed path parameters, rejected as a 400 `ApiError::Validation`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);
