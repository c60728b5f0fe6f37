//! Request extractors.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::GatewayError;

/// JSON body extractor whose rejections use the gateway's error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(GatewayError))]
pub struct ApiJson<T>(pub T);

/// Query-string extractor with the same rejection handling as [`ApiJson`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(GatewayError))]
pub struct ApiQuery<T>(pub T);
