use axum::extract::{FromRequest, FromRequestParts};

use crate::error::Error;

/// `axum::Json` whose rejections render as the error envelope with 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` whose rejections render as the error envelope with 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);
