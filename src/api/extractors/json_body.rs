use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejection is an `AppError`, for bodies that skip validation.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
