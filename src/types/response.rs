use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::Lookup;

/// 201 with a `Location` header and an empty body
pub struct Created {
    pub location: String,
}

impl Created {
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl IntoResponse for Created {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, [(header::LOCATION, self.location)]).into_response()
    }
}

/// No content response helper (DRY - common pattern for DELETE endpoints)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// 200 with the JSON body when found, bare 404 otherwise
impl<T: Serialize> IntoResponse for Lookup<T> {
    fn into_response(self) -> Response {
        match self {
            Lookup::Found(value) => Json(value).into_response(),
            Lookup::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}
