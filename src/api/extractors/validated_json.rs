//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::ValidateArgs;

use crate::api::AppState;
use crate::domain::{ValidationContext, ValidationErrors};
use crate::errors::AppError;

/// Extracts a JSON body and validates it against the current instant.
///
/// ```rust,ignore
/// async fn create_user(ValidatedJson(payload): ValidatedJson<UserPayload>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T> FromRequest<AppState> for ValidatedJson<T>
where
    T: DeserializeOwned + Send + for<'v> ValidateArgs<'v, Args = &'v ValidationContext>,
    Json<T>: FromRequest<AppState, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(AppError::from)?;

        value
            .validate_with_args(&state.validation_context())
            .map_err(ValidationErrors::from)?;

        Ok(ValidatedJson(value))
    }
}
