//! User domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{
    validate_not_blank, validate_past_birth_date, ValidationContext, ValidationErrors, EMAIL_REGEX,
};
use crate::config::{
    MSG_FIRST_NAME_REQUIRED, MSG_INVALID_BIRTH_DATE, MSG_INVALID_EMAIL, MSG_LAST_NAME_REQUIRED,
};

/// Storage-assigned user identifier
pub type UserId = i64;

/// The mutable fields of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "1990-05-17")]
    pub birth_date: NaiveDate,
    #[schema(example = "221B Baker Street")]
    pub address: Option<String>,
    #[schema(example = "+44 20 7946 0958")]
    pub phone_number: Option<String>,
}

impl UserDetails {
    /// Overwrite every field the patch carries. Empty strings count as carried.
    pub fn merge(&mut self, patch: UserPatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = birth_date;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
        if patch.phone_number.is_some() {
            self.phone_number = patch.phone_number;
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(value_type = i64, example = 42)]
    pub id: UserId,
    #[serde(flatten)]
    pub details: UserDetails,
}

impl User {
    pub fn new(id: UserId, details: UserDetails) -> Self {
        Self { id, details }
    }
}

/// Body of a create or full-update request.
///
/// Every field is optional on the wire so validation can name each missing one.
/// A client-supplied `id` is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(context = ValidationContext)]
pub struct UserPayload {
    #[validate(
        required(message = "Invalid email address."),
        regex(path = *EMAIL_REGEX, message = "Invalid email address.")
    )]
    #[schema(example = "jane.doe@example.com")]
    pub email: Option<String>,
    #[validate(
        required(message = "First name is required."),
        custom(function = "validate_not_blank", message = "First name is required.")
    )]
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    #[validate(
        required(message = "Last name is required."),
        custom(function = "validate_not_blank", message = "Last name is required.")
    )]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[validate(
        required(message = "Invalid birth date or date in the future."),
        custom(
            function = "validate_past_birth_date",
            use_context,
            message = "Invalid birth date or date in the future."
        )
    )]
    #[schema(example = "1990-05-17")]
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Unwraps a payload that passed validation. Missing fields are reported
/// with their usual messages.
impl TryFrom<UserPayload> for UserDetails {
    type Error = ValidationErrors;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        match (
            payload.email,
            payload.first_name,
            payload.last_name,
            payload.birth_date,
        ) {
            (Some(email), Some(first_name), Some(last_name), Some(birth_date)) => Ok(UserDetails {
                email,
                first_name,
                last_name,
                birth_date,
                address: payload.address,
                phone_number: payload.phone_number,
            }),
            (email, first_name, last_name, birth_date) => {
                let missing = [
                    (email.is_none(), MSG_INVALID_EMAIL),
                    (first_name.is_none(), MSG_FIRST_NAME_REQUIRED),
                    (last_name.is_none(), MSG_LAST_NAME_REQUIRED),
                    (birth_date.is_none(), MSG_INVALID_BIRTH_DATE),
                ];
                Err(ValidationErrors::from_messages(
                    missing.into_iter().filter(|(absent, _)| *absent).map(|(_, msg)| msg),
                ))
            }
        }
    }
}

/// Body of a partial update. Absent (or `null`) fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[schema(example = "jane@example.org")]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}
