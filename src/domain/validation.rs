//! Field validation for user payloads.
//!
//! Rules are declared on [`UserPayload`](super::UserPayload) with `validator`.
//! This module holds the custom checks and turns the field map into the
//! ordered list clients receive: email, first name, last name, birth date.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::ValidationError;

use crate::config::{
    EMAIL_PATTERN, MSG_FIRST_NAME_REQUIRED, MSG_INVALID_BIRTH_DATE, MSG_INVALID_EMAIL,
    MSG_LAST_NAME_REQUIRED,
};

pub static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));

/// Report order of the field messages.
const MESSAGE_ORDER: [&str; 4] = [
    MSG_INVALID_EMAIL,
    MSG_FIRST_NAME_REQUIRED,
    MSG_LAST_NAME_REQUIRED,
    MSG_INVALID_BIRTH_DATE,
];

/// Request-scoped inputs the rules need: the current instant.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    pub now: DateTime<Utc>,
}

impl ValidationContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

/// Ordered list of human-readable validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    pub fn from_messages<I, M>(messages: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Self(messages.into_iter().map(Into::into).collect())
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();

        messages.sort_by_key(|m| {
            MESSAGE_ORDER
                .iter()
                .position(|known| known == m)
                .unwrap_or(MESSAGE_ORDER.len())
        });

        Self(messages)
    }
}

/// Whitespace-only names count as missing.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// The birth date's first instant (UTC midnight) must precede `now`.
pub fn validate_past_birth_date(
    birth_date: &NaiveDate,
    ctx: &ValidationContext,
) -> Result<(), ValidationError> {
    let born = birth_date.and_time(NaiveTime::default()).and_utc();
    if born < ctx.now {
        Ok(())
    } else {
        Err(ValidationError::new("past"))
    }
}
