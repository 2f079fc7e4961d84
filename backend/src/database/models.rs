//! Rust structs that represent database table mappings and request payloads.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the `accounts` table, together with the validated DTOs accepted by
//! the signup and signin endpoints.

use crate::utils::password::validate_password_strength;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// A registered account.
///
/// `password_hash` is skipped on serialization so an `Account` can be returned
/// to clients as-is.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Signup payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterAccount {
    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(
        length(
            min = 1,
            max = 255,
            message = "Name must be between 1-255 characters"
        ),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

/// Signin payload. Only presence is checked; the password policy is not
/// applied here so a weak guess is just a credential mismatch.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Rejects values made only of whitespace.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("Name must not be blank")));
    }
    Ok(())
}

/// Row to insert, with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}
