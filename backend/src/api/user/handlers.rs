//! Handler functions for account signup and signin.
//!
//! These functions parse and validate request bodies, build a
//! `CredentialService` over the shared pool and map its results onto HTTP
//! responses. Signin failures are reported uniformly so callers cannot tell an
//! unknown email from a wrong password.

use crate::api::common::{
    ApiResponse, json_rejection_response, service_error_to_http, validation_error_response,
};
use crate::config::Config;
use crate::database::models::{Account, RegisterAccount, SigninRequest};
use crate::errors::ServiceError;
use crate::repositories::account_repository::AccountRepository;
use crate::services::credential_service::CredentialService;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::StatusCode,
};
use sqlx::SqlitePool;
use validator::Validate;

/// Handle account signup request
#[axum::debug_handler]
pub async fn signup(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    payload: Result<Json<RegisterAccount>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Account>>), (StatusCode, String)> {
    let Json(payload) = payload.map_err(json_rejection_response)?;

    tracing::info!("Processing signup request for email: {}", payload.email);

    if let Err(errors) = payload.validate() {
        tracing::warn!("Signup validation failed for email: {}", payload.email);
        return Err(validation_error_response(errors));
    }

    let email = payload.email.clone();
    let service = CredentialService::new(AccountRepository::new(&pool), config.bcrypt_cost);

    match service.register(payload).await {
        Ok(account) => {
            tracing::info!("Account signed up successfully: {}", email);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(account, "Account created successfully")),
            ))
        }
        Err(error) => {
            tracing::warn!("Signup failed for email {}: {}", email, error);
            Err(service_error_to_http(error))
        }
    }
}

/// Handle account signin request
#[axum::debug_handler]
pub async fn signin(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    let Json(payload) = payload.map_err(json_rejection_response)?;

    tracing::info!("Processing signin request for email: {}", payload.email);

    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(errors));
    }

    let service = CredentialService::new(AccountRepository::new(&pool), config.bcrypt_cost);

    match service.authenticate(&payload.email, &payload.password).await {
        Ok(Some(_account)) => {
            tracing::info!("Login successful for email: {}", payload.email);
            Ok(Json(ApiResponse::acknowledged("Login successful")))
        }
        Ok(None) => {
            tracing::warn!("Invalid credentials for email: {}", payload.email);
            Err(service_error_to_http(ServiceError::InvalidCredentials))
        }
        Err(error) => {
            tracing::error!("Signin failed for email {}: {}", payload.email, error);
            Err(service_error_to_http(error))
        }
    }
}
