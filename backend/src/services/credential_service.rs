//! Credential business logic service.
//!
//! Owns the registration and authentication rules: email uniqueness,
//! password hashing and credential comparison. Storage is reached only
//! through the `AccountDirectory` handed to `CredentialService::new`.

use crate::database::models::{Account, NewAccount, RegisterAccount};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::account_repository::AccountDirectory;
use crate::utils::password::{hash_password, verify_password};
use uuid::Uuid;
use validator::Validate;

pub struct CredentialService<D> {
    directory: D,
    bcrypt_cost: u32,
}

impl<D: AccountDirectory> CredentialService<D> {
    /// Creates a new CredentialService instance.
    ///
    /// # Arguments
    /// * `directory` - Account store used for lookups and writes
    /// * `bcrypt_cost` - bcrypt work factor for new password hashes
    pub fn new(directory: D, bcrypt_cost: u32) -> Self {
        Self {
            directory,
            bcrypt_cost,
        }
    }

    /// Registers a new account.
    ///
    /// # Returns
    /// The stored Account
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - An existing account with the same email
    /// - Hashing or persistence failures
    ///
    /// The HTTP handler validates first to report per-field details; the
    /// check here holds the rules for every other caller.
    pub async fn register(&self, request: RegisterAccount) -> ServiceResult<Account> {
        if let Err(validation_errors) = request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();

            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        if self.directory.find_by_email(&request.email).await?.is_some() {
            return Err(ServiceError::duplicate_account(request.email));
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost)
            .map_err(|e| ServiceError::internal_error(e.to_string()))?;

        let new_account = NewAccount {
            id: Uuid::now_v7().to_string(),
            email: request.email,
            name: request.name,
            password_hash,
        };

        // A concurrent signup can still win the race; the unique constraint
        // turns that into DuplicateAccount via DirectoryError.
        let account = self.directory.insert(new_account).await?;
        tracing::info!("Registered account {}", account.id);

        Ok(account)
    }

    /// Checks an email/password pair.
    ///
    /// # Returns
    /// `Some(Account)` on match, `None` when the email is unknown or the
    /// password does not match
    ///
    /// # Errors
    /// Returns `ServiceError::Persistence` if the lookup fails
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<Option<Account>> {
        let account = self.directory.find_by_email(email).await?;

        // Always run bcrypt so unknown emails cost the same as wrong passwords.
        let dummy_hash;
        let hash_to_verify = match &account {
            Some(account) => account.password_hash.as_str(),
            None => {
                dummy_hash = dummy_password_hash(self.bcrypt_cost);
                dummy_hash.as_str()
            }
        };

        let is_valid = match verify_password(password, hash_to_verify) {
            Ok(is_valid) => is_valid,
            Err(e) => {
                if let Some(account) = &account {
                    tracing::warn!(
                        "Stored hash for account {} could not be verified: {}",
                        account.id,
                        e
                    );
                }
                false
            }
        };

        Ok(account.filter(|_| is_valid))
    }
}

/// Well-formed bcrypt hash at `cost` that no password is expected to match.
fn dummy_password_hash(cost: u32) -> String {
    format!("$2b${:02}$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a", cost)
}
