//! Service layer for user registration and identity resolution.

use crate::error::ErrorKind;
use crate::user::{
    domain::{Email, ExternalId, Identity, User, UserDomainError, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Claims from a completed external (OAuth) sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalSignIn {
    subject: String,
    email: String,
}

impl ExternalSignIn {
    /// Creates sign-in claims from the provider's subject and email.
    #[must_use]
    pub fn new(subject: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: email.into(),
        }
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

impl AccountError {
    /// Classifies the error for the transport boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// User account orchestration service.
#[derive(Clone)]
pub struct AccountService<U, C>
where
    U: UserRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    clock: Arc<C>,
}

impl<U, C> AccountService<U, C>
where
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(users: Arc<U>, clock: Arc<C>) -> Self {
        Self { users, clock }
    }

    /// Returns the user linked to the external identity, registering one on
    /// first sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] for malformed claims or
    /// [`AccountError::Repository`] when persistence fails.
    pub async fn sign_in(&self, claims: ExternalSignIn) -> AccountResult<User> {
        let external_id = ExternalId::new(claims.subject)?;
        if let Some(existing) = self.users.find_by_external_id(&external_id).await? {
            tracing::debug!(user_id = %existing.id(), "existing user signed in");
            return Ok(existing);
        }

        let email = Email::new(claims.email)?;
        let user = User::register(
            UserId::generate(),
            email,
            Some(external_id.clone()),
            &*self.clock,
        );
        match self.users.store(&user).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id(), "registered user on first sign-in");
                Ok(user)
            }
            Err(UserRepositoryError::DuplicateExternalId(_)) => {
                self.concurrently_registered(&external_id).await
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the user a concurrent first sign-in registered for the subject.
    async fn concurrently_registered(&self, external_id: &ExternalId) -> AccountResult<User> {
        let winner = self
            .users
            .find_by_external_id(external_id)
            .await?
            .ok_or_else(|| UserRepositoryError::DuplicateExternalId(external_id.clone()))?;
        tracing::debug!(user_id = %winner.id(), "sign-in raced a concurrent registration");
        Ok(winner)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when the lookup fails.
    pub async fn find_user(&self, id: &UserId) -> AccountResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    /// Resolves the identity of an authenticated user, or `None` when the user
    /// no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when the lookup fails.
    pub async fn identity_for(&self, id: &UserId) -> AccountResult<Option<Identity>> {
        let user = self.users.find_by_id(id).await?;
        Ok(user.as_ref().map(Identity::from_user))
    }
}
