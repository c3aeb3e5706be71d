//! Repository traits over the two persisted collections.
//!
//! Handlers hold these as `Arc<dyn ...>` in the application state so the
//! backing store is chosen once at startup.

use async_trait::async_trait;
use visadesk_core::{AppError, hash_password, verify_password_or_dummy};
use visadesk_models::applications::{
    Application, ApplicationWithOwner, NewApplication, StatusUpdate,
};
use visadesk_models::users::{NewUser, User, UserRole};
use visadesk_models::{ApplicationId, Email, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// Insert a new identity. Fails with `EmailTaken` when the normalized
    /// email already exists.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    /// All identities, oldest first.
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Hash `raw_password` and create an identity.
    ///
    /// The email is checked up front and again by the storage-level unique
    /// index, so two racing registrations still produce one `EmailTaken`.
    async fn create(
        &self,
        email: Email,
        raw_password: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        if self.find_by_email(&email).await?.is_some() {
            return Err(AppError::email_taken());
        }

        let password_hash = hash_password(raw_password)?;
        self.insert(NewUser {
            email,
            password_hash,
            role,
        })
        .await
    }

    /// bcrypt check of `raw_password` against the stored hash. Without a
    /// user a dummy hash is verified instead and the result is `false`.
    fn validate_password(&self, user: Option<&User>, raw_password: &str) -> Result<bool, AppError> {
        verify_password_or_dummy(raw_password, user.map(|u| u.password.as_str()))
    }
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a new application as `pending`, version 1, no notes.
    async fn insert(&self, application: NewApplication) -> Result<Application, AppError>;

    /// Applications owned by `owner`, oldest first.
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Application>, AppError>;

    /// Every application with its owner's id and email, oldest first.
    async fn find_all_with_owner(&self) -> Result<Vec<ApplicationWithOwner>, AppError>;

    async fn find_by_id(&self, id: ApplicationId) -> Result<Option<Application>, AppError>;

    /// Apply a status update and bump the version.
    ///
    /// Returns `Ok(None)` when no application has this id, and a
    /// `VersionConflict` error when `expected_version` is set and no longer
    /// matches the stored version.
    async fn update_status(
        &self,
        id: ApplicationId,
        update: StatusUpdate,
    ) -> Result<Option<Application>, AppError>;
}
