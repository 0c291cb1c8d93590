//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, Role, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds an account by primary key.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds an account by its (case-sensitive) username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Lists all accounts, oldest first.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Changes an account's role.
    ///
    /// Returns `Ok(false)` if no account has the given id.
    async fn update_role(&self, id: i64, role: Role) -> Result<bool, AppError>;

    /// Counts all accounts.
    async fn count(&self) -> Result<i64, AppError>;
}
