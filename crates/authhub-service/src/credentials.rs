//! Credential store: user records plus password hashing.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use authhub_auth::{PasswordHasher, PasswordValidator};
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_core::types::pagination::{PageRequest, PageResponse};
use authhub_database::UserStore;
use authhub_entity::user::{AuthProvider, Gender, NewUser, User, UserFilter, UserRole};

/// Account fields supplied at registration, with the password in clear.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub password: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Wraps the [`UserStore`] so that plaintext passwords only ever meet the
/// hasher, never the store.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    pub fn new(users: Arc<dyn UserStore>, validator: PasswordValidator) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            validator,
        }
    }

    /// Create a regular account.
    pub async fn create_user(&self, registration: Registration) -> AppResult<User> {
        self.create(registration, UserRole::User).await
    }

    /// Create an account with an explicit role.
    pub async fn create_admin(&self, registration: Registration, role: UserRole) -> AppResult<User> {
        self.create(registration, role).await
    }

    async fn create(&self, registration: Registration, role: UserRole) -> AppResult<User> {
        check_birth_date(registration.birth_date)?;
        self.validator.validate(&registration.password)?;
        let password_hash = self.hasher.hash(&registration.password)?;

        let user = self
            .users
            .insert(NewUser {
                name: registration.name,
                surname: registration.surname,
                email: registration.email.trim().to_string(),
                birth_date: registration.birth_date,
                gender: registration.gender,
                password_hash,
                phone_number: registration.phone_number,
                address: registration.address,
                role,
                provider: AuthProvider::Any,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Look up a live user by email and check the password.
    ///
    /// Unknown email is `NotFound`; a wrong password is `Authentication`.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid password"));
        }
        Ok(user)
    }

    /// Check a password against a user's stored hash.
    pub fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        self.hasher.verify(password, &user.password_hash)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email.trim()).await
    }

    pub async fn list(&self, filter: &UserFilter, page: PageRequest) -> AppResult<PageResponse<User>> {
        self.users.list(filter, page).await
    }

    /// Replace the password of the live user owning `email`.
    pub async fn update_password(&self, email: &str, new_password: &str) -> AppResult<()> {
        self.validator.validate(new_password)?;
        let hash = self.hasher.hash(new_password)?;
        self.users.update_password(email.trim(), &hash).await
    }

    pub async fn update_profile(&self, user: &User) -> AppResult<User> {
        check_birth_date(user.birth_date)?;
        self.users.update_profile(user).await
    }

    pub async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        self.users.soft_delete(id).await?;
        info!(user_id = %id, "User soft-deleted");
        Ok(())
    }
}

fn check_birth_date(birth_date: NaiveDate) -> AppResult<()> {
    if birth_date > Utc::now().date_naive() {
        return Err(AppError::validation("Birth date cannot be in the future"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use authhub_core::config::AuthConfig;
    use authhub_core::error::ErrorKind;
    use authhub_database::memory::MemoryUserStore;

    use crate::testing::registration;

    fn store() -> CredentialStore {
        CredentialStore::new(
            Arc::new(MemoryUserStore::new()),
            PasswordValidator::new(&AuthConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_create_and_authenticate() {
        let store = store();
        let user = store.create_user(registration("ada@example.com")).await.unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_ne!(user.password_hash, "password123");

        let found = store
            .authenticate("ada@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_authenticate_failures() {
        let store = store();
        store.create_user(registration("ada@example.com")).await.unwrap();

        let wrong = store
            .authenticate("ada@example.com", "password124")
            .await
            .unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Authentication);

        let unknown = store
            .authenticate("nobody@example.com", "password123")
            .await
            .unwrap_err();
        assert!(unknown.is_not_found());
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let mut reg = registration("ada@example.com");
        reg.password = "short".into();
        let err = store().create_user(reg).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_future_birth_date_rejected() {
        let mut reg = registration("ada@example.com");
        reg.birth_date = Utc::now().date_naive() + chrono::Days::new(2);
        let err = store().create_user(reg).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_password() {
        let store = store();
        store.create_user(registration("ada@example.com")).await.unwrap();
        store
            .update_password("ada@example.com", "brand-new-pass")
            .await
            .unwrap();

        assert!(store.authenticate("ada@example.com", "password123").await.is_err());
        assert!(store.authenticate("ada@example.com", "brand-new-pass").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_admin_keeps_role() {
        let admin = store()
            .create_admin(registration("root@example.com"), UserRole::Admin)
            .await
            .unwrap();
        assert!(admin.is_admin());
    }
}
