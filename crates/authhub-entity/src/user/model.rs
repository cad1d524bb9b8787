//! User entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::gender::Gender;
use super::provider::AuthProvider;
use super::role::UserRole;

/// A registered account.
///
/// Rows are never hard-deleted: `deleted_at` holds the epoch second of the
/// soft delete, or `0` while the account is live.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Login email, unique among live users.
    pub email: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Gender.
    pub gender: Gender,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Phone number, unique among live users when present.
    pub phone_number: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Role used for RBAC decisions.
    pub role: UserRole,
    /// Identity provider tag.
    pub provider: AuthProvider,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker (epoch seconds, `0` = live).
    pub deleted_at: i64,
}

impl User {
    /// Whether the account has not been soft-deleted.
    pub fn is_live(&self) -> bool {
        self.deleted_at == 0
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Apply a partial profile update in place.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(surname) = update.surname {
            self.surname = surname;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(birth_date) = update.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if update.phone_number.is_some() {
            self.phone_number = update.phone_number;
        }
        if update.address.is_some() {
            self.address = update.address;
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    /// Pre-hashed password.
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
    pub provider: AuthProvider,
}

/// Partial profile update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Filter for the admin user listing.
///
/// Text fields match case-insensitive substrings; enum fields match exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<Gender>,
    pub role: Option<UserRole>,
    pub provider: Option<AuthProvider>,
}

impl UserFilter {
    /// Evaluate the filter against a user in memory.
    pub fn matches(&self, user: &User) -> bool {
        fn contains(haystack: Option<&str>, needle: &Option<String>) -> bool {
            match needle {
                None => true,
                Some(n) => haystack
                    .map(|h| h.to_lowercase().contains(&n.to_lowercase()))
                    .unwrap_or(false),
            }
        }

        contains(Some(&user.name), &self.name)
            && contains(Some(&user.surname), &self.surname)
            && contains(Some(&user.email), &self.email)
            && contains(user.phone_number.as_deref(), &self.phone_number)
            && contains(user.address.as_deref(), &self.address)
            && self.gender.is_none_or(|g| g == user.gender)
            && self.role.is_none_or(|r| r == user.role)
            && self.provider.is_none_or(|p| p == user.provider)
    }
}
