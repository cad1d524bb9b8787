//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use authhub_core::types::pagination::{DEFAULT_PAGE_SIZE, PageRequest};
use authhub_entity::user::{AuthProvider, Gender, ProfileUpdate, UserFilter, UserRole};
use authhub_service::Registration;

/// Self-registration body. `birth_date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Surname is required"))]
    pub surname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub password: String,
    #[validate(length(min = 1, max = 32, message = "Invalid phone number"))]
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            name: req.name,
            surname: req.surname,
            email: req.email,
            birth_date: req.birth_date,
            gender: req.gender,
            password: req.password,
            phone_number: req.phone_number,
            address: req.address,
        }
    }
}

/// Admin registration: the self-registration fields plus a role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminRegisterRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub account: RegisterRequest,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Password reset with an emailed code.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    pub new_password: String,
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    #[validate(length(min = 1, max = 32, message = "Invalid phone number"))]
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: req.name,
            surname: req.surname,
            email: req.email,
            birth_date: req.birth_date,
            gender: req.gender,
            phone_number: req.phone_number,
            address: req.address,
        }
    }
}

/// Query string of `GET /admin/users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<Gender>,
    pub role: Option<UserRole>,
    pub provider: Option<AuthProvider>,
}

impl UserListQuery {
    pub fn into_parts(self) -> (UserFilter, PageRequest) {
        let page = PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        );
        let filter = UserFilter {
            name: non_empty(self.name),
            surname: non_empty(self.surname),
            email: non_empty(self.email),
            phone_number: non_empty(self.phone_number),
            address: non_empty(self.address),
            gender: self.gender,
            role: self.role,
            provider: self.provider,
        };
        (filter, page)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
