//! User domain entities.

pub mod gender;
pub mod model;
pub mod provider;
pub mod role;

pub use gender::Gender;
pub use model::{NewUser, ProfileUpdate, User, UserFilter};
pub use provider::AuthProvider;
pub use role::UserRole;
