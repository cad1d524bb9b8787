//! In-memory [`UserStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_core::types::pagination::{PageRequest, PageResponse};
use authhub_entity::user::{NewUser, User, UserFilter};

use crate::store::UserStore;

/// User store held in a `HashMap`, enforcing the same live-row
/// uniqueness rules as the Postgres indexes.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(
        users: &HashMap<Uuid, User>,
        id: Uuid,
        email: &str,
        phone_number: Option<&str>,
    ) -> AppResult<()> {
        for other in users.values().filter(|u| u.is_live() && u.id != id) {
            if other.email.eq_ignore_ascii_case(email) {
                return Err(AppError::conflict("Email already exists"));
            }
            if phone_number.is_some() && other.phone_number.as_deref() == phone_number {
                return Err(AppError::conflict("Phone number already exists"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        let id = Uuid::new_v4();
        Self::check_unique(&users, id, &user.email, user.phone_number.as_deref())?;

        let now = Utc::now();
        let record = User {
            id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            birth_date: user.birth_date,
            gender: user.gender,
            password_hash: user.password_hash,
            phone_number: user.phone_number,
            address: user.address,
            role: user.role,
            provider: user.provider,
            created_at: now,
            updated_at: now,
            deleted_at: 0,
        };
        users.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| u.is_live()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.is_live() && u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self, filter: &UserFilter, page: PageRequest) -> AppResult<PageResponse<User>> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|u| u.is_live() && filter.matches(u))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit as usize)
            .collect();
        Ok(PageResponse::new(items, total, page))
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|u| u.is_live() && u.email.eq_ignore_ascii_case(email))
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;
        Self::check_unique(&users, user.id, &user.email, user.phone_number.as_deref())?;

        let stored = users
            .get_mut(&user.id)
            .filter(|u| u.is_live())
            .ok_or_else(|| AppError::not_found("User not found"))?;
        stored.name = user.name.clone();
        stored.surname = user.surname.clone();
        stored.email = user.email.clone();
        stored.birth_date = user.birth_date;
        stored.gender = user.gender;
        stored.phone_number = user.phone_number.clone();
        stored.address = user.address.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .filter(|u| u.is_live())
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let now = Utc::now();
        user.deleted_at = now.timestamp().max(1);
        user.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authhub_core::error::ErrorKind;
    use authhub_entity::user::{AuthProvider, Gender, UserRole};
    use chrono::NaiveDate;

    fn new_user(email: &str, phone: Option<&str>) -> NewUser {
        NewUser {
            name: "Grace".into(),
            surname: "Hopper".into(),
            email: email.into(),
            birth_date: NaiveDate::from_ymd_opt(1985, 1, 2).unwrap(),
            gender: Gender::Female,
            password_hash: "hash".into(),
            phone_number: phone.map(String::from),
            address: None,
            role: UserRole::User,
            provider: AuthProvider::Any,
        }
    }

    #[tokio::test]
    async fn test_email_unique_among_live_rows() {
        let store = MemoryUserStore::new();
        let first = store.insert(new_user("g@x.com", None)).await.unwrap();

        let err = store.insert(new_user("G@X.com", None)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        store.soft_delete(first.id).await.unwrap();
        assert!(store.find_by_id(first.id).await.unwrap().is_none());
        assert!(store.insert(new_user("g@x.com", None)).await.is_ok());
    }

    #[tokio::test]
    async fn test_phone_conflict() {
        let store = MemoryUserStore::new();
        store.insert(new_user("a@x.com", Some("+1"))).await.unwrap();
        let err = store
            .insert(new_user("b@x.com", Some("+1")))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Phone number already exists");
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let store = MemoryUserStore::new();
        for i in 0..5 {
            store
                .insert(new_user(&format!("u{i}@x.com"), None))
                .await
                .unwrap();
        }
        let page = store
            .list(&UserFilter::default(), PageRequest::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page, 2);
    }

    #[tokio::test]
    async fn test_update_password_unknown_email() {
        let store = MemoryUserStore::new();
        let err = store.update_password("nobody@x.com", "h").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
