//! PostgreSQL user repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_core::types::pagination::{PageRequest, PageResponse};
use authhub_entity::user::{NewUser, User, UserFilter};

use crate::store::UserStore;

const EMAIL_INDEX: &str = "users_email_live_key";
const PHONE_INDEX: &str = "users_phone_live_key";

/// Repository for account rows in the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map write failures, turning unique-index violations into conflicts.
fn map_write_error(e: sqlx::Error, context: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(EMAIL_INDEX) => {
            AppError::conflict("Email already exists")
        }
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(PHONE_INDEX) => {
            AppError::conflict("Phone number already exists")
        }
        _ => AppError::with_source(ErrorKind::Database, context, e),
    }
}

/// Escape `ILIKE` metacharacters so filter values match literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append the `WHERE` clauses for `filter` to a query over live users.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    builder.push(" WHERE deleted_at = 0");

    let substrings = [
        ("name", &filter.name),
        ("surname", &filter.surname),
        ("email", &filter.email),
        ("phone_number", &filter.phone_number),
        ("address", &filter.address),
    ];
    for (column, value) in substrings {
        if let Some(value) = value {
            builder.push(format!(" AND {column} ILIKE "));
            builder.push_bind(format!("%{}%", escape_like(value)));
            builder.push(" ESCAPE '\\'");
        }
    }

    if let Some(gender) = filter.gender {
        builder.push(" AND gender = ");
        builder.push_bind(gender);
    }
    if let Some(role) = filter.role {
        builder.push(" AND role = ");
        builder.push_bind(role);
    }
    if let Some(provider) = filter.provider {
        builder.push(" AND provider = ");
        builder.push_bind(provider);
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, surname, email, birth_date, gender, password_hash, \
                                phone_number, address, role, provider) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(user.birth_date)
        .bind(user.gender)
        .bind(&user.password_hash)
        .bind(&user.phone_number)
        .bind(&user.address)
        .bind(user.role)
        .bind(user.provider)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create user"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND deleted_at = 0")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1) AND deleted_at = 0",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by email", e))
    }

    async fn list(&self, filter: &UserFilter, page: PageRequest) -> AppResult<PageResponse<User>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM users");
        push_filter(&mut select, filter);
        select.push(" ORDER BY created_at DESC LIMIT ");
        select.push_bind(i64::try_from(page.limit).unwrap_or(i64::MAX));
        select.push(" OFFSET ");
        select.push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let users = select
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(users, total.max(0) as u64, page))
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() \
             WHERE LOWER(email) = LOWER($1) AND deleted_at = 0",
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = $2, surname = $3, email = $4, birth_date = $5, gender = $6, \
                              phone_number = $7, address = $8, updated_at = NOW() \
             WHERE id = $1 AND deleted_at = 0 \
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(user.birth_date)
        .bind(user.gender)
        .bind(&user.phone_number)
        .bind(&user.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update user"))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = EXTRACT(EPOCH FROM CURRENT_TIMESTAMP)::BIGINT, \
                              updated_at = NOW() \
             WHERE id = $1 AND deleted_at = 0",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }
        Ok(())
    }
}
