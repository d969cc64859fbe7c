use axum::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::accounts::dto::ProfileFields;
use crate::errors::ApiError;

/// Account record as stored. The password hash is skip-serialized so a
/// record can never carry its secret across the HTTP boundary even if it
/// is serialized directly.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Fields required to insert a new account.
#[derive(Debug)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub profile: ProfileFields,
}

/// Persistence gateway for accounts. Lookups return `None` for a missing
/// row; mutations on a missing id fail with `AccountNotFound`; `create`
/// surfaces the unique-email constraint as `DuplicateAccount`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError>;
    async fn create(&self, new: NewAccount) -> Result<Account, ApiError>;
    async fn update(&self, id: i64, fields: &ProfileFields) -> Result<Account, ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
    async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<Account>, ApiError>;
}

pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, ApiError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, name, bio, age, phone, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, name, bio, age, phone, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(account)
    }

    async fn create(&self, new: NewAccount) -> Result<Account, ApiError> {
        let result = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash, name, bio, age, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, password_hash, name, bio, age, phone, created_at
            "#,
        )
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.profile.name)
        .bind(&new.profile.bio)
        .bind(new.profile.age)
        .bind(&new.profile.phone)
        .fetch_one(&self.db)
        .await;

        match result {
            Ok(account) => Ok(account),
            // The unique constraint is authoritative; the service-level
            // pre-check only narrows the race window.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(ApiError::DuplicateAccount)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, id: i64, fields: &ProfileFields) -> Result<Account, ApiError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET name  = COALESCE($2, name),
                bio   = COALESCE($3, bio),
                age   = COALESCE($4, age),
                phone = COALESCE($5, phone)
            WHERE id = $1
            RETURNING id, email, password_hash, name, bio, age, phone, created_at
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.bio)
        .bind(fields.age)
        .bind(&fields.phone)
        .fetch_optional(&self.db)
        .await?;
        account.ok_or(ApiError::AccountNotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::AccountNotFound);
        }
        Ok(())
    }

    async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<Account>, ApiError> {
        let rows = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, name, bio, age, phone, created_at
            FROM accounts
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
