use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::accounts::store::Account;

/// Mutable profile subset. This is the only shape the update path accepts,
/// so fields outside name/bio/age/phone can never reach the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub age: Option<i32>,
    pub phone: Option<String>,
}

/// Request body for account registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Page selector for the admin listing.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

/// Account as returned to the client. Has no password field by
/// construction.
#[derive(Debug, Serialize)]
pub struct PublicAccount {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub age: Option<i32>,
    pub phone: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Account> for PublicAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
            bio: account.bio,
            age: account.age,
            phone: account.phone,
            created_at: account.created_at,
        }
    }
}

/// Response envelope for mutations and login.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub message: &'static str,
    pub user: PublicAccount,
}
