use tracing::{info, warn};

use crate::accounts::dto::ProfileFields;
use crate::accounts::store::{Account, AccountStore, NewAccount};
use crate::accounts::validate;
use crate::auth::password;
use crate::errors::ApiError;

const LIST_LIMIT_MAX: i64 = 100;

/// Business rules over the persistence gateway. Returned accounts still
/// carry their hash; callers convert to `PublicAccount` before the HTTP
/// boundary.
pub async fn register_account(
    store: &dyn AccountStore,
    email: &str,
    plain_password: &str,
    profile: ProfileFields,
) -> Result<Account, ApiError> {
    let email = email.trim().to_lowercase();

    // Pre-check narrows the duplicate race window; the unique constraint
    // in the store is authoritative.
    if store.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::DuplicateAccount);
    }

    let password_hash = password::hash_password(plain_password).await?;
    let account = store
        .create(NewAccount {
            email,
            password_hash,
            profile,
        })
        .await?;

    info!(account_id = account.id, email = %account.email, "account created");
    Ok(account)
}

pub async fn get_profile(store: &dyn AccountStore, id: i64) -> Result<Account, ApiError> {
    store.find_by_id(id).await?.ok_or(ApiError::AccountNotFound)
}

/// Applies a partial profile update. Only name/bio/age/phone can change;
/// `ProfileFields` admits nothing else. Age is re-checked here even though
/// the request validator already ran.
pub async fn update_profile(
    store: &dyn AccountStore,
    id: i64,
    fields: ProfileFields,
) -> Result<Account, ApiError> {
    if store.find_by_id(id).await?.is_none() {
        return Err(ApiError::AccountNotFound);
    }

    if let Some(age) = fields.age {
        validate::validate_age(age)?;
    }

    let account = store.update(id, &fields).await?;
    info!(account_id = account.id, "profile updated");
    Ok(account)
}

/// Unknown email and wrong password fail identically so callers cannot
/// probe which addresses are registered.
pub async fn authenticate(
    store: &dyn AccountStore,
    email: &str,
    plain_password: &str,
) -> Result<Account, ApiError> {
    let email = email.trim().to_lowercase();

    let Some(account) = store.find_by_email(&email).await? else {
        warn!(email = %email, "login for unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !password::verify_password(plain_password, &account.password_hash).await? {
        warn!(account_id = account.id, "login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    info!(account_id = account.id, "login succeeded");
    Ok(account)
}

pub async fn list_accounts(
    store: &dyn AccountStore,
    limit: i64,
    offset: i64,
) -> Result<Vec<Account>, ApiError> {
    let limit = limit.clamp(1, LIST_LIMIT_MAX);
    let offset = offset.max(0);
    store.list_page(limit, offset).await
}
