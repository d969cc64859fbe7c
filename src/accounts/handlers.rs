use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::accounts::dto::{
    AccountResponse, Pagination, ProfileFields, PublicAccount, RegisterRequest,
};
use crate::accounts::{service, validate};
use crate::auth::guard::{self, Caller};
use crate::errors::ApiError;
use crate::state::AppState;

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register).get(list_accounts))
        .route("/users/:id", get(get_account).put(update_account))
}

/// POST /users. Open registration, no guard.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    validate::validate_email(payload.email.trim())?;
    validate::validate_password(&payload.password)?;
    validate::validate_profile(&payload.profile)?;

    let account = service::register_account(
        state.store.as_ref(),
        &payload.email,
        &payload.password,
        payload.profile,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            message: "user created",
            user: account.into(),
        }),
    ))
}

/// GET /users/:id. Owner or admin.
#[instrument(skip(state))]
pub async fn get_account(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
) -> Result<Json<PublicAccount>, ApiError> {
    let id = guard::parse_account_id(&raw_id)?;
    guard::authorize_account_access(&caller, id)?;

    let account = service::get_profile(state.store.as_ref(), id).await?;
    Ok(Json(account.into()))
}

/// PUT /users/:id. Owner or admin; only profile fields can change.
#[instrument(skip(state, payload))]
pub async fn update_account(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
    Json(payload): Json<ProfileFields>,
) -> Result<Json<AccountResponse>, ApiError> {
    let id = guard::parse_account_id(&raw_id)?;
    guard::authorize_account_access(&caller, id)?;
    validate::validate_profile(&payload)?;

    let account = service::update_profile(state.store.as_ref(), id, payload).await?;
    Ok(Json(AccountResponse {
        message: "user updated",
        user: account.into(),
    }))
}

/// GET /users. Admin only.
#[instrument(skip(state))]
pub async fn list_accounts(
    State(state): State<AppState>,
    caller: Caller,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<PublicAccount>>, ApiError> {
    guard::require_admin(&caller)?;

    let accounts = service::list_accounts(state.store.as_ref(), page.limit, page.offset).await?;
    Ok(Json(accounts.into_iter().map(PublicAccount::from).collect()))
}
