use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::accounts::dto::{AccountResponse, LoginRequest};
use crate::accounts::{service, validate};
use crate::errors::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    validate::validate_email(payload.email.trim())?;

    let account =
        service::authenticate(state.store.as_ref(), &payload.email, &payload.password).await?;

    Ok(Json(AccountResponse {
        message: "login successful",
        user: account.into(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::accounts::dto::ProfileFields;
    use crate::accounts::store::testing::MemStore;

    async fn state_with_account() -> AppState {
        let store = Arc::new(MemStore::new());
        service::register_account(
            store.as_ref(),
            "x@y.com",
            "abc12345",
            ProfileFields::default(),
        )
        .await
        .expect("seed account");
        AppState::for_tests(store)
    }

    async fn login_response(state: AppState, email: &str, password: &str) -> (StatusCode, String) {
        let result = login(
            State(state),
            Json(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            }),
        )
        .await;
        let resp = result.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
    }

    #[tokio::test]
    async fn login_succeeds_without_exposing_password() {
        let state = state_with_account().await;
        let (status, body) = login_response(state, "x@y.com", "abc12345").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("x@y.com"));
        assert!(!body.contains("password"));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_yield_the_same_response() {
        let state = state_with_account().await;
        let wrong_pw = login_response(state.clone(), "x@y.com", "wrongpw99").await;
        let unknown = login_response(state, "ghost@y.com", "abc12345").await;
        assert_eq!(wrong_pw.0, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_pw, unknown);
    }

    #[tokio::test]
    async fn malformed_email_is_rejected_before_lookup() {
        let state = state_with_account().await;
        let (status, _) = login_response(state, "not-an-email", "abc12345").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
