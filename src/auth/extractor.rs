// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Axum extractors for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::claims::AuthenticatedUser;
use super::error::AuthError;
use super::token::decode_token;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Decodes the JWT from the Authorization header and resolves the subject
/// against the user store, so tokens for deleted users are rejected.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MissingToken)?;

        let claims = decode_token(token, &state.config.jwt_secret)?;

        let store = state.store.read().await;
        let user = store
            .user(&claims.sub)
            .map_err(|_| AuthError::UserNotFound)?;

        Ok(Auth(AuthenticatedUser::from(&user)))
    }
}

/// Extractor that requires a user on the admin allow-list.
pub struct AdminOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if !state.config.is_admin(&user.id) {
            return Err(AuthError::AdminRequired);
        }

        Ok(AdminOnly(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::issue_token;
    use crate::config::Config;
    use crate::models::User;
    use crate::state::AppState;
    use axum::http::Request;
    use chrono::Utc;

    fn seed_user(id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            password_hash: None,
            username: id.to_string(),
            wallet_address: None,
            bio: String::new(),
            github_id: None,
            github_username: None,
            github_access_token: None,
            verification_level: 1,
            tokens: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn parts_with_header(value: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(v) = value {
            builder = builder.header("Authorization", v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_requires_header() {
        let state = AppState::for_tests();
        let mut parts = parts_with_header(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn auth_resolves_existing_user() {
        let state = AppState::for_tests();
        state
            .store
            .write()
            .await
            .insert_user(seed_user("user-1"))
            .unwrap();

        let token = issue_token("user-1", &state.config.jwt_secret, 7).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email, "user-1@example.com");
    }

    #[tokio::test]
    async fn auth_rejects_token_for_missing_user() {
        let state = AppState::for_tests();
        let token = issue_token("ghost", &state.config.jwt_secret, 7).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn admin_only_rejects_regular_user() {
        let state = AppState::for_tests();
        state
            .store
            .write()
            .await
            .insert_user(seed_user("user-1"))
            .unwrap();

        let token = issue_token("user-1", &state.config.jwt_secret, 7).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::AdminRequired)));
    }

    #[tokio::test]
    async fn admin_only_accepts_allow_listed_user() {
        let config = Config {
            admin_ids: vec!["admin-1".into()],
            ..Config::default()
        };
        let state = AppState::for_tests_with(config);
        state
            .store
            .write()
            .await
            .insert_user(seed_user("admin-1"))
            .unwrap();

        let token = issue_token("admin-1", &state.config.jwt_secret, 7).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let AdminOnly(user) = AdminOnly::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.id, "admin-1");
    }
}
