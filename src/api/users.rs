// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Registration, login, and profile handlers.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    auth::{issue_token, Auth},
    error::ApiError,
    models::{Token, User, UserView},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    #[serde(default)]
    pub wallet_address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub success: bool,
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserTokensResponse {
    pub success: bool,
    pub count: usize,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub wallet_address: Option<String>,
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ApiError::internal("Server error during registration"))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn validate_registration(request: &RegisterRequest) -> Vec<String> {
    let mut errors = Vec::new();
    if request.email.trim().is_empty() || !request.email.contains('@') {
        errors.push("A valid email is required".to_string());
    }
    if request.username.trim().is_empty() {
        errors.push("Username is required".to_string());
    }
    if request.password.chars().count() < 6 {
        errors.push("Password must be at least 6 characters".to_string());
    }
    errors
}

#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    tag = "Users",
    responses(
        (status = 201, body = SessionResponse),
        (status = 400, description = "Validation failure or duplicate email/username")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let errors = validate_registration(&request);
    if !errors.is_empty() {
        return Err(ApiError::validation("Invalid registration data", errors));
    }

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: request.email.trim().to_lowercase(),
        password_hash: Some(hash_password(&request.password)?),
        username: request.username.trim().to_string(),
        wallet_address: request.wallet_address.filter(|w| !w.is_empty()),
        bio: String::new(),
        github_id: None,
        github_username: None,
        github_access_token: None,
        verification_level: 1,
        tokens: vec![],
        created_at: now,
        updated_at: now,
    };

    let user = state.store.write().await.insert_user(user)?;
    let token = issue_token(&user.id, &state.config.jwt_secret, state.config.jwt_expiry_days)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            success: true,
            token,
            user: UserView::from(&user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    tag = "Users",
    responses(
        (status = 200, body = SessionResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let user = state
        .store
        .read()
        .await
        .find_user_by_email(&request.email)
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    // GitHub-created accounts carry no password hash and cannot log in here
    let matches = user
        .password_hash
        .as_deref()
        .map(|hash| verify_password(&request.password, hash))
        .unwrap_or(false);
    if !matches {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = issue_token(&user.id, &state.config.jwt_secret, state.config.jwt_expiry_days)?;

    Ok(Json(SessionResponse {
        success: true,
        token,
        user: UserView::from(&user),
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses((status = 200, body = UserResponse))
)]
pub async fn me(
    State(state): State<AppState>,
    Auth(current): Auth,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.store.read().await.user(&current.id)?;
    Ok(Json(UserResponse {
        success: true,
        user: UserView::from(&user),
    }))
}

#[utoipa::path(
    put,
    path = "/api/users/me",
    request_body = UpdateProfileRequest,
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, body = UserResponse),
        (status = 400, description = "Username already taken")
    )
)]
pub async fn update_me(
    State(state): State<AppState>,
    Auth(current): Auth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let mut store = state.store.write().await;

    if let Some(username) = &request.username {
        let taken = store
            .find_user_by_username(username)
            .is_some_and(|existing| existing.id != current.id);
        if taken {
            return Err(ApiError::bad_request("This username is already taken"));
        }
    }

    let user = store.update_user(&current.id, |user| {
        if let Some(username) = request.username {
            user.username = username;
        }
        if let Some(bio) = request.bio {
            user.bio = bio;
        }
        if let Some(wallet_address) = request.wallet_address {
            user.wallet_address = if wallet_address.is_empty() {
                None
            } else {
                Some(wallet_address)
            };
        }
    })?;

    Ok(Json(UserResponse {
        success: true,
        user: UserView::from(&user),
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    tag = "Users",
    responses(
        (status = 200, body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.store.read().await.user(&id)?;
    Ok(Json(UserResponse {
        success: true,
        user: UserView::from(&user),
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/tokens",
    params(("id" = String, Path, description = "User ID")),
    tag = "Users",
    responses(
        (status = 200, body = UserTokensResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn user_tokens(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserTokensResponse>, ApiError> {
    let store = state.store.read().await;
    store.user(&id)?;
    let tokens = store.tokens_by_creator(&id);
    Ok(Json(UserTokensResponse {
        success: true,
        count: tokens.len(),
        tokens,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(email: &str, username: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "hunter22".to_string(),
            username: username.to_string(),
            wallet_address: None,
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let state = AppState::for_tests();

        let (status, Json(session)) = register(
            State(state.clone()),
            Json(register_request("Alice@Example.com", "alice")),
        )
        .await
        .expect("registration succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert!(session.success);
        // emails are stored lowercased
        assert_eq!(session.user.email, "alice@example.com");
        assert!(!session.token.is_empty());

        let Json(session) = login(
            State(state),
            Json(LoginRequest {
                email: "alice@example.com".into(),
                password: "hunter22".into(),
            }),
        )
        .await
        .expect("login succeeds");
        assert_eq!(session.user.username, "alice");
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let state = AppState::for_tests();
        register(
            State(state.clone()),
            Json(register_request("a@b.com", "alice")),
        )
        .await
        .unwrap();

        let err = register(
            State(state),
            Json(register_request("a@b.com", "someone-else")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "User with this email already exists");
    }

    #[tokio::test]
    async fn register_validates_input() {
        let state = AppState::for_tests();
        let err = register(
            State(state),
            Json(RegisterRequest {
                email: "not-an-email".into(),
                password: "abc".into(),
                username: " ".into(),
                wallet_address: None,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let errors = err.errors.unwrap();
        assert_eq!(errors.len(), 3);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let state = AppState::for_tests();
        register(
            State(state.clone()),
            Json(register_request("a@b.com", "alice")),
        )
        .await
        .unwrap();

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "a@b.com".into(),
                password: "wrong-password".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn login_rejects_unknown_email() {
        let state = AppState::for_tests();
        let err = login(
            State(state),
            Json(LoginRequest {
                email: "ghost@b.com".into(),
                password: "whatever1".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_rejects_accounts_without_password() {
        let state = AppState::for_tests();
        let now = Utc::now();
        state
            .store
            .write()
            .await
            .insert_user(User {
                id: "gh-user".into(),
                email: "gh@b.com".into(),
                password_hash: None,
                username: "ghuser".into(),
                wallet_address: None,
                bio: String::new(),
                github_id: Some("123".into()),
                github_username: Some("ghuser".into()),
                github_access_token: None,
                verification_level: 2,
                tokens: vec![],
                created_at: now,
                updated_at: now,
            })
            .unwrap();

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "gh@b.com".into(),
                password: "anything1".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn update_me_changes_profile_but_guards_username() {
        let state = AppState::for_tests();
        let (_, Json(alice)) = register(
            State(state.clone()),
            Json(register_request("a@b.com", "alice")),
        )
        .await
        .unwrap();
        register(
            State(state.clone()),
            Json(register_request("b@b.com", "bob")),
        )
        .await
        .unwrap();

        let current = {
            let store = state.store.read().await;
            let user = store.user(&alice.user.id).unwrap();
            crate::auth::AuthenticatedUser::from(&user)
        };

        let Json(updated) = update_me(
            State(state.clone()),
            Auth(current.clone()),
            Json(UpdateProfileRequest {
                username: None,
                bio: Some("building things".into()),
                wallet_address: Some("4Nd1mY2f6vS9rP3qW8xT5uK7jL1hG2cD9eF6aB3mX8pZ".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.user.bio, "building things");
        assert!(updated.user.wallet_address.is_some());

        let err = update_me(
            State(state),
            Auth(current),
            Json(UpdateProfileRequest {
                username: Some("bob".into()),
                bio: None,
                wallet_address: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_user_returns_404_for_unknown_id() {
        let state = AppState::for_tests();
        let err = get_user(State(state), Path("missing".into()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
