// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! GitHub OAuth and account-linking handlers.
//!
//! The callback doubles as a login: a GitHub identity that is not yet linked
//! to any account gets one created on the spot, at verification level 2.
//! Browser-facing endpoints respond with redirects rather than error bodies.

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    auth::{issue_token, Auth},
    error::ApiError,
    github::GitHubUser,
    models::User,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    #[allow(dead_code)]
    pub state: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthLinkResponse {
    pub success: bool,
    pub auth_url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkAccountRequest {
    pub token: Option<String>,
    pub github_id: Option<String>,
    pub github_username: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkAccountResponse {
    pub success: bool,
    pub message: String,
    pub github_username: String,
    pub verification_level: u8,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GitHubUserResponse {
    pub success: bool,
    pub user: GitHubUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GitHubReposResponse {
    pub success: bool,
    pub repos: Vec<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/github/login",
    tag = "GitHub",
    responses((status = 307, description = "Redirect to the GitHub authorize page"))
)]
pub async fn login(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.github.authorize_url(None))
}

/// Find the account this GitHub identity belongs to, creating one when it is
/// brand new. Matches by GitHub ID first, then by primary email.
async fn resolve_github_user(
    state: &AppState,
    gh_user: &GitHubUser,
    access_token: &str,
) -> Result<User, ApiError> {
    let github_id = gh_user.id.to_string();

    let mut store = state.store.write().await;
    if let Some(user) = store.find_user_by_github_id(&github_id) {
        return store.update_user(&user.id, |u| {
            u.github_access_token = Some(access_token.to_string());
        });
    }

    let email = state
        .github
        .fetch_primary_email(access_token)
        .await?
        .to_lowercase();

    if let Some(user) = store.find_user_by_email(&email) {
        return store.update_user(&user.id, |u| {
            u.github_id = Some(github_id.clone());
            u.github_username = Some(gh_user.login.clone());
            u.github_access_token = Some(access_token.to_string());
            u.verification_level = u.verification_level.max(2);
        });
    }

    let username = if store.find_user_by_username(&gh_user.login).is_none() {
        gh_user.login.clone()
    } else {
        format!("{}-{github_id}", gh_user.login)
    };
    let now = Utc::now();
    store.insert_user(User {
        id: Uuid::new_v4().to_string(),
        email,
        password_hash: None,
        username,
        wallet_address: None,
        bio: gh_user.bio.clone().unwrap_or_default(),
        github_id: Some(github_id),
        github_username: Some(gh_user.login.clone()),
        github_access_token: Some(access_token.to_string()),
        verification_level: 2,
        tokens: vec![],
        created_at: now,
        updated_at: now,
    })
}

#[utoipa::path(
    get,
    path = "/api/github/callback",
    params(
        ("code" = Option<String>, Query, description = "OAuth authorization code"),
        ("state" = Option<String>, Query, description = "Opaque CSRF state")
    ),
    tag = "GitHub",
    responses((status = 307, description = "Redirect back to the frontend"))
)]
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    let frontend = &state.config.frontend_url;
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return Redirect::temporary(&format!("{frontend}/settings?error=GitHub authorization failed"));
    };

    let jwt = async {
        let access_token = state.github.exchange_code(&code).await?;
        let gh_user = state.github.fetch_user(&access_token).await?;
        let user = resolve_github_user(&state, &gh_user, &access_token).await?;
        issue_token(&user.id, &state.config.jwt_secret, state.config.jwt_expiry_days)
            .map_err(ApiError::from)
    }
    .await;

    match jwt {
        Ok(token) => Redirect::temporary(&format!("{frontend}/auth/github-callback?token={token}")),
        Err(err) => {
            tracing::warn!(%err, "GitHub callback failed");
            Redirect::temporary(&format!("{frontend}/settings?error=GitHub authorization failed"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/github/link",
    tag = "GitHub",
    security(("bearer" = [])),
    responses((status = 200, body = AuthLinkResponse))
)]
pub async fn auth_link(State(state): State<AppState>, Auth(_): Auth) -> Json<AuthLinkResponse> {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    let csrf_state: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Json(AuthLinkResponse {
        success: true,
        auth_url: state.github.authorize_url(Some(&csrf_state)),
    })
}

#[utoipa::path(
    post,
    path = "/api/github/link",
    request_body = LinkAccountRequest,
    tag = "GitHub",
    security(("bearer" = [])),
    responses(
        (status = 200, body = LinkAccountResponse),
        (status = 400, description = "Missing fields or identity linked elsewhere")
    )
)]
pub async fn link_account(
    State(state): State<AppState>,
    Auth(current): Auth,
    Json(request): Json<LinkAccountRequest>,
) -> Result<Json<LinkAccountResponse>, ApiError> {
    let (Some(token), Some(github_id), Some(github_username)) = (
        request.token.filter(|t| !t.is_empty()),
        request.github_id.filter(|i| !i.is_empty()),
        request.github_username.filter(|u| !u.is_empty()),
    ) else {
        return Err(ApiError::bad_request(
            "GitHub token, ID, and username are required",
        ));
    };

    let mut store = state.store.write().await;
    if store
        .find_user_by_github_id(&github_id)
        .is_some_and(|u| u.id != current.id)
    {
        return Err(ApiError::bad_request(
            "This GitHub account is already linked to another user",
        ));
    }

    let user = store.update_user(&current.id, |u| {
        u.github_id = Some(github_id);
        u.github_username = Some(github_username.clone());
        u.github_access_token = Some(token);
        u.verification_level = u.verification_level.max(2);
    })?;

    Ok(Json(LinkAccountResponse {
        success: true,
        message: "GitHub account linked successfully".to_string(),
        github_username,
        verification_level: user.verification_level,
    }))
}

/// The stored access token for the caller, or 404 when no account is linked.
async fn linked_access_token(state: &AppState, user_id: &str) -> Result<String, ApiError> {
    state
        .store
        .read()
        .await
        .user(user_id)?
        .github_access_token
        .ok_or_else(|| ApiError::not_found("GitHub account not linked"))
}

#[utoipa::path(
    get,
    path = "/api/github/user",
    tag = "GitHub",
    security(("bearer" = [])),
    responses(
        (status = 200, body = GitHubUserResponse),
        (status = 404, description = "GitHub account not linked")
    )
)]
pub async fn github_user(
    State(state): State<AppState>,
    Auth(current): Auth,
) -> Result<Json<GitHubUserResponse>, ApiError> {
    let access_token = linked_access_token(&state, &current.id).await?;
    let user = state.github.fetch_user(&access_token).await?;
    Ok(Json(GitHubUserResponse {
        success: true,
        user,
    }))
}

#[utoipa::path(
    get,
    path = "/api/github/repos",
    tag = "GitHub",
    security(("bearer" = [])),
    responses(
        (status = 200, body = GitHubReposResponse),
        (status = 404, description = "GitHub account not linked")
    )
)]
pub async fn github_repos(
    State(state): State<AppState>,
    Auth(current): Auth,
) -> Result<Json<GitHubReposResponse>, ApiError> {
    let access_token = linked_access_token(&state, &current.id).await?;
    let repos = state.github.fetch_repos(&access_token).await?;
    Ok(Json(GitHubReposResponse {
        success: true,
        repos,
    }))
}

#[utoipa::path(
    post,
    path = "/api/github/unlink",
    tag = "GitHub",
    security(("bearer" = [])),
    responses((status = 200, body = MessageResponse))
)]
pub async fn unlink(
    State(state): State<AppState>,
    Auth(current): Auth,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.write().await.update_user(&current.id, |u| {
        u.github_id = None;
        u.github_username = None;
        u.github_access_token = None;
    })?;

    Ok(Json(MessageResponse {
        success: true,
        message: "GitHub account unlinked successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    async fn seed_user(state: &AppState, id: &str, github: Option<(&str, &str)>) -> AuthenticatedUser {
        let now = Utc::now();
        let user = state
            .store
            .write()
            .await
            .insert_user(User {
                id: id.to_string(),
                email: format!("{id}@example.com"),
                password_hash: None,
                username: id.to_string(),
                wallet_address: None,
                bio: String::new(),
                github_id: github.map(|(gid, _)| gid.to_string()),
                github_username: github.map(|(_, login)| login.to_string()),
                github_access_token: github.map(|_| "gho_token".to_string()),
                verification_level: 1,
                tokens: vec![],
                created_at: now,
                updated_at: now,
            })
            .unwrap();
        AuthenticatedUser::from(&user)
    }

    fn location(response: axum::response::Response) -> String {
        response
            .headers()
            .get(axum::http::header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn callback_without_code_redirects_with_error() {
        let state = AppState::for_tests();
        let redirect = callback(
            State(state),
            Query(CallbackQuery {
                code: None,
                state: None,
            }),
        )
        .await;
        let target = location(redirect.into_response());
        assert!(target.starts_with("http://localhost:3000/settings?error="));
    }

    #[tokio::test]
    async fn auth_link_carries_a_fresh_state() {
        let state = AppState::for_tests();
        let user = seed_user(&state, "alice", None).await;

        let Json(first) = auth_link(State(state.clone()), Auth(user.clone())).await;
        let Json(second) = auth_link(State(state), Auth(user)).await;
        assert!(first.auth_url.contains("state="));
        assert_ne!(first.auth_url, second.auth_url);
    }

    #[tokio::test]
    async fn link_account_requires_all_fields() {
        let state = AppState::for_tests();
        let user = seed_user(&state, "alice", None).await;

        let err = link_account(
            State(state),
            Auth(user),
            Json(LinkAccountRequest {
                token: Some("gho_x".into()),
                github_id: None,
                github_username: Some("alice-gh".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "GitHub token, ID, and username are required");
    }

    #[tokio::test]
    async fn link_account_rejects_identity_linked_elsewhere() {
        let state = AppState::for_tests();
        seed_user(&state, "alice", Some(("42", "alice-gh"))).await;
        let bob = seed_user(&state, "bob", None).await;

        let err = link_account(
            State(state),
            Auth(bob),
            Json(LinkAccountRequest {
                token: Some("gho_x".into()),
                github_id: Some("42".into()),
                github_username: Some("alice-gh".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.message,
            "This GitHub account is already linked to another user"
        );
    }

    #[tokio::test]
    async fn link_account_raises_verification_level() {
        let state = AppState::for_tests();
        let user = seed_user(&state, "alice", None).await;

        let Json(response) = link_account(
            State(state.clone()),
            Auth(user),
            Json(LinkAccountRequest {
                token: Some("gho_x".into()),
                github_id: Some("42".into()),
                github_username: Some("alice-gh".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.verification_level, 2);
        assert_eq!(response.github_username, "alice-gh");

        let stored = state.store.read().await.user("alice").unwrap();
        assert_eq!(stored.github_id.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn github_user_requires_a_linked_account() {
        let state = AppState::for_tests();
        let user = seed_user(&state, "alice", None).await;

        let err = github_user(State(state), Auth(user)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "GitHub account not linked");
    }

    #[tokio::test]
    async fn unlink_clears_github_fields() {
        let state = AppState::for_tests();
        let user = seed_user(&state, "alice", Some(("42", "alice-gh"))).await;

        let Json(response) = unlink(State(state.clone()), Auth(user)).await.unwrap();
        assert!(response.success);

        let stored = state.store.read().await.user("alice").unwrap();
        assert!(stored.github_id.is_none());
        assert!(stored.github_username.is_none());
        assert!(stored.github_access_token.is_none());
    }
}
