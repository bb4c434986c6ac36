// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! GitHub OAuth and REST client.
//!
//! Covers the OAuth code exchange plus the handful of REST calls the
//! platform needs: the authenticated user's profile, their primary email,
//! and their repository list.

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use url::form_urlencoded;
use utoipa::ToSchema;

use crate::error::ApiError;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const API_URL: &str = "https://api.github.com";
const OAUTH_SCOPE: &str = "read:user user:email repo";
const AGENT: &str = "devlaunch-server";

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub request failed: {0}")]
    Http(String),
    #[error("Failed to obtain access token")]
    NoAccessToken,
    #[error("Unable to retrieve email from GitHub")]
    NoEmail,
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        GitHubError::Http(err.to_string())
    }
}

impl From<GitHubError> for ApiError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::NoAccessToken | GitHubError::NoEmail => {
                ApiError::bad_request(err.to_string())
            }
            GitHubError::Http(_) => ApiError::internal(err.to_string()),
        }
    }
}

/// Profile fields read from `GET /user`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GitHubUser {
    pub id: u64,
    pub login: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmailEntry {
    email: String,
    primary: bool,
}

pub struct GitHubClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
}

impl GitHubClient {
    pub fn new(client_id: &str, client_secret: &str, callback_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            callback_url: callback_url.to_string(),
        }
    }

    /// Build the OAuth authorization URL, optionally carrying a CSRF state.
    pub fn authorize_url(&self, state: Option<&str>) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.callback_url)
            .append_pair("scope", OAUTH_SCOPE);
        if let Some(state) = state {
            query.append_pair("state", state);
        }
        format!("{AUTHORIZE_URL}?{}", query.finish())
    }

    /// Exchange an OAuth code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, GitHubError> {
        let response = self
            .http
            .post(TOKEN_URL)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, AGENT)
            .json(&json!({
                "client_id": self.client_id,
                "client_secret": self.client_secret,
                "code": code,
                "redirect_uri": self.callback_url,
            }))
            .send()
            .await?
            .json::<AccessTokenResponse>()
            .await?;

        response.access_token.ok_or(GitHubError::NoAccessToken)
    }

    pub async fn fetch_user(&self, access_token: &str) -> Result<GitHubUser, GitHubError> {
        let user = self
            .http
            .get(format!("{API_URL}/user"))
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(USER_AGENT, AGENT)
            .send()
            .await?
            .error_for_status()?
            .json::<GitHubUser>()
            .await?;
        Ok(user)
    }

    /// The user's primary verified email, falling back to the first listed.
    pub async fn fetch_primary_email(&self, access_token: &str) -> Result<String, GitHubError> {
        let emails = self
            .http
            .get(format!("{API_URL}/user/emails"))
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(USER_AGENT, AGENT)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<EmailEntry>>()
            .await?;

        pick_primary_email(&emails).ok_or(GitHubError::NoEmail)
    }

    /// The user's repositories, most recently updated first.
    pub async fn fetch_repos(&self, access_token: &str) -> Result<Vec<serde_json::Value>, GitHubError> {
        let repos = self
            .http
            .get(format!("{API_URL}/user/repos"))
            .query(&[("sort", "updated"), ("per_page", "100")])
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(USER_AGENT, AGENT)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<serde_json::Value>>()
            .await?;
        Ok(repos)
    }
}

fn pick_primary_email(emails: &[EmailEntry]) -> Option<String> {
    emails
        .iter()
        .find(|e| e.primary)
        .or_else(|| emails.first())
        .map(|e| e.email.clone())
}
