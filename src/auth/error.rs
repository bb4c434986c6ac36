// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Authentication and authorization failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("User no longer exists")]
    UserNotFound,
    #[error("Admin access required")]
    AdminRequired,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::UserNotFound => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::AdminRequired => StatusCode::FORBIDDEN,
        }
    }
}

impl From<AuthError> for crate::error::ApiError {
    fn from(err: AuthError) -> Self {
        crate::error::ApiError::new(err.status_code(), err.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_failure_kind() {
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::AdminRequired.status_code(), StatusCode::FORBIDDEN);
    }
}
