// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

use serde::{Deserialize, Serialize};

use crate::models::User;

/// JWT claims carried in a bearer token. `sub` is the user ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// The resolved identity behind a valid bearer token.
///
/// Looked up from the store on every request, so a deleted user's token
/// stops working immediately.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub wallet_address: Option<String>,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            wallet_address: user.wallet_address.clone(),
        }
    }
}
