// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and carried
//! in [`crate::state::AppState`]; nothing reads the environment afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `JWT_SECRET` | HS256 signing secret for bearer tokens | `devlaunch-secret-key` |
//! | `SOLANA_RPC_URL` | Solana RPC endpoint | `https://api.devnet.solana.com` |
//! | `SOLANA_NETWORK` | Network label stamped on transactions | `devnet` |
//! | `OPERATOR_WALLET_KEY` | Base58 secret key of the platform operator wallet | unset |
//! | `GITHUB_CLIENT_ID` | GitHub OAuth app client id | empty |
//! | `GITHUB_CLIENT_SECRET` | GitHub OAuth app client secret | empty |
//! | `GITHUB_CALLBACK_URL` | OAuth callback URL | `http://localhost:8000/api/github/callback` |
//! | `TRADING_API_URL` | Third-party trading API base URL | `https://api.pump.fun/v1` |
//! | `TRADING_API_KEY` | Trading API key | empty |
//! | `CORS_ORIGIN` | Allowed CORS origin | `http://localhost:3000` |
//! | `FRONTEND_URL` | Frontend base URL for OAuth redirects | `http://localhost:3000` |
//! | `ADMIN_IDS` | Comma-separated user IDs with admin access | empty |
//! | `LOG_FORMAT` | `json` or `pretty` | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Bearer token lifetime in days.
    pub jwt_expiry_days: i64,
    pub solana_rpc_url: String,
    pub solana_network: String,
    /// Base58-encoded operator secret key. When unset, chain-mutating
    /// endpoints report the operator wallet as unavailable.
    pub operator_wallet_key: Option<String>,
    pub github_client_id: String,
    pub github_client_secret: String,
    pub github_callback_url: String,
    pub trading_api_url: String,
    pub trading_api_key: String,
    pub cors_origin: String,
    pub frontend_url: String,
    /// User IDs on the admin allow-list.
    pub admin_ids: Vec<String>,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "8000").parse().unwrap_or(8000),
            jwt_secret: var_or("JWT_SECRET", "devlaunch-secret-key"),
            jwt_expiry_days: 7,
            solana_rpc_url: var_or("SOLANA_RPC_URL", "https://api.devnet.solana.com"),
            solana_network: var_or("SOLANA_NETWORK", "devnet"),
            operator_wallet_key: env::var("OPERATOR_WALLET_KEY").ok().filter(|k| !k.is_empty()),
            github_client_id: var_or("GITHUB_CLIENT_ID", ""),
            github_client_secret: var_or("GITHUB_CLIENT_SECRET", ""),
            github_callback_url: var_or(
                "GITHUB_CALLBACK_URL",
                "http://localhost:8000/api/github/callback",
            ),
            trading_api_url: var_or("TRADING_API_URL", "https://api.pump.fun/v1"),
            trading_api_key: var_or("TRADING_API_KEY", ""),
            cors_origin: var_or("CORS_ORIGIN", "http://localhost:3000"),
            frontend_url: var_or("FRONTEND_URL", "http://localhost:3000"),
            admin_ids: var_or("ADMIN_IDS", "")
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Whether a user ID is on the admin allow-list.
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_ids.iter().any(|id| id == user_id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            jwt_secret: "devlaunch-secret-key".into(),
            jwt_expiry_days: 7,
            solana_rpc_url: "https://api.devnet.solana.com".into(),
            solana_network: "devnet".into(),
            operator_wallet_key: None,
            github_client_id: String::new(),
            github_client_secret: String::new(),
            github_callback_url: "http://localhost:8000/api/github/callback".into(),
            trading_api_url: "https://api.pump.fun/v1".into(),
            trading_api_key: String::new(),
            cors_origin: "http://localhost:3000".into(),
            frontend_url: "http://localhost:3000".into(),
            admin_ids: Vec::new(),
        }
    }
}
