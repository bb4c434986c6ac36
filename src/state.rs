// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Shared application state.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::github::GitHubClient;
use crate::rate_limit::RateLimiter;
use crate::solana::ChainGateway;
use crate::store::Store;
use crate::trading::TradingClient;

/// State handed to every handler. Cheap to clone; all fields are shared.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
    pub config: Arc<Config>,
    pub chain: Arc<ChainGateway>,
    pub github: Arc<GitHubClient>,
    pub trading: Arc<TradingClient>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config, chain: ChainGateway) -> Self {
        let github = GitHubClient::new(
            &config.github_client_id,
            &config.github_client_secret,
            &config.github_callback_url,
        );
        let trading = TradingClient::new(&config.trading_api_url, &config.trading_api_key);
        Self {
            store: Arc::new(RwLock::new(Store::new())),
            config: Arc::new(config),
            chain: Arc::new(chain),
            github: Arc::new(github),
            trading: Arc::new(trading),
            limiter: Arc::new(RateLimiter::new()),
        }
    }

    /// State with an empty store, default config, and no operator wallet.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::for_tests_with(Config::default())
    }

    #[cfg(test)]
    pub fn for_tests_with(config: Config) -> Self {
        let chain = ChainGateway::new(&config.solana_rpc_url, None, &config.solana_network)
            .expect("gateway without operator cannot fail");
        Self::new(config, chain)
    }
}
