// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Third-party trading venue client.
//!
//! Wraps the venue's REST API: creating a trading pair for a launched token,
//! reading price and trade history, and listing trending tokens. Wire
//! payloads use the venue's snake_case field names and are converted into
//! the platform's camelCase shapes here.

use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::solana::validator::is_valid_address;

const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, Error)]
pub enum TradingError {
    #[error("Invalid Solana token address")]
    InvalidTokenAddress,
    #[error("Invalid Solana wallet address")]
    InvalidWalletAddress,
    #[error("Trading API request failed: {0}")]
    Http(String),
}

impl From<reqwest::Error> for TradingError {
    fn from(err: reqwest::Error) -> Self {
        TradingError::Http(err.to_string())
    }
}

impl From<TradingError> for ApiError {
    fn from(err: TradingError) -> Self {
        match err {
            TradingError::InvalidTokenAddress | TradingError::InvalidWalletAddress => {
                ApiError::bad_request(err.to_string())
            }
            TradingError::Http(_) => ApiError::internal(err.to_string()),
        }
    }
}

/// A created trading pair.
#[derive(Debug, Clone)]
pub struct CreatedPair {
    pub pair_id: String,
    pub initial_price: f64,
    pub liquidity_amount: f64,
}

/// Market snapshot for one token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPrice {
    pub price: f64,
    pub price_change_24h: Option<f64>,
    pub liquidity: Option<f64>,
    pub volume_24h: Option<f64>,
    pub market_cap: Option<f64>,
}

/// A token in the trending listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendingToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub price: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub liquidity: Option<f64>,
    pub volume_24h: Option<f64>,
    pub market_cap: Option<f64>,
}

/// One executed trade from the venue's history feed.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub token_address: String,
    pub token_symbol: String,
    /// `buy` or `sell`.
    #[serde(rename = "type")]
    pub side: String,
    pub amount: f64,
    pub price: f64,
    pub value: f64,
    pub wallet_address: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CreatePairResponse {
    pair_id: String,
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: f64,
    price_change_24h: Option<f64>,
    liquidity: Option<f64>,
    volume_24h: Option<f64>,
    market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    tokens: Vec<WireToken>,
}

#[derive(Debug, Deserialize)]
struct WireToken {
    token_address: String,
    name: Option<String>,
    symbol: Option<String>,
    price: Option<f64>,
    price_change_24h: Option<f64>,
    liquidity: Option<f64>,
    volume_24h: Option<f64>,
    market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TradesResponse {
    #[serde(default)]
    trades: Vec<WireTrade>,
}

#[derive(Debug, Deserialize)]
struct WireTrade {
    id: String,
    token_address: String,
    token_symbol: Option<String>,
    #[serde(rename = "type")]
    side: String,
    amount: f64,
    price: f64,
    value: f64,
    wallet_address: String,
    timestamp: Option<DateTime<Utc>>,
}

impl From<WireTrade> for Trade {
    fn from(trade: WireTrade) -> Self {
        Self {
            id: trade.id,
            token_address: trade.token_address,
            token_symbol: trade.token_symbol.unwrap_or_else(|| "Unknown".to_string()),
            side: trade.side,
            amount: trade.amount,
            price: trade.price,
            value: trade.value,
            wallet_address: trade.wallet_address,
            timestamp: trade.timestamp,
        }
    }
}

impl From<WireToken> for TrendingToken {
    fn from(token: WireToken) -> Self {
        Self {
            address: token.token_address,
            name: token.name.unwrap_or_else(|| "Unknown".to_string()),
            symbol: token.symbol.unwrap_or_else(|| "???".to_string()),
            price: token.price,
            price_change_24h: token.price_change_24h,
            liquidity: token.liquidity,
            volume_24h: token.volume_24h,
            market_cap: token.market_cap,
        }
    }
}

pub struct TradingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TradingClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create a trading pair for a token. Prices and liquidity are in SOL.
    pub async fn create_pair(
        &self,
        token_address: &str,
        initial_price: f64,
        liquidity_amount: f64,
        creator_wallet: &str,
    ) -> Result<CreatedPair, TradingError> {
        if !is_valid_address(token_address) {
            return Err(TradingError::InvalidTokenAddress);
        }
        if !is_valid_address(creator_wallet) {
            return Err(TradingError::InvalidWalletAddress);
        }

        tracing::info!(token_address, initial_price, "creating trading pair");

        let response = self
            .http
            .post(format!("{}/pairs/create", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({
                "token_address": token_address,
                "initial_price": initial_price,
                "liquidity_amount": liquidity_amount,
                "creator_wallet": creator_wallet,
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<CreatePairResponse>()
            .await?;

        tracing::info!(pair_id = %response.pair_id, "trading pair created");

        Ok(CreatedPair {
            pair_id: response.pair_id,
            initial_price,
            liquidity_amount,
        })
    }

    /// Current market data for one token.
    pub async fn token_price(&self, token_address: &str) -> Result<TokenPrice, TradingError> {
        if !is_valid_address(token_address) {
            return Err(TradingError::InvalidTokenAddress);
        }

        let response = self
            .http
            .get(format!("{}/tokens/{token_address}/price", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<PriceResponse>()
            .await?;

        Ok(TokenPrice {
            price: response.price,
            price_change_24h: response.price_change_24h,
            liquidity: response.liquidity,
            volume_24h: response.volume_24h,
            market_cap: response.market_cap,
        })
    }

    /// Recent trades in one token, newest first.
    pub async fn token_trades(
        &self,
        token_address: &str,
        limit: usize,
    ) -> Result<Vec<Trade>, TradingError> {
        if !is_valid_address(token_address) {
            return Err(TradingError::InvalidTokenAddress);
        }

        let response = self
            .http
            .get(format!("{}/tokens/{token_address}/trades", self.base_url))
            .query(&[("limit", limit)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<TradesResponse>()
            .await?;

        Ok(response.trades.into_iter().map(Trade::from).collect())
    }

    /// Recent trades made by one wallet, newest first.
    pub async fn user_trades(
        &self,
        wallet_address: &str,
        limit: usize,
    ) -> Result<Vec<Trade>, TradingError> {
        if !is_valid_address(wallet_address) {
            return Err(TradingError::InvalidWalletAddress);
        }

        let response = self
            .http
            .get(format!("{}/users/{wallet_address}/trades", self.base_url))
            .query(&[("limit", limit)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<TradesResponse>()
            .await?;

        Ok(response.trades.into_iter().map(Trade::from).collect())
    }

    /// Trending tokens on the venue, best first.
    pub async fn trending(&self, limit: usize) -> Result<Vec<TrendingToken>, TradingError> {
        let response = self
            .http
            .get(format!("{}/tokens/trending", self.base_url))
            .query(&[("limit", limit)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<TrendingResponse>()
            .await?;

        Ok(response.tokens.into_iter().map(TrendingToken::from).collect())
    }
}
