// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Token registry handlers.
//!
//! Tokens register as `pending` and move to `deployed` once minted through
//! the wallet endpoints. A deployed token keeps its chain-facing fields
//! frozen: only description, logo, and social links stay editable, and the
//! token can no longer be deleted.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Token, TokenMetadata, TokenStatus, TradingInfo},
    state::AppState,
    store::{TokenFilter, TokenLookup},
    trading::{TokenPrice, Trade, TrendingToken},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTokenRequest {
    pub name: String,
    pub symbol: String,
    pub token_address: String,
    #[serde(default)]
    pub description: Option<String>,
    pub supply: Option<i64>,
    pub decimals: Option<i64>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTokenRequest {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub description: Option<String>,
    pub supply: Option<i64>,
    pub decimals: Option<i64>,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub discord: Option<String>,
    pub telegram: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTradingPairRequest {
    pub initial_price: f64,
    #[serde(default)]
    pub liquidity_amount: Option<f64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListTokensQuery {
    pub status: Option<TokenStatus>,
    pub creator: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TrendingQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchTokensQuery {
    pub query: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub token: Token,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenListResponse {
    pub success: bool,
    pub count: usize,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradingPairResponse {
    pub success: bool,
    pub message: String,
    pub trading_info: TradingInfo,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenStatsResponse {
    pub success: bool,
    pub token: TokenSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<TokenPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_data_error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenSummary {
    pub name: String,
    pub symbol: String,
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrendingResponse {
    pub success: bool,
    pub tokens: Vec<TrendingToken>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TokenTradesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenTradesResponse {
    pub success: bool,
    pub trades: Vec<Trade>,
}

/// Classify a path segment as a store ID or an on-chain address.
fn resolve_lookup(id_or_address: &str) -> TokenLookup {
    if Uuid::parse_str(id_or_address).is_ok() {
        TokenLookup::ById(id_or_address.to_string())
    } else {
        TokenLookup::ByAddress(id_or_address.to_string())
    }
}

fn validate_metadata(
    name: &str,
    symbol: &str,
    token_address: &str,
    request_description: Option<&str>,
    supply: Option<i64>,
    decimals: Option<i64>,
    logo: Option<&str>,
    website: Option<&str>,
    twitter: Option<&str>,
    discord: Option<&str>,
) -> Result<(), ApiError> {
    let input = crate::solana::validator::TokenMetadataInput {
        name,
        symbol,
        token_address,
        description: request_description,
        supply,
        decimals,
        logo,
        website,
        twitter,
        discord,
    };
    let errors = crate::solana::validator::validate_token_metadata(&input);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation("Invalid token metadata", errors))
    }
}

#[utoipa::path(
    post,
    path = "/api/tokens",
    request_body = RegisterTokenRequest,
    tag = "Tokens",
    security(("bearer" = [])),
    responses(
        (status = 201, body = TokenResponse),
        (status = 400, description = "Invalid metadata, duplicate address, or no wallet")
    )
)]
pub async fn register_token(
    State(state): State<AppState>,
    Auth(current): Auth,
    Json(request): Json<RegisterTokenRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let wallet_address = current.wallet_address.clone().ok_or_else(|| {
        ApiError::bad_request("User does not have an associated wallet address")
    })?;

    validate_metadata(
        &request.name,
        &request.symbol,
        &request.token_address,
        request.description.as_deref(),
        request.supply,
        request.decimals,
        request.logo.as_deref(),
        request.website.as_deref(),
        request.twitter.as_deref(),
        request.discord.as_deref(),
    )?;

    let now = Utc::now();
    let name = request.name.trim().to_string();
    let symbol = request.symbol.trim().to_uppercase();
    let description = request.description.unwrap_or_default();
    let token = Token {
        id: Uuid::new_v4().to_string(),
        name: name.clone(),
        symbol: symbol.clone(),
        token_address: request.token_address,
        creator: current.id.clone(),
        creator_wallet: wallet_address,
        description: description.clone(),
        supply: request.supply.unwrap_or(1_000_000_000) as u64,
        decimals: request.decimals.unwrap_or(9) as u8,
        status: TokenStatus::Pending,
        logo: request.logo.clone(),
        website: request.website,
        twitter: request.twitter,
        discord: request.discord,
        telegram: request.telegram,
        metadata: TokenMetadata {
            name,
            symbol,
            description: Some(description).filter(|d| !d.is_empty()),
            image: request.logo,
        },
        trading_info: None,
        launch_date: now,
        created_at: now,
        updated_at: now,
    };

    let mut store = state.store.write().await;
    let token = store.insert_token(token)?;
    store.update_user(&current.id, |user| user.tokens.push(token.id.clone()))?;

    tracing::info!(token_id = %token.id, symbol = %token.symbol, "token registered");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            success: true,
            message: Some("Token created successfully".to_string()),
            token,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/tokens",
    params(ListTokensQuery),
    tag = "Tokens",
    responses((status = 200, body = TokenListResponse))
)]
pub async fn list_tokens(
    State(state): State<AppState>,
    Query(query): Query<ListTokensQuery>,
) -> Result<Json<TokenListResponse>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let filter = TokenFilter {
        status: query.status,
        creator: query.creator,
        search: query.search,
    };
    let (tokens, total) = state.store.read().await.list_tokens(&filter, page, limit);

    Ok(Json(TokenListResponse {
        success: true,
        count: tokens.len(),
        total,
        page,
        total_pages: total.div_ceil(limit),
        tokens,
    }))
}

#[utoipa::path(
    get,
    path = "/api/tokens/search",
    params(SearchTokensQuery),
    tag = "Tokens",
    responses(
        (status = 200, body = TokenListResponse),
        (status = 400, description = "Empty search query")
    )
)]
pub async fn search_tokens(
    State(state): State<AppState>,
    Query(query): Query<SearchTokensQuery>,
) -> Result<Json<TokenListResponse>, ApiError> {
    let Some(term) = query.query.filter(|q| !q.trim().is_empty()) else {
        return Err(ApiError::bad_request("Search query cannot be empty"));
    };

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let filter = TokenFilter {
        search: Some(term),
        ..TokenFilter::default()
    };
    let (tokens, total) = state.store.read().await.list_tokens(&filter, page, limit);

    Ok(Json(TokenListResponse {
        success: true,
        count: tokens.len(),
        total,
        page,
        total_pages: total.div_ceil(limit),
        tokens,
    }))
}

#[utoipa::path(
    get,
    path = "/api/tokens/{id_or_address}",
    params(("id_or_address" = String, Path, description = "Token ID or mint address")),
    tag = "Tokens",
    responses(
        (status = 200, body = TokenResponse),
        (status = 404, description = "Token not found")
    )
)]
pub async fn get_token(
    State(state): State<AppState>,
    Path(id_or_address): Path<String>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .store
        .read()
        .await
        .token_by_lookup(&resolve_lookup(&id_or_address))?;
    Ok(Json(TokenResponse {
        success: true,
        message: None,
        token,
    }))
}

#[utoipa::path(
    put,
    path = "/api/tokens/{id_or_address}",
    params(("id_or_address" = String, Path, description = "Token ID or mint address")),
    request_body = UpdateTokenRequest,
    tag = "Tokens",
    security(("bearer" = [])),
    responses(
        (status = 200, body = TokenResponse),
        (status = 403, description = "Not the token creator"),
        (status = 404, description = "Token not found")
    )
)]
pub async fn update_token(
    State(state): State<AppState>,
    Auth(current): Auth,
    Path(id_or_address): Path<String>,
    Json(request): Json<UpdateTokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mut store = state.store.write().await;
    let token = store.token_by_lookup(&resolve_lookup(&id_or_address))?;
    if token.creator != current.id {
        return Err(ApiError::forbidden("Not authorized to update this token"));
    }

    let restricted = matches!(token.status, TokenStatus::Deployed | TokenStatus::Trading);

    if !restricted {
        validate_metadata(
            request.name.as_deref().unwrap_or(&token.name),
            request.symbol.as_deref().unwrap_or(&token.symbol),
            &token.token_address,
            request.description.as_deref(),
            request.supply,
            request.decimals,
            request.logo.as_deref(),
            request.website.as_deref(),
            request.twitter.as_deref(),
            request.discord.as_deref(),
        )?;
    }

    let token = store.update_token(&token.id, |token| {
        // always editable, deployed or not
        if let Some(description) = request.description {
            token.description = description;
        }
        if let Some(logo) = request.logo {
            token.logo = Some(logo);
        }
        if let Some(website) = request.website {
            token.website = Some(website);
        }
        if let Some(twitter) = request.twitter {
            token.twitter = Some(twitter);
        }
        if let Some(discord) = request.discord {
            token.discord = Some(discord);
        }
        if let Some(telegram) = request.telegram {
            token.telegram = Some(telegram);
        }

        // chain-facing fields are frozen once deployed
        if !restricted {
            if let Some(name) = request.name {
                token.name = name;
            }
            if let Some(symbol) = request.symbol {
                token.symbol = symbol.to_uppercase();
            }
            if let Some(supply) = request.supply {
                token.supply = supply as u64;
            }
            if let Some(decimals) = request.decimals {
                token.decimals = decimals as u8;
            }
        }
    })?;

    Ok(Json(TokenResponse {
        success: true,
        message: Some("Token updated successfully".to_string()),
        token,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/tokens/{id_or_address}",
    params(("id_or_address" = String, Path, description = "Token ID or mint address")),
    tag = "Tokens",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token deleted"),
        (status = 400, description = "Deployed tokens cannot be deleted"),
        (status = 403, description = "Not the token creator"),
        (status = 404, description = "Token not found")
    )
)]
pub async fn delete_token(
    State(state): State<AppState>,
    Auth(current): Auth,
    Path(id_or_address): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut store = state.store.write().await;
    let token = store.token_by_lookup(&resolve_lookup(&id_or_address))?;
    if token.creator != current.id {
        return Err(ApiError::forbidden("Not authorized to delete this token"));
    }
    if matches!(token.status, TokenStatus::Deployed | TokenStatus::Trading) {
        return Err(ApiError::bad_request("Cannot delete a deployed token"));
    }

    store.delete_token(&token.id)?;
    store.update_user(&current.id, |user| {
        user.tokens.retain(|id| id != &token.id);
    })?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Token deleted successfully",
    })))
}

#[utoipa::path(
    post,
    path = "/api/tokens/{id_or_address}/trading-pair",
    params(("id_or_address" = String, Path, description = "Token ID or mint address")),
    request_body = CreateTradingPairRequest,
    tag = "Tokens",
    security(("bearer" = [])),
    responses(
        (status = 200, body = TradingPairResponse),
        (status = 403, description = "Not the token creator"),
        (status = 404, description = "Token not found")
    )
)]
pub async fn create_trading_pair(
    State(state): State<AppState>,
    Auth(current): Auth,
    Path(id_or_address): Path<String>,
    Json(request): Json<CreateTradingPairRequest>,
) -> Result<Json<TradingPairResponse>, ApiError> {
    let token = state
        .store
        .read()
        .await
        .token_by_lookup(&resolve_lookup(&id_or_address))?;
    if token.creator != current.id {
        return Err(ApiError::forbidden(
            "Not authorized to create a trading pair for this token",
        ));
    }

    let liquidity = request.liquidity_amount.unwrap_or(0.0);
    let pair = state
        .trading
        .create_pair(
            &token.token_address,
            request.initial_price,
            liquidity,
            &token.creator_wallet,
        )
        .await?;

    let trading_info = TradingInfo {
        pair_id: pair.pair_id,
        trading_url: format!("https://pump.fun/token/{}", token.token_address),
        initial_price: pair.initial_price,
        liquidity_amount: request.liquidity_amount,
        created_at: Utc::now(),
    };

    let info = trading_info.clone();
    state.store.write().await.update_token(&token.id, |token| {
        token.trading_info = Some(info);
        token.status = TokenStatus::Trading;
    })?;

    Ok(Json(TradingPairResponse {
        success: true,
        message: "Trading pair created successfully".to_string(),
        trading_info,
    }))
}

#[utoipa::path(
    get,
    path = "/api/tokens/{id_or_address}/stats",
    params(("id_or_address" = String, Path, description = "Token ID or mint address")),
    tag = "Tokens",
    responses(
        (status = 200, body = TokenStatsResponse),
        (status = 404, description = "Token not found")
    )
)]
pub async fn token_stats(
    State(state): State<AppState>,
    Path(id_or_address): Path<String>,
) -> Result<Json<TokenStatsResponse>, ApiError> {
    let token = state
        .store
        .read()
        .await
        .token_by_lookup(&resolve_lookup(&id_or_address))?;

    let summary = TokenSummary {
        name: token.name.clone(),
        symbol: token.symbol.clone(),
        address: token.token_address.clone(),
    };

    // market data is best-effort: the token page must render without it
    match state.trading.token_price(&token.token_address).await {
        Ok(stats) => Ok(Json(TokenStatsResponse {
            success: true,
            token: summary,
            stats: Some(stats),
            market_data_error: None,
        })),
        Err(err) => {
            tracing::warn!(address = %token.token_address, %err, "market data unavailable");
            Ok(Json(TokenStatsResponse {
                success: true,
                token: summary,
                stats: None,
                market_data_error: Some("Failed to fetch market data".to_string()),
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/tokens/{id_or_address}/trades",
    params(
        ("id_or_address" = String, Path, description = "Token ID or mint address"),
        TokenTradesQuery
    ),
    tag = "Tokens",
    responses(
        (status = 200, body = TokenTradesResponse),
        (status = 404, description = "Token not found")
    )
)]
pub async fn token_trades(
    State(state): State<AppState>,
    Path(id_or_address): Path<String>,
    Query(query): Query<TokenTradesQuery>,
) -> Result<Json<TokenTradesResponse>, ApiError> {
    let token = state
        .store
        .read()
        .await
        .token_by_lookup(&resolve_lookup(&id_or_address))?;

    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let trades = state
        .trading
        .token_trades(&token.token_address, limit)
        .await?;
    Ok(Json(TokenTradesResponse {
        success: true,
        trades,
    }))
}

#[utoipa::path(
    get,
    path = "/api/tokens/trending",
    params(TrendingQuery),
    tag = "Tokens",
    responses((status = 200, body = TrendingResponse))
)]
pub async fn trending(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<Json<TrendingResponse>, ApiError> {
    let limit = query.limit.unwrap_or(10).clamp(1, 50);
    let tokens = state.trading.trending(limit).await?;
    Ok(Json(TrendingResponse {
        success: true,
        tokens,
    }))
}
