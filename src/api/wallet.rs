// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Wallet and chain operation handlers.
//!
//! Transfers and minting are executed by the platform operator wallet and
//! recorded in the transaction ledger only after the chain returns a
//! confirmed signature.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{
        Token, TokenMetadata, TokenStatus, TransactionRecord, TransactionStatus, TransactionType,
    },
    solana::validator::is_valid_address,
    state::AppState,
    store::TransactionFilter,
    trading::Trade,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateAddressRequest {
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateAddressResponse {
    pub success: bool,
    pub is_valid: bool,
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub success: bool,
    pub address: String,
    pub balance: f64,
    pub network: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceResponse {
    pub success: bool,
    pub wallet_address: String,
    pub token_address: String,
    pub balance: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenRequest {
    pub name: String,
    pub symbol: String,
    pub decimals: Option<u8>,
    pub initial_supply: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenResponse {
    pub success: bool,
    pub token_address: String,
    pub tx_signature: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CombinedTokenInfo {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub creator: Option<String>,
    pub description: String,
    pub launch_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint_authority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_initialized: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfoResponse {
    pub success: bool,
    pub token_info: CombinedTokenInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_chain_data_error: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TradesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TradesResponse {
    pub success: bool,
    pub trades: Vec<Trade>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TransactionsQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionsResponse {
    pub success: bool,
    pub transactions: Vec<TransactionRecord>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferSolRequest {
    pub recipient_address: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferSolResponse {
    pub success: bool,
    pub tx_signature: String,
    pub amount: f64,
    pub recipient_address: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferTokenRequest {
    pub recipient_address: String,
    pub token_address: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferTokenResponse {
    pub success: bool,
    pub tx_signature: String,
    pub amount: f64,
    pub recipient_address: String,
    pub token_address: String,
    pub token_symbol: String,
}

/// Caller's wallet address, or the 400 the balance endpoints share.
fn wallet_on_file(current: &crate::auth::AuthenticatedUser) -> Result<String, ApiError> {
    current
        .wallet_address
        .clone()
        .filter(|w| is_valid_address(w))
        .ok_or_else(|| ApiError::bad_request("User does not have a valid wallet address"))
}

#[utoipa::path(
    get,
    path = "/api/wallet/balance",
    tag = "Wallet",
    security(("bearer" = [])),
    responses(
        (status = 200, body = BalanceResponse),
        (status = 400, description = "Caller has no valid wallet address")
    )
)]
pub async fn sol_balance(
    State(state): State<AppState>,
    Auth(current): Auth,
) -> Result<Json<BalanceResponse>, ApiError> {
    let address = wallet_on_file(&current)?;
    let balance = state.chain.sol_balance(&address).await?;
    Ok(Json(BalanceResponse {
        success: true,
        address,
        balance,
        network: state.chain.network.clone(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/wallet/token-balance/{mint}",
    params(("mint" = String, Path, description = "Token mint address")),
    tag = "Wallet",
    security(("bearer" = [])),
    responses(
        (status = 200, body = TokenBalanceResponse),
        (status = 400, description = "Invalid token address or no valid wallet")
    )
)]
pub async fn token_balance(
    State(state): State<AppState>,
    Auth(current): Auth,
    Path(mint): Path<String>,
) -> Result<Json<TokenBalanceResponse>, ApiError> {
    let wallet = wallet_on_file(&current)?;
    if !is_valid_address(&mint) {
        return Err(ApiError::bad_request("Invalid token address"));
    }
    let balance = state.chain.token_balance(&wallet, &mint).await?;
    Ok(Json(TokenBalanceResponse {
        success: true,
        wallet_address: wallet,
        token_address: mint,
        balance,
    }))
}

#[utoipa::path(
    post,
    path = "/api/wallet/validate-address",
    request_body = ValidateAddressRequest,
    tag = "Wallet",
    responses((status = 200, body = ValidateAddressResponse))
)]
pub async fn validate_address(
    Json(request): Json<ValidateAddressRequest>,
) -> Json<ValidateAddressResponse> {
    Json(ValidateAddressResponse {
        success: true,
        is_valid: is_valid_address(&request.address),
        address: request.address,
    })
}

#[utoipa::path(
    post,
    path = "/api/wallet/create-token",
    request_body = CreateTokenRequest,
    tag = "Wallet",
    security(("bearer" = [])),
    responses(
        (status = 201, body = CreateTokenResponse),
        (status = 400, description = "Missing name/symbol, out-of-range decimals, or no valid wallet"),
        (status = 500, description = "Operator wallet unavailable or chain failure")
    )
)]
pub async fn create_token(
    State(state): State<AppState>,
    Auth(current): Auth,
    Json(request): Json<CreateTokenRequest>,
) -> Result<(StatusCode, Json<CreateTokenResponse>), ApiError> {
    if request.name.trim().is_empty() || request.symbol.trim().is_empty() {
        return Err(ApiError::bad_request("Token name and symbol are required"));
    }

    let wallet_address = wallet_on_file(&current)?;

    let decimals = request.decimals.unwrap_or(9);
    if decimals > 9 {
        return Err(ApiError::bad_request(
            "Decimals must be an integer between 0 and 9",
        ));
    }
    let initial_supply = request.initial_supply.unwrap_or(1_000_000_000);

    let outcome = state.chain.create_mint(decimals, initial_supply).await?;

    let now = Utc::now();
    let name = request.name.trim().to_string();
    let symbol = request.symbol.trim().to_uppercase();
    let description = format!("Token created by {}", current.username);
    let token = Token {
        id: Uuid::new_v4().to_string(),
        name: name.clone(),
        symbol: symbol.clone(),
        token_address: outcome.token_address.clone(),
        creator: current.id.clone(),
        creator_wallet: wallet_address,
        description: description.clone(),
        supply: initial_supply,
        decimals,
        status: TokenStatus::Deployed,
        logo: None,
        website: None,
        twitter: None,
        discord: None,
        telegram: None,
        metadata: TokenMetadata {
            name: name.clone(),
            symbol: symbol.clone(),
            description: Some(description),
            image: None,
        },
        trading_info: None,
        launch_date: now,
        created_at: now,
        updated_at: now,
    };

    let mut store = state.store.write().await;
    let token = store.insert_token(token)?;
    store.update_user(&current.id, |user| user.tokens.push(token.id.clone()))?;
    store.insert_transaction(TransactionRecord {
        id: Uuid::new_v4().to_string(),
        transaction_type: TransactionType::TokenCreation,
        sender: current.id.clone(),
        sender_wallet: state.chain.operator_address().unwrap_or_default(),
        recipient: None,
        amount: Some(initial_supply as f64),
        token_address: Some(outcome.token_address.clone()),
        token_symbol: Some(symbol.clone()),
        tx_signature: outcome.signature.clone(),
        status: TransactionStatus::Confirmed,
        network: state.chain.network.clone(),
        created_at: now,
    })?;
    store.record_event("info", format!("token {symbol} minted by {}", current.username));

    Ok((
        StatusCode::CREATED,
        Json(CreateTokenResponse {
            success: true,
            token_address: outcome.token_address,
            tx_signature: outcome.signature,
            name,
            symbol,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/wallet/token-info/{mint}",
    params(("mint" = String, Path, description = "Token mint address")),
    tag = "Wallet",
    responses(
        (status = 200, body = TokenInfoResponse),
        (status = 400, description = "Invalid token address")
    )
)]
pub async fn token_info(
    State(state): State<AppState>,
    Path(mint): Path<String>,
) -> Result<Json<TokenInfoResponse>, ApiError> {
    if !is_valid_address(&mint) {
        return Err(ApiError::bad_request("Invalid token address"));
    }

    let from_db = state.store.read().await.find_token_by_address(&mint);
    let mut info = CombinedTokenInfo {
        address: mint.clone(),
        name: from_db
            .as_ref()
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        symbol: from_db
            .as_ref()
            .map(|t| t.symbol.clone())
            .unwrap_or_else(|| "UNKNOWN".to_string()),
        creator: from_db.as_ref().map(|t| t.creator.clone()),
        description: from_db
            .as_ref()
            .map(|t| t.description.clone())
            .unwrap_or_default(),
        launch_date: from_db.as_ref().map(|t| t.launch_date),
        supply: None,
        decimals: None,
        mint_authority: None,
        is_initialized: None,
    };

    // on-chain data is best-effort
    match state.chain.token_info(&mint).await {
        Ok(on_chain) => {
            info.supply = Some(on_chain.supply);
            info.decimals = Some(on_chain.decimals);
            info.mint_authority = on_chain.mint_authority;
            info.is_initialized = Some(on_chain.is_initialized);
            Ok(Json(TokenInfoResponse {
                success: true,
                token_info: info,
                on_chain_data_error: None,
            }))
        }
        Err(err) => {
            tracing::warn!(%mint, %err, "failed to fetch on-chain token data");
            Ok(Json(TokenInfoResponse {
                success: true,
                token_info: info,
                on_chain_data_error: Some("Failed to fetch on-chain data".to_string()),
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/wallet/trades",
    params(TradesQuery),
    tag = "Wallet",
    security(("bearer" = [])),
    responses(
        (status = 200, body = TradesResponse),
        (status = 400, description = "Caller has no valid wallet address")
    )
)]
pub async fn trade_history(
    State(state): State<AppState>,
    Auth(current): Auth,
    Query(query): Query<TradesQuery>,
) -> Result<Json<TradesResponse>, ApiError> {
    let wallet = wallet_on_file(&current)?;
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let trades = state.trading.user_trades(&wallet, limit).await?;
    Ok(Json(TradesResponse {
        success: true,
        trades,
    }))
}

#[utoipa::path(
    get,
    path = "/api/wallet/transactions",
    params(TransactionsQuery),
    tag = "Wallet",
    security(("bearer" = [])),
    responses((status = 200, body = TransactionsResponse))
)]
pub async fn transactions(
    State(state): State<AppState>,
    Auth(current): Auth,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let filter = TransactionFilter {
        transaction_type: query.transaction_type,
        status: query.status,
    };
    let (transactions, total) =
        state
            .store
            .read()
            .await
            .list_transactions(&current.id, &filter, page, limit);

    Ok(Json(TransactionsResponse {
        success: true,
        transactions,
        pagination: Pagination {
            page,
            limit,
            total,
            pages: total.div_ceil(limit),
        },
    }))
}

#[utoipa::path(
    post,
    path = "/api/wallet/transfer-sol",
    request_body = TransferSolRequest,
    tag = "Wallet",
    security(("bearer" = [])),
    responses(
        (status = 200, body = TransferSolResponse),
        (status = 400, description = "Invalid amount or recipient"),
        (status = 500, description = "Operator wallet unavailable or chain failure")
    )
)]
pub async fn transfer_sol(
    State(state): State<AppState>,
    Auth(current): Auth,
    Json(request): Json<TransferSolRequest>,
) -> Result<Json<TransferSolResponse>, ApiError> {
    if request.amount <= 0.0 {
        return Err(ApiError::bad_request("Amount must be greater than 0"));
    }
    if !is_valid_address(&request.recipient_address) {
        return Err(ApiError::bad_request("Invalid recipient address"));
    }

    let signature = state
        .chain
        .transfer_sol(&request.recipient_address, request.amount)
        .await?;

    let mut store = state.store.write().await;
    store.insert_transaction(TransactionRecord {
        id: Uuid::new_v4().to_string(),
        transaction_type: TransactionType::SolTransfer,
        sender: current.id.clone(),
        sender_wallet: state.chain.operator_address().unwrap_or_default(),
        recipient: Some(request.recipient_address.clone()),
        amount: Some(request.amount),
        token_address: None,
        token_symbol: None,
        tx_signature: signature.clone(),
        status: TransactionStatus::Confirmed,
        network: state.chain.network.clone(),
        created_at: Utc::now(),
    })?;

    Ok(Json(TransferSolResponse {
        success: true,
        tx_signature: signature,
        amount: request.amount,
        recipient_address: request.recipient_address,
    }))
}

#[utoipa::path(
    post,
    path = "/api/wallet/transfer-token",
    request_body = TransferTokenRequest,
    tag = "Wallet",
    security(("bearer" = [])),
    responses(
        (status = 200, body = TransferTokenResponse),
        (status = 400, description = "Invalid amount or address"),
        (status = 404, description = "Token not registered"),
        (status = 500, description = "Operator wallet unavailable or chain failure")
    )
)]
pub async fn transfer_token(
    State(state): State<AppState>,
    Auth(current): Auth,
    Json(request): Json<TransferTokenRequest>,
) -> Result<Json<TransferTokenResponse>, ApiError> {
    if request.amount <= 0.0 {
        return Err(ApiError::bad_request("Amount must be greater than 0"));
    }
    if !is_valid_address(&request.recipient_address) {
        return Err(ApiError::bad_request("Invalid recipient address"));
    }
    if !is_valid_address(&request.token_address) {
        return Err(ApiError::bad_request("Invalid token address"));
    }

    let token = state
        .store
        .read()
        .await
        .find_token_by_address(&request.token_address)
        .ok_or_else(|| ApiError::not_found("Token not found"))?;

    let signature = state
        .chain
        .transfer_token(
            &request.token_address,
            &request.recipient_address,
            request.amount,
            token.decimals,
        )
        .await?;

    let mut store = state.store.write().await;
    store.insert_transaction(TransactionRecord {
        id: Uuid::new_v4().to_string(),
        transaction_type: TransactionType::TokenTransfer,
        sender: current.id.clone(),
        sender_wallet: state.chain.operator_address().unwrap_or_default(),
        recipient: Some(request.recipient_address.clone()),
        amount: Some(request.amount),
        token_address: Some(request.token_address.clone()),
        token_symbol: Some(token.symbol.clone()),
        tx_signature: signature.clone(),
        status: TransactionStatus::Confirmed,
        network: state.chain.network.clone(),
        created_at: Utc::now(),
    })?;

    Ok(Json(TransferTokenResponse {
        success: true,
        tx_signature: signature,
        amount: request.amount,
        recipient_address: request.recipient_address,
        token_address: request.token_address,
        token_symbol: token.symbol,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::models::User;

    const WALLET: &str = "4Nd1mY2f6vS9rP3qW8xT5uK7jL1hG2cD9eF6aB3mX8pZ";
    const MINT: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    async fn seed_user(state: &AppState, id: &str, wallet: Option<&str>) -> AuthenticatedUser {
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
                wallet_address: wallet.map(str::to_string),
                bio: String::new(),
                github_id: None,
                github_username: None,
                github_access_token: None,
                verification_level: 1,
                tokens: vec![],
                created_at: now,
                updated_at: now,
            })
            .unwrap();
        AuthenticatedUser::from(&user)
    }

    #[tokio::test]
    async fn validate_address_always_succeeds() {
        let Json(valid) = validate_address(Json(ValidateAddressRequest {
            address: WALLET.into(),
        }))
        .await;
        assert!(valid.success);
        assert!(valid.is_valid);

        let Json(invalid) = validate_address(Json(ValidateAddressRequest {
            address: "garbage!".into(),
        }))
        .await;
        assert!(invalid.success);
        assert!(!invalid.is_valid);
        assert_eq!(invalid.address, "garbage!");
    }

    #[tokio::test]
    async fn balance_requires_a_wallet_on_file() {
        let state = AppState::for_tests();

        let no_wallet = seed_user(&state, "alice", None).await;
        let err = sol_balance(State(state.clone()), Auth(no_wallet))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "User does not have a valid wallet address");

        // a stored but malformed address gets the same answer
        let bad_wallet = seed_user(&state, "bob", Some("not-an-address")).await;
        let err = sol_balance(State(state), Auth(bad_wallet)).await.unwrap_err();
        assert_eq!(err.message, "User does not have a valid wallet address");
    }

    #[tokio::test]
    async fn token_balance_checks_wallet_then_mint() {
        let state = AppState::for_tests();

        let no_wallet = seed_user(&state, "alice", None).await;
        let err = token_balance(State(state.clone()), Auth(no_wallet), Path(MINT.into()))
            .await
            .unwrap_err();
        assert_eq!(err.message, "User does not have a valid wallet address");

        let user = seed_user(&state, "bob", Some(WALLET)).await;
        let err = token_balance(State(state), Auth(user), Path("bad".into()))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid token address");
    }

    #[tokio::test]
    async fn create_token_requires_name_symbol_and_wallet() {
        let state = AppState::for_tests();
        let user = seed_user(&state, "alice", Some(WALLET)).await;

        let err = create_token(
            State(state.clone()),
            Auth(user),
            Json(CreateTokenRequest {
                name: " ".into(),
                symbol: "".into(),
                decimals: None,
                initial_supply: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let no_wallet = seed_user(&state, "bob", None).await;
        let err = create_token(
            State(state),
            Auth(no_wallet),
            Json(CreateTokenRequest {
                name: "Coin".into(),
                symbol: "C".into(),
                decimals: None,
                initial_supply: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message, "User does not have a valid wallet address");
    }

    #[tokio::test]
    async fn create_token_rejects_out_of_range_decimals() {
        let state = AppState::for_tests();
        let user = seed_user(&state, "alice", Some(WALLET)).await;

        let err = create_token(
            State(state.clone()),
            Auth(user),
            Json(CreateTokenRequest {
                name: "Coin".into(),
                symbol: "COIN".into(),
                decimals: Some(200),
                initial_supply: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Decimals must be an integer between 0 and 9");

        // rejected before the chain is ever asked to mint
        assert_eq!(state.store.read().await.token_count(), 0);
    }

    #[tokio::test]
    async fn create_token_fails_cleanly_without_operator() {
        let state = AppState::for_tests();
        let user = seed_user(&state, "alice", Some(WALLET)).await;

        let err = create_token(
            State(state.clone()),
            Auth(user),
            Json(CreateTokenRequest {
                name: "Coin".into(),
                symbol: "COIN".into(),
                decimals: None,
                initial_supply: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        // nothing recorded when the mint never happened
        let store = state.store.read().await;
        assert_eq!(store.token_count(), 0);
    }

    #[tokio::test]
    async fn transfer_sol_validates_before_signing() {
        let state = AppState::for_tests();
        let user = seed_user(&state, "alice", Some(WALLET)).await;

        let err = transfer_sol(
            State(state.clone()),
            Auth(user.clone()),
            Json(TransferSolRequest {
                recipient_address: WALLET.into(),
                amount: 0.0,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message, "Amount must be greater than 0");

        let err = transfer_sol(
            State(state),
            Auth(user),
            Json(TransferSolRequest {
                recipient_address: "bad".into(),
                amount: 1.0,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message, "Invalid recipient address");
    }

    #[tokio::test]
    async fn transfer_token_requires_registered_token() {
        let state = AppState::for_tests();
        let user = seed_user(&state, "alice", Some(WALLET)).await;

        let err = transfer_token(
            State(state),
            Auth(user),
            Json(TransferTokenRequest {
                recipient_address: WALLET.into(),
                token_address: MINT.into(),
                amount: 5.0,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Token not found");
    }

    #[tokio::test]
    async fn trade_history_requires_a_wallet_on_file() {
        let state = AppState::for_tests();
        let no_wallet = seed_user(&state, "alice", None).await;

        let err = trade_history(
            State(state),
            Auth(no_wallet),
            Query(TradesQuery { limit: None }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "User does not have a valid wallet address");
    }

    #[tokio::test]
    async fn transactions_are_scoped_to_the_caller() {
        let state = AppState::for_tests();
        let alice = seed_user(&state, "alice", Some(WALLET)).await;
        seed_user(&state, "bob", None).await;

        {
            let mut store = state.store.write().await;
            for (sender, sig) in [("alice", "sig-1"), ("alice", "sig-2"), ("bob", "sig-3")] {
                store
                    .insert_transaction(TransactionRecord {
                        id: Uuid::new_v4().to_string(),
                        transaction_type: TransactionType::SolTransfer,
                        sender: sender.to_string(),
                        sender_wallet: WALLET.into(),
                        recipient: Some(WALLET.into()),
                        amount: Some(1.0),
                        token_address: None,
                        token_symbol: None,
                        tx_signature: sig.to_string(),
                        status: TransactionStatus::Confirmed,
                        network: "devnet".into(),
                        created_at: Utc::now(),
                    })
                    .unwrap();
            }
        }

        let Json(response) = transactions(
            State(state),
            Auth(alice),
            Query(TransactionsQuery {
                transaction_type: None,
                status: None,
                page: None,
                limit: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.pagination.total, 2);
        assert!(response
            .transactions
            .iter()
            .all(|t| t.sender == "alice"));
    }
}
