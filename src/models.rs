// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! # Persisted Entities and API Data Models
//!
//! One schema per entity: `User`, `Project`, `Token`, and `TransactionRecord`.
//! All types derive `Serialize`, `Deserialize`, and `ToSchema` for automatic
//! JSON handling and OpenAPI documentation. Field names serialize in
//! camelCase to match the public API contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// User
// =============================================================================

/// A registered platform user.
///
/// `email` and `username` are globally unique. Users created through GitHub
/// login carry no password hash and cannot log in with credentials.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    /// Argon2 PHC string. Never serialized to clients (see [`UserView`]).
    pub password_hash: Option<String>,
    pub username: String,
    pub wallet_address: Option<String>,
    pub bio: String,
    pub github_id: Option<String>,
    pub github_username: Option<String>,
    pub github_access_token: Option<String>,
    /// Identity tier, raised when an external identity is linked.
    pub verification_level: u8,
    /// IDs of tokens created by this user, in creation order.
    pub tokens: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user, with credentials and secrets stripped.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub username: String,
    pub wallet_address: Option<String>,
    pub bio: String,
    pub github_username: Option<String>,
    pub verification_level: u8,
    pub tokens: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            wallet_address: user.wallet_address.clone(),
            bio: user.bio.clone(),
            github_username: user.github_username.clone(),
            verification_level: user.verification_level,
            tokens: user.tokens.clone(),
            created_at: user.created_at,
        }
    }
}

// =============================================================================
// Project
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    Mobile,
    Desktop,
    Blockchain,
    Ai,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    Abandoned,
}

/// A developer project on the platform.
///
/// Mutated and deleted only by its creator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ProjectCategory,
    /// Owning user ID. Must reference an existing user.
    pub creator: String,
    pub team_members: Vec<String>,
    /// Validated GitHub repository URL, if any.
    pub github_repo: Option<String>,
    pub tags: Vec<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Token
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    Pending,
    Deployed,
    Trading,
    Delisted,
}

/// Descriptive metadata stored alongside a token. Name, symbol, and
/// description live only in the database, not on-chain.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Trading pair details, set once a pair is created on the trading venue.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradingInfo {
    pub pair_id: String,
    pub trading_url: String,
    pub initial_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// An SPL token tracked by the platform.
///
/// `token_address` is globally unique. Once `status` is `deployed`, only
/// description, logo, and social links remain editable, and the token can
/// no longer be deleted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub name: String,
    /// Stored uppercased.
    pub symbol: String,
    /// On-chain mint address (base58).
    pub token_address: String,
    /// Owning user ID.
    pub creator: String,
    /// Creator's wallet address at creation time (denormalized).
    pub creator_wallet: String,
    pub description: String,
    pub supply: u64,
    pub decimals: u8,
    pub status: TokenStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    pub metadata: TokenMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_info: Option<TradingInfo>,
    pub launch_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Transaction
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionType {
    TokenCreation,
    SolTransfer,
    TokenTransfer,
    NftTransfer,
    TokenMint,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

/// Append-only ledger entry for a chain-affecting action.
///
/// `tx_signature` is globally unique; records are never mutated after
/// insertion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub transaction_type: TransactionType,
    /// Owning user ID.
    pub sender: String,
    pub sender_wallet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    pub tx_signature: String,
    pub status: TransactionStatus,
    pub network: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// System events (admin log snapshot)
// =============================================================================

/// A recent noteworthy event, surfaced by the admin system-log endpoint.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemEvent {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_view_strips_credentials() {
        let user = User {
            id: "u-1".into(),
            email: "a@b.com".into(),
            password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$abc$def".into()),
            username: "alice".into(),
            wallet_address: None,
            bio: String::new(),
            github_id: None,
            github_username: None,
            github_access_token: Some("gho_secret".into()),
            verification_level: 1,
            tokens: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let view = UserView::from(&user);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("gho_secret"));
        assert!(json.contains(r#""email":"a@b.com""#));
    }

    #[test]
    fn enums_serialize_in_wire_format() {
        assert_eq!(
            serde_json::to_string(&TransactionType::SolTransfer).unwrap(),
            r#""sol-transfer""#
        );
        assert_eq!(
            serde_json::to_string(&TransactionType::TokenCreation).unwrap(),
            r#""token-creation""#
        );
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            r#""in-progress""#
        );
        assert_eq!(
            serde_json::to_string(&TokenStatus::Deployed).unwrap(),
            r#""deployed""#
        );
        assert_eq!(
            serde_json::to_string(&ProjectCategory::Blockchain).unwrap(),
            r#""blockchain""#
        );
    }
}
