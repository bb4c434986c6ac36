// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! In-process document store.
//!
//! Collections live in `HashMap`s behind the `AppState` lock. The store
//! enforces the entity invariants (unique email/username, unique token
//! address, unique transaction signature, project creator must exist) and
//! exposes the filtered, paginated queries the controllers need. Updates are
//! last-write-wins; there is no optimistic concurrency token.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::models::{
    Project, ProjectCategory, SystemEvent, Token, TokenStatus, TransactionRecord,
    TransactionStatus, TransactionType, User,
};

/// Cap on retained system events (oldest dropped first).
const EVENT_LOG_CAPACITY: usize = 500;

/// Explicit tagged token lookup, resolved by the caller before querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    ById(String),
    ByAddress(String),
}

/// Filters for the token listing endpoints.
#[derive(Debug, Default, Clone)]
pub struct TokenFilter {
    pub status: Option<TokenStatus>,
    pub creator: Option<String>,
    /// Case-insensitive match against name, symbol, or description.
    pub search: Option<String>,
}

/// Filters for the project listing endpoint.
#[derive(Debug, Default, Clone)]
pub struct ProjectFilter {
    pub category: Option<ProjectCategory>,
    pub tag: Option<String>,
    /// Case-insensitive match against name or description.
    pub search: Option<String>,
}

/// Filters for the transaction history endpoint.
#[derive(Debug, Default, Clone)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
}

#[derive(Default)]
pub struct Store {
    users: HashMap<String, User>,
    projects: HashMap<String, Project>,
    tokens: HashMap<String, Token>,
    transactions: HashMap<String, TransactionRecord>,
    events: Vec<SystemEvent>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sort newest-first and slice out one page. Returns the page plus the total
/// match count (for the pagination envelope).
fn paginate<T, F>(mut items: Vec<T>, page: usize, limit: usize, created_at: F) -> (Vec<T>, usize)
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let total = items.len();
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    let page = page.max(1);
    let limit = limit.max(1);
    let start = (page - 1) * limit;
    let page_items = if start >= total {
        Vec::new()
    } else {
        items.drain(start..total.min(start + limit)).collect()
    };
    (page_items, total)
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Insert a new user, enforcing unique email and username.
    pub fn insert_user(&mut self, user: User) -> Result<User, ApiError> {
        if self.find_user_by_email(&user.email).is_some() {
            return Err(ApiError::bad_request("User with this email already exists"));
        }
        if self.find_user_by_username(&user.username).is_some() {
            return Err(ApiError::bad_request("This username is already taken"));
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    pub fn user(&self, id: &str) -> Result<User, ApiError> {
        self.users
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let email = email.to_lowercase();
        self.users.values().find(|u| u.email == email).cloned()
    }

    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        self.users.values().find(|u| u.username == username).cloned()
    }

    pub fn find_user_by_github_id(&self, github_id: &str) -> Option<User> {
        self.users
            .values()
            .find(|u| u.github_id.as_deref() == Some(github_id))
            .cloned()
    }

    /// Apply a mutation to a user and bump `updated_at`. Last write wins.
    pub fn update_user<F>(&mut self, id: &str, mutate: F) -> Result<User, ApiError>
    where
        F: FnOnce(&mut User),
    {
        let user = self
            .users
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        mutate(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    pub fn list_users(
        &self,
        search: Option<&str>,
        page: usize,
        limit: usize,
    ) -> (Vec<User>, usize) {
        let matches: Vec<User> = self
            .users
            .values()
            .filter(|u| match search {
                Some(q) => contains_ci(&u.username, q) || contains_ci(&u.email, q),
                None => true,
            })
            .cloned()
            .collect();
        paginate(matches, page, limit, |u| u.created_at)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn users_created_since(&self, since: DateTime<Utc>) -> usize {
        self.users.values().filter(|u| u.created_at >= since).count()
    }

    pub fn users_active_since(&self, since: DateTime<Utc>) -> usize {
        self.users.values().filter(|u| u.updated_at >= since).count()
    }

    // -------------------------------------------------------------------------
    // Projects
    // -------------------------------------------------------------------------

    /// Insert a project. The creator must reference an existing user.
    pub fn insert_project(&mut self, project: Project) -> Result<Project, ApiError> {
        if !self.users.contains_key(&project.creator) {
            return Err(ApiError::bad_request("Project creator does not exist"));
        }
        self.projects.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    pub fn project(&self, id: &str) -> Result<Project, ApiError> {
        self.projects
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Project not found"))
    }

    pub fn update_project<F>(&mut self, id: &str, mutate: F) -> Result<Project, ApiError>
    where
        F: FnOnce(&mut Project),
    {
        let project = self
            .projects
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("Project not found"))?;
        mutate(project);
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    pub fn delete_project(&mut self, id: &str) -> Result<(), ApiError> {
        self.projects
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("Project not found"))
    }

    pub fn list_projects(
        &self,
        filter: &ProjectFilter,
        page: usize,
        limit: usize,
    ) -> (Vec<Project>, usize) {
        let matches: Vec<Project> = self
            .projects
            .values()
            .filter(|p| filter.category.is_none_or(|c| p.category == c))
            .filter(|p| {
                filter
                    .tag
                    .as_ref()
                    .is_none_or(|t| p.tags.iter().any(|tag| tag == t))
            })
            .filter(|p| {
                filter
                    .search
                    .as_ref()
                    .is_none_or(|q| contains_ci(&p.name, q) || contains_ci(&p.description, q))
            })
            .cloned()
            .collect();
        paginate(matches, page, limit, |p| p.created_at)
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    // -------------------------------------------------------------------------
    // Tokens
    // -------------------------------------------------------------------------

    /// Insert a token, enforcing a globally unique on-chain address.
    pub fn insert_token(&mut self, token: Token) -> Result<Token, ApiError> {
        if self.find_token_by_address(&token.token_address).is_some() {
            return Err(ApiError::bad_request("This token address already exists"));
        }
        self.tokens.insert(token.id.clone(), token.clone());
        Ok(token)
    }

    pub fn token(&self, id: &str) -> Result<Token, ApiError> {
        self.tokens
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Token not found"))
    }

    pub fn find_token_by_address(&self, address: &str) -> Option<Token> {
        self.tokens
            .values()
            .find(|t| t.token_address == address)
            .cloned()
    }

    /// Single lookup entry point for the tagged id-or-address input.
    pub fn token_by_lookup(&self, lookup: &TokenLookup) -> Result<Token, ApiError> {
        match lookup {
            TokenLookup::ById(id) => self.token(id),
            TokenLookup::ByAddress(address) => self
                .find_token_by_address(address)
                .ok_or_else(|| ApiError::not_found("Token not found")),
        }
    }

    pub fn update_token<F>(&mut self, id: &str, mutate: F) -> Result<Token, ApiError>
    where
        F: FnOnce(&mut Token),
    {
        let token = self
            .tokens
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("Token not found"))?;
        mutate(token);
        token.updated_at = Utc::now();
        Ok(token.clone())
    }

    pub fn delete_token(&mut self, id: &str) -> Result<(), ApiError> {
        self.tokens
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("Token not found"))
    }

    pub fn list_tokens(
        &self,
        filter: &TokenFilter,
        page: usize,
        limit: usize,
    ) -> (Vec<Token>, usize) {
        let matches: Vec<Token> = self
            .tokens
            .values()
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.creator.as_ref().is_none_or(|c| &t.creator == c))
            .filter(|t| {
                filter.search.as_ref().is_none_or(|q| {
                    contains_ci(&t.name, q)
                        || contains_ci(&t.symbol, q)
                        || contains_ci(&t.description, q)
                })
            })
            .cloned()
            .collect();
        paginate(matches, page, limit, |t| t.created_at)
    }

    pub fn tokens_by_creator(&self, creator: &str) -> Vec<Token> {
        let (tokens, _) = self.list_tokens(
            &TokenFilter {
                creator: Some(creator.to_string()),
                ..TokenFilter::default()
            },
            1,
            usize::MAX,
        );
        tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    // -------------------------------------------------------------------------
    // Transactions
    // -------------------------------------------------------------------------

    /// Append a ledger entry, enforcing a unique chain signature.
    pub fn insert_transaction(
        &mut self,
        record: TransactionRecord,
    ) -> Result<TransactionRecord, ApiError> {
        let duplicate = self
            .transactions
            .values()
            .any(|t| t.tx_signature == record.tx_signature);
        if duplicate {
            return Err(ApiError::bad_request(
                "A transaction with this signature already exists",
            ));
        }
        self.transactions.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    pub fn list_transactions(
        &self,
        sender: &str,
        filter: &TransactionFilter,
        page: usize,
        limit: usize,
    ) -> (Vec<TransactionRecord>, usize) {
        let matches: Vec<TransactionRecord> = self
            .transactions
            .values()
            .filter(|t| t.sender == sender)
            .filter(|t| filter.transaction_type.is_none_or(|ty| t.transaction_type == ty))
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        paginate(matches, page, limit, |t| t.created_at)
    }

    // -------------------------------------------------------------------------
    // System events
    // -------------------------------------------------------------------------

    pub fn record_event(&mut self, level: &str, message: impl Into<String>) {
        self.events.push(SystemEvent {
            timestamp: Utc::now(),
            level: level.to_string(),
            message: message.into(),
        });
        if self.events.len() > EVENT_LOG_CAPACITY {
            let excess = self.events.len() - EVENT_LOG_CAPACITY;
            self.events.drain(..excess);
        }
    }

    pub fn recent_events(&self, limit: usize) -> Vec<SystemEvent> {
        self.events.iter().rev().take(limit).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenMetadata;
    use axum::http::StatusCode;
    use uuid::Uuid;

    fn test_user(email: &str, username: &str) -> User {
        User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: Some("$argon2id$hash".into()),
            username: username.to_string(),
            wallet_address: None,
            bio: String::new(),
            github_id: None,
            github_username: None,
            github_access_token: None,
            verification_level: 1,
            tokens: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_token(address: &str, creator: &str) -> Token {
        Token {
            id: Uuid::new_v4().to_string(),
            name: "Launch Coin".into(),
            symbol: "LNCH".into(),
            token_address: address.to_string(),
            creator: creator.to_string(),
            creator_wallet: "4Nd1mY2f6vS9rP3qW8xT5uK7jL1hG2cD9eF6aB3mX8pZ".into(),
            description: "A launch token".into(),
            supply: 1_000_000_000,
            decimals: 9,
            status: TokenStatus::Pending,
            logo: None,
            website: None,
            twitter: None,
            discord: None,
            telegram: None,
            metadata: TokenMetadata::default(),
            trading_info: None,
            launch_date: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_transaction(sender: &str, signature: &str) -> TransactionRecord {
        TransactionRecord {
            id: Uuid::new_v4().to_string(),
            transaction_type: TransactionType::SolTransfer,
            sender: sender.to_string(),
            sender_wallet: "4Nd1mY2f6vS9rP3qW8xT5uK7jL1hG2cD9eF6aB3mX8pZ".into(),
            recipient: Some("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".into()),
            amount: Some(1.5),
            token_address: None,
            token_symbol: None,
            tx_signature: signature.to_string(),
            status: TransactionStatus::Confirmed,
            network: "devnet".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_email_rejected_and_first_user_untouched() {
        let mut store = Store::new();
        let first = store.insert_user(test_user("a@b.com", "alice")).unwrap();

        let err = store
            .insert_user(test_user("a@b.com", "alice2"))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let unchanged = store.user(&first.id).unwrap();
        assert_eq!(unchanged, first);
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn duplicate_username_rejected() {
        let mut store = Store::new();
        store.insert_user(test_user("a@b.com", "alice")).unwrap();
        let err = store.insert_user(test_user("c@d.com", "alice")).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn project_creator_must_exist() {
        let mut store = Store::new();
        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: "Demo".into(),
            description: "demo".into(),
            category: ProjectCategory::Web,
            creator: "ghost".into(),
            team_members: vec![],
            github_repo: None,
            tags: vec![],
            status: crate::models::ProjectStatus::Planning,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let err = store.insert_project(project).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn token_address_is_globally_unique() {
        let mut store = Store::new();
        let user = store.insert_user(test_user("a@b.com", "alice")).unwrap();
        let address = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

        store.insert_token(test_token(address, &user.id)).unwrap();
        let err = store.insert_token(test_token(address, &user.id)).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(store.token_count(), 1);
    }

    #[test]
    fn token_lookup_by_id_and_address() {
        let mut store = Store::new();
        let user = store.insert_user(test_user("a@b.com", "alice")).unwrap();
        let address = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";
        let token = store.insert_token(test_token(address, &user.id)).unwrap();

        let by_id = store
            .token_by_lookup(&TokenLookup::ById(token.id.clone()))
            .unwrap();
        assert_eq!(by_id.id, token.id);

        let by_addr = store
            .token_by_lookup(&TokenLookup::ByAddress(address.to_string()))
            .unwrap();
        assert_eq!(by_addr.id, token.id);

        let missing = store.token_by_lookup(&TokenLookup::ById("nope".into()));
        assert_eq!(missing.unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn token_search_matches_name_symbol_description() {
        let mut store = Store::new();
        let user = store.insert_user(test_user("a@b.com", "alice")).unwrap();

        let mut a = test_token("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU", &user.id);
        a.name = "Moon Rocket".into();
        a.symbol = "MOON".into();
        store.insert_token(a).unwrap();

        let mut b = test_token("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin", &user.id);
        b.name = "Solar Wind".into();
        b.symbol = "WIND".into();
        b.description = "moonshot energy".into();
        store.insert_token(b).unwrap();

        let (hits, total) = store.list_tokens(
            &TokenFilter {
                search: Some("moon".into()),
                ..TokenFilter::default()
            },
            1,
            10,
        );
        assert_eq!(total, 2);
        assert_eq!(hits.len(), 2);

        let (hits, total) = store.list_tokens(
            &TokenFilter {
                search: Some("rocket".into()),
                ..TokenFilter::default()
            },
            1,
            10,
        );
        assert_eq!(total, 1);
        assert_eq!(hits[0].symbol, "MOON");
    }

    #[test]
    fn duplicate_transaction_signature_rejected() {
        let mut store = Store::new();
        store
            .insert_transaction(test_transaction("u-1", "sig-abc"))
            .unwrap();
        let err = store
            .insert_transaction(test_transaction("u-1", "sig-abc"))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn distinct_signatures_create_distinct_rows() {
        let mut store = Store::new();
        store
            .insert_transaction(test_transaction("u-1", "sig-1"))
            .unwrap();
        store
            .insert_transaction(test_transaction("u-1", "sig-2"))
            .unwrap();

        let (rows, total) = store.list_transactions("u-1", &TransactionFilter::default(), 1, 10);
        assert_eq!(total, 2);
        assert_ne!(rows[0].tx_signature, rows[1].tx_signature);
    }

    #[test]
    fn transaction_filters_by_type_and_status() {
        let mut store = Store::new();
        let mut mint = test_transaction("u-1", "sig-mint");
        mint.transaction_type = TransactionType::TokenCreation;
        store.insert_transaction(mint).unwrap();
        store
            .insert_transaction(test_transaction("u-1", "sig-sol"))
            .unwrap();
        store
            .insert_transaction(test_transaction("u-2", "sig-other"))
            .unwrap();

        let (rows, total) = store.list_transactions(
            "u-1",
            &TransactionFilter {
                transaction_type: Some(TransactionType::TokenCreation),
                status: None,
            },
            1,
            10,
        );
        assert_eq!(total, 1);
        assert_eq!(rows[0].tx_signature, "sig-mint");
    }

    #[test]
    fn pagination_slices_and_reports_total() {
        let mut store = Store::new();
        for i in 0..25 {
            store
                .insert_user(test_user(&format!("user{i}@b.com"), &format!("user{i}")))
                .unwrap();
        }

        let (page1, total) = store.list_users(None, 1, 10);
        assert_eq!(total, 25);
        assert_eq!(page1.len(), 10);

        let (page3, _) = store.list_users(None, 3, 10);
        assert_eq!(page3.len(), 5);

        let (page4, _) = store.list_users(None, 4, 10);
        assert!(page4.is_empty());
    }

    #[test]
    fn event_log_is_capped() {
        let mut store = Store::new();
        for i in 0..(EVENT_LOG_CAPACITY + 50) {
            store.record_event("info", format!("event {i}"));
        }
        assert_eq!(store.recent_events(usize::MAX).len(), EVENT_LOG_CAPACITY);

        let recent = store.recent_events(1);
        assert!(recent[0].message.ends_with(&format!("{}", EVENT_LOG_CAPACITY + 49)));
    }
}
