// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Offline validation of chain-related inputs.
//!
//! These checks run before any RPC call. Address validation is a shape
//! check only (base58 alphabet, plausible length); it does not prove the
//! account exists on chain.

/// Whether a string is shaped like a Solana address: base58 alphabet,
/// 32 to 44 characters.
pub fn is_valid_address(address: &str) -> bool {
    let len = address.chars().count();
    if !(32..=44).contains(&len) {
        return false;
    }
    address.chars().all(is_base58_char)
}

fn is_base58_char(c: char) -> bool {
    // Bitcoin base58 alphabet: no 0, O, I, or l.
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

/// Token registration fields subject to validation.
#[derive(Debug, Default)]
pub struct TokenMetadataInput<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    pub token_address: &'a str,
    pub description: Option<&'a str>,
    pub supply: Option<i64>,
    pub decimals: Option<i64>,
    pub logo: Option<&'a str>,
    pub website: Option<&'a str>,
    pub twitter: Option<&'a str>,
    pub discord: Option<&'a str>,
}

/// Check token registration input against every rule, accumulating all
/// violations rather than stopping at the first.
pub fn validate_token_metadata(input: &TokenMetadataInput<'_>) -> Vec<String> {
    let mut errors = Vec::new();

    if input.name.trim().is_empty() {
        errors.push("Token name is required".to_string());
    }

    if input.symbol.trim().is_empty() {
        errors.push("Token symbol is required".to_string());
    } else if input.symbol.chars().count() > 10 {
        errors.push("Token symbol should be 10 characters or less".to_string());
    }

    if input.token_address.trim().is_empty() {
        errors.push("Token address is required".to_string());
    } else if !is_valid_address(input.token_address) {
        errors.push("Invalid Solana token address format".to_string());
    }

    if let Some(description) = input.description {
        if description.chars().count() > 1000 {
            errors.push("Description should be 1000 characters or less".to_string());
        }
    }

    if let Some(supply) = input.supply {
        if supply <= 0 {
            errors.push("Supply must be a positive number".to_string());
        }
    }

    if let Some(decimals) = input.decimals {
        if !(0..=18).contains(&decimals) {
            errors.push("Decimals must be between 0 and 18".to_string());
        }
    }

    for (value, label) in [
        (input.logo, "Logo"),
        (input.website, "Website"),
        (input.twitter, "Twitter"),
        (input.discord, "Discord"),
    ] {
        if let Some(url) = value {
            if !url.is_empty() && !looks_like_url(url) {
                errors.push(format!("{label} URL is invalid"));
            }
        }
    }

    errors
}

/// Permissive URL shape check: optional http(s) scheme, a dotted host, and
/// an optional path. Social handles without a domain fail.
fn looks_like_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .unwrap_or(value);

    let (host, path) = match rest.split_once('/') {
        Some((host, path)) => (host, Some(path)),
        None => (rest, None),
    };

    let host_ok = host.contains('.')
        && !host.starts_with('.')
        && !host.ends_with('.')
        && !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if !host_ok {
        return false;
    }

    let tld = host.rsplit('.').next().unwrap_or("");
    if !(2..=6).contains(&tld.len()) || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    match path {
        None => true,
        Some(p) => p
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '.' | '-' | ' ')),
    }
}
