// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Per-IP fixed-window rate limiting.
//!
//! Route groups carry different budgets: a loose general limit, a tighter
//! one for login/registration, a strict one for chain-mutating endpoints,
//! and a medium one for wallet reads. Counters reset when their window
//! elapses; state is in-process only.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    /// Keys the counter map; one budget per scope per IP.
    pub scope: &'static str,
    pub window: Duration,
    pub max_requests: u32,
}

pub const GENERAL: RateLimitPolicy = RateLimitPolicy {
    scope: "general",
    window: Duration::from_secs(15 * 60),
    max_requests: 100,
};

pub const AUTH: RateLimitPolicy = RateLimitPolicy {
    scope: "auth",
    window: Duration::from_secs(15 * 60),
    max_requests: 20,
};

pub const STRICT: RateLimitPolicy = RateLimitPolicy {
    scope: "strict",
    window: Duration::from_secs(60 * 60),
    max_requests: 10,
};

pub const WALLET: RateLimitPolicy = RateLimitPolicy {
    scope: "wallet",
    window: Duration::from_secs(5 * 60),
    max_requests: 30,
};

struct Window {
    started: Instant,
    count: u32,
}

#[derive(Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<(&'static str, IpAddr), Window>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request against the policy's window. Returns false once
    /// the budget for this scope and IP is exhausted.
    pub fn allow(&self, policy: &RateLimitPolicy, ip: IpAddr) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let window = windows
            .entry((policy.scope, ip))
            .or_insert(Window { started: now, count: 0 });

        if now.duration_since(window.started) >= policy.window {
            window.started = now;
            window.count = 0;
        }

        window.count += 1;
        window.count <= policy.max_requests
    }
}

async fn enforce(
    policy: &'static RateLimitPolicy,
    state: AppState,
    request: Request,
    next: Next,
) -> Response {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if state.limiter.allow(policy, ip) {
        next.run(request).await
    } else {
        tracing::warn!(scope = policy.scope, %ip, "rate limit exceeded");
        ApiError::new(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests from this IP, please try again later",
        )
        .into_response()
    }
}

pub async fn limit_general(State(state): State<AppState>, request: Request, next: Next) -> Response {
    enforce(&GENERAL, state, request, next).await
}

pub async fn limit_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    enforce(&AUTH, state, request, next).await
}

pub async fn limit_strict(State(state): State<AppState>, request: Request, next: Next) -> Response {
    enforce(&STRICT, state, request, next).await
}

pub async fn limit_wallet(State(state): State<AppState>, request: Request, next: Next) -> Response {
    enforce(&WALLET, state, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_POLICY: RateLimitPolicy = RateLimitPolicy {
        scope: "test",
        window: Duration::from_secs(60),
        max_requests: 3,
    };

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn budget_is_enforced_within_window() {
        let limiter = RateLimiter::new();
        for _ in 0..3 {
            assert!(limiter.allow(&TEST_POLICY, ip(1)));
        }
        assert!(!limiter.allow(&TEST_POLICY, ip(1)));
        assert!(!limiter.allow(&TEST_POLICY, ip(1)));
    }

    #[test]
    fn budgets_are_per_ip() {
        let limiter = RateLimiter::new();
        for _ in 0..3 {
            assert!(limiter.allow(&TEST_POLICY, ip(1)));
        }
        assert!(!limiter.allow(&TEST_POLICY, ip(1)));
        assert!(limiter.allow(&TEST_POLICY, ip(2)));
    }

    #[test]
    fn scopes_do_not_share_budgets() {
        let other = RateLimitPolicy {
            scope: "other",
            ..TEST_POLICY
        };
        let limiter = RateLimiter::new();
        for _ in 0..3 {
            assert!(limiter.allow(&TEST_POLICY, ip(1)));
        }
        assert!(!limiter.allow(&TEST_POLICY, ip(1)));
        assert!(limiter.allow(&other, ip(1)));
    }

    #[test]
    fn window_resets_after_elapsing() {
        let instant_policy = RateLimitPolicy {
            scope: "instant",
            window: Duration::from_secs(0),
            max_requests: 1,
        };
        let limiter = RateLimiter::new();
        // zero-length window resets on every call
        assert!(limiter.allow(&instant_policy, ip(1)));
        assert!(limiter.allow(&instant_policy, ip(1)));
    }
}
