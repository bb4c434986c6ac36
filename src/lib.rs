// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! DevLaunch - Developer Launch Platform Backend
//!
//! HTTP backend for a developer platform combining user accounts, a project
//! showcase, and an SPL token launchpad on Solana.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - JWT authentication and admin authorization
//! - `solana` - Chain gateway (balances, minting, transfers)
//! - `github` - GitHub OAuth and REST client
//! - `trading` - Trading venue API client

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod rate_limit;
pub mod solana;
pub mod state;
pub mod store;
pub mod trading;
