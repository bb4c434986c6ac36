// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Solana chain access.
//!
//! [`validator`] holds the offline input checks (address shape, token
//! metadata rules); [`gateway`] owns the RPC client and the operator wallet
//! and builds, signs, and submits transactions.

pub mod gateway;
pub mod validator;

pub use gateway::{ChainError, ChainGateway, MintOutcome, OnChainTokenInfo};
