// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Solana RPC gateway.
//!
//! Owns the RPC connection and the platform operator wallet. All
//! chain-mutating operations are paid for and signed by the operator;
//! read operations degrade to zero on RPC failure so wallet pages stay up
//! when the chain is unreachable.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    native_token::{lamports_to_sol, sol_to_lamports},
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::Transaction,
};
use spl_associated_token_account::{
    get_associated_token_address,
    instruction::{create_associated_token_account, create_associated_token_account_idempotent},
};
use spl_token::state::Mint;
use thiserror::Error;

use crate::error::ApiError;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Invalid Solana address: {0}")]
    InvalidAddress(String),
    #[error("Operator wallet is not available")]
    OperatorUnavailable,
    #[error("Solana RPC request failed: {0}")]
    Rpc(String),
    #[error("Failed to build transaction: {0}")]
    Instruction(String),
}

impl From<ChainError> for ApiError {
    fn from(err: ChainError) -> Self {
        match &err {
            ChainError::InvalidAddress(_) => ApiError::bad_request(err.to_string()),
            _ => ApiError::internal(err.to_string()),
        }
    }
}

/// Result of minting a new SPL token.
#[derive(Debug, Clone)]
pub struct MintOutcome {
    /// Base58 mint address of the new token.
    pub token_address: String,
    /// Operator's associated token account holding the initial supply.
    pub holding_account: String,
    pub signature: String,
}

/// On-chain state of a token mint.
#[derive(Debug, Clone)]
pub struct OnChainTokenInfo {
    pub address: String,
    /// Raw supply in base units.
    pub supply: u64,
    pub decimals: u8,
    pub mint_authority: Option<String>,
    pub is_initialized: bool,
}

pub struct ChainGateway {
    rpc: RpcClient,
    operator: Option<Keypair>,
    pub network: String,
}

/// Scale a display amount into base units for the given decimals.
pub fn to_base_units(amount: f64, decimals: u8) -> u64 {
    (amount * 10f64.powi(decimals as i32)).round() as u64
}

fn rpc_err(err: impl std::fmt::Display) -> ChainError {
    ChainError::Rpc(err.to_string())
}

fn ix_err(err: impl std::fmt::Display) -> ChainError {
    ChainError::Instruction(err.to_string())
}

impl ChainGateway {
    /// Connect to an RPC endpoint, optionally loading the operator wallet
    /// from a base58-encoded secret key.
    pub fn new(
        rpc_url: &str,
        operator_key: Option<&str>,
        network: &str,
    ) -> Result<Self, ChainError> {
        let operator = match operator_key {
            Some(key) => Some(parse_keypair(key)?),
            None => {
                tracing::warn!("operator wallet key not set, chain writes are disabled");
                None
            }
        };
        Ok(Self {
            rpc: RpcClient::new_with_commitment(
                rpc_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
            operator,
            network: network.to_string(),
        })
    }

    fn operator(&self) -> Result<&Keypair, ChainError> {
        self.operator.as_ref().ok_or(ChainError::OperatorUnavailable)
    }

    /// Base58 address of the operator wallet, if configured.
    pub fn operator_address(&self) -> Option<String> {
        self.operator.as_ref().map(|kp| kp.pubkey().to_string())
    }

    /// SOL balance of a wallet. Returns 0 if the RPC call fails.
    pub async fn sol_balance(&self, address: &str) -> Result<f64, ChainError> {
        let pubkey = parse_pubkey(address)?;
        match self.rpc.get_balance(&pubkey).await {
            Ok(lamports) => Ok(lamports_to_sol(lamports)),
            Err(err) => {
                tracing::error!(address, %err, "failed to fetch SOL balance");
                Ok(0.0)
            }
        }
    }

    /// Token balance of a wallet for one mint, in display units. Returns 0
    /// when the wallet has no token account or the RPC call fails.
    pub async fn token_balance(&self, wallet: &str, mint: &str) -> Result<f64, ChainError> {
        let wallet = parse_pubkey(wallet)?;
        let mint = parse_pubkey(mint)?;
        let token_account = get_associated_token_address(&wallet, &mint);
        match self.rpc.get_token_account_balance(&token_account).await {
            Ok(balance) => Ok(balance.ui_amount.unwrap_or(0.0)),
            Err(err) => {
                tracing::debug!(%token_account, %err, "no token balance available");
                Ok(0.0)
            }
        }
    }

    /// Mint a new SPL token: create the mint account, initialize it with the
    /// operator as mint authority, open the operator's holding account, and
    /// mint the full initial supply into it. One signed transaction.
    pub async fn create_mint(&self, decimals: u8, supply: u64) -> Result<MintOutcome, ChainError> {
        let operator = self.operator()?;
        let mint = Keypair::new();

        let scale = 10u64
            .checked_pow(decimals as u32)
            .ok_or_else(|| ix_err("too many decimals"))?;
        let base_supply = supply
            .checked_mul(scale)
            .ok_or_else(|| ix_err("initial supply overflows base units"))?;

        let rent = self
            .rpc
            .get_minimum_balance_for_rent_exemption(Mint::LEN)
            .await
            .map_err(rpc_err)?;

        let holding_account = get_associated_token_address(&operator.pubkey(), &mint.pubkey());

        let instructions = vec![
            system_instruction::create_account(
                &operator.pubkey(),
                &mint.pubkey(),
                rent,
                Mint::LEN as u64,
                &spl_token::id(),
            ),
            spl_token::instruction::initialize_mint(
                &spl_token::id(),
                &mint.pubkey(),
                &operator.pubkey(),
                Some(&operator.pubkey()),
                decimals,
            )
            .map_err(ix_err)?,
            create_associated_token_account(
                &operator.pubkey(),
                &operator.pubkey(),
                &mint.pubkey(),
                &spl_token::id(),
            ),
            spl_token::instruction::mint_to(
                &spl_token::id(),
                &mint.pubkey(),
                &holding_account,
                &operator.pubkey(),
                &[],
                base_supply,
            )
            .map_err(ix_err)?,
        ];

        let blockhash = self.rpc.get_latest_blockhash().await.map_err(rpc_err)?;
        let transaction = Transaction::new_signed_with_payer(
            &instructions,
            Some(&operator.pubkey()),
            &[operator, &mint],
            blockhash,
        );

        let signature = self
            .rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(rpc_err)?;

        tracing::info!(mint = %mint.pubkey(), %signature, "minted new token");

        Ok(MintOutcome {
            token_address: mint.pubkey().to_string(),
            holding_account: holding_account.to_string(),
            signature: signature.to_string(),
        })
    }

    /// Transfer SOL from the operator wallet. Returns the confirmed
    /// transaction signature.
    pub async fn transfer_sol(&self, recipient: &str, amount: f64) -> Result<String, ChainError> {
        let operator = self.operator()?;
        let recipient = parse_pubkey(recipient)?;

        let instruction = system_instruction::transfer(
            &operator.pubkey(),
            &recipient,
            sol_to_lamports(amount),
        );

        let blockhash = self.rpc.get_latest_blockhash().await.map_err(rpc_err)?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&operator.pubkey()),
            &[operator],
            blockhash,
        );

        let signature = self
            .rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(rpc_err)?;
        Ok(signature.to_string())
    }

    /// Transfer SPL tokens from the operator's holding account to a
    /// recipient wallet, creating the recipient's token account when needed.
    pub async fn transfer_token(
        &self,
        mint: &str,
        recipient: &str,
        amount: f64,
        decimals: u8,
    ) -> Result<String, ChainError> {
        let operator = self.operator()?;
        let mint = parse_pubkey(mint)?;
        let recipient = parse_pubkey(recipient)?;

        let source = get_associated_token_address(&operator.pubkey(), &mint);
        let destination = get_associated_token_address(&recipient, &mint);

        let instructions = vec![
            create_associated_token_account_idempotent(
                &operator.pubkey(),
                &recipient,
                &mint,
                &spl_token::id(),
            ),
            spl_token::instruction::transfer(
                &spl_token::id(),
                &source,
                &destination,
                &operator.pubkey(),
                &[],
                to_base_units(amount, decimals),
            )
            .map_err(ix_err)?,
        ];

        let blockhash = self.rpc.get_latest_blockhash().await.map_err(rpc_err)?;
        let transaction = Transaction::new_signed_with_payer(
            &instructions,
            Some(&operator.pubkey()),
            &[operator],
            blockhash,
        );

        let signature = self
            .rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(rpc_err)?;
        Ok(signature.to_string())
    }

    /// Fetch and unpack a token mint account.
    pub async fn token_info(&self, mint: &str) -> Result<OnChainTokenInfo, ChainError> {
        let pubkey = parse_pubkey(mint)?;
        let data = self.rpc.get_account_data(&pubkey).await.map_err(rpc_err)?;
        let state = Mint::unpack(&data).map_err(ix_err)?;

        Ok(OnChainTokenInfo {
            address: mint.to_string(),
            supply: state.supply,
            decimals: state.decimals,
            mint_authority: Option::<Pubkey>::from(state.mint_authority)
                .map(|a| a.to_string()),
            is_initialized: state.is_initialized,
        })
    }
}

fn parse_pubkey(address: &str) -> Result<Pubkey, ChainError> {
    address
        .parse::<Pubkey>()
        .map_err(|_| ChainError::InvalidAddress(address.to_string()))
}

fn parse_keypair(base58_secret: &str) -> Result<Keypair, ChainError> {
    let bytes = bs58::decode(base58_secret)
        .into_vec()
        .map_err(|_| ChainError::Instruction("operator key is not valid base58".into()))?;
    Keypair::from_bytes(&bytes)
        .map_err(|_| ChainError::Instruction("operator key is not a valid keypair".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_unit_scaling() {
        assert_eq!(to_base_units(1.0, 9), 1_000_000_000);
        assert_eq!(to_base_units(0.5, 9), 500_000_000);
        assert_eq!(to_base_units(2.5, 0), 3); // rounds half up
        assert_eq!(to_base_units(1.5, 2), 150);
        assert_eq!(to_base_units(0.0, 9), 0);
    }

    #[test]
    fn keypair_round_trips_through_base58() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();
        let parsed = parse_keypair(&encoded).unwrap();
        assert_eq!(parsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn bad_keypair_material_is_rejected() {
        assert!(parse_keypair("not base58 !!!").is_err());
        assert!(parse_keypair("abc").is_err());
    }

    #[test]
    fn pubkey_parsing_flags_invalid_addresses() {
        assert!(parse_pubkey("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU").is_ok());
        let err = parse_pubkey("nope").unwrap_err();
        assert!(matches!(err, ChainError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn writes_fail_without_operator() {
        let gateway =
            ChainGateway::new("http://localhost:8899", None, "devnet").unwrap();
        assert!(gateway.operator_address().is_none());

        let err = gateway
            .transfer_sol("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU", 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::OperatorUnavailable));

        let err = gateway.create_mint(9, 1_000_000).await.unwrap_err();
        assert!(matches!(err, ChainError::OperatorUnavailable));
    }
}
