//! Explicit configuration of the board program binding.
//!
//! Nothing here is a process-wide constant: the endpoint, commitment,
//! program id and board key pair are all supplied by the caller.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::{Keypair, Signer};

use crate::constants::DEVNET_URL;
use crate::errors::{SolanaClientError, SolanaResult};
use crate::program::BoardProgram;

/// Confirmation depth for reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commitment {
    #[default]
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn parse(s: &str) -> SolanaResult<Self> {
        match s {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            _ => Err(SolanaClientError::InvalidConfig(format!(
                "unsupported commitment: {s}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }

    pub fn to_config(self) -> CommitmentConfig {
        match self {
            Self::Processed => CommitmentConfig::processed(),
            Self::Confirmed => CommitmentConfig::confirmed(),
            Self::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Everything needed to reach the board program.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    pub rpc_url: String,
    pub commitment: Commitment,
    pub program_id: Pubkey,
    /// Key pair of the shared board account. Signs the one-time initialization.
    pub board_keypair: Arc<Keypair>,
}

impl ProgramConfig {
    /// Devnet endpoint and `processed` commitment.
    pub fn devnet(program_id: Pubkey, board_keypair: Keypair) -> Self {
        Self {
            rpc_url: DEVNET_URL.to_string(),
            commitment: Commitment::default(),
            program_id,
            board_keypair: Arc::new(board_keypair),
        }
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn board_address(&self) -> Pubkey {
        self.board_keypair.pubkey()
    }

    pub fn program(&self) -> BoardProgram {
        BoardProgram::new(self.program_id, self.board_address())
    }
}

/// Parse a program id given as base58.
pub fn parse_program_id(s: &str) -> SolanaResult<Pubkey> {
    s.trim()
        .parse()
        .map_err(|_| SolanaClientError::InvalidConfig(format!("invalid program id: {s}")))
}

/// Extract the program id from an Anchor IDL.
///
/// Older IDLs carry it in `metadata.address`, newer ones at the top level.
pub fn program_id_from_idl(idl: &Value) -> SolanaResult<Pubkey> {
    let addr = idl
        .pointer("/metadata/address")
        .or_else(|| idl.get("address"))
        .and_then(Value::as_str)
        .ok_or_else(|| SolanaClientError::InvalidConfig("idl has no program address".to_string()))?;
    parse_program_id(addr)
}

pub fn read_program_id_from_idl<P: AsRef<Path>>(path: P) -> SolanaResult<Pubkey> {
    let raw = fs::read_to_string(path.as_ref())?;
    let v: Value = serde_json::from_str(&raw)?;
    program_id_from_idl(&v)
}

/// Validate a configuration object.
pub fn validate_config(cfg: &ProgramConfig) -> SolanaResult<()> {
    let url = cfg.rpc_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(SolanaClientError::InvalidConfig(format!(
            "rpc url must be http(s): {url}"
        )));
    }

    if cfg.program_id == Pubkey::default() {
        return Err(SolanaClientError::InvalidConfig(
            "program id must not be the default pubkey".to_string(),
        ));
    }

    if cfg.board_address() == cfg.program_id {
        return Err(SolanaClientError::InvalidConfig(
            "board account must differ from the program id".to_string(),
        ));
    }

    Ok(())
}
