//! memehub-solana-client
//!
//! Solana bindings for the Meme Hub portal.
//!
//! It includes:
//! - Anchor-compatible instruction and account encoding for the board program
//! - keypair file loading (Solana CLI, web3.js export and base58 formats)
//! - a keypair-file wallet provider with a persistent trust list
//! - a client factory and RPC-backed ledger client
//!
//! The board program id is expected to be provided by the consumer, either
//! directly or through the program's IDL.

pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod keypair;
pub mod program;
pub mod wallet;

pub use client::{BoardClient, SolanaClientFactory};
pub use config::{Commitment, ProgramConfig};
pub use errors::{SolanaClientError, SolanaResult};
pub use program::BoardProgram;
pub use wallet::{Approver, KeypairWallet, TrustStore};
