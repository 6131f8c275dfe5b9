//! RPC-backed ledger client for the board program.
//!
//! `SolanaClientFactory` builds a fresh `BoardClient` (with its own RPC
//! connection) for every call site. The client signs with the wallet's key
//! pair and, for initialization only, with the board account key pair.

use std::sync::Arc;

use async_trait::async_trait;
use memehub_core::boundary::{ClientFactory, LedgerClient};
use memehub_core::model::{Board, Session};
use memehub_core::{CoreError, CoreResult};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::instruction::Instruction;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::Transaction;

use crate::config::{validate_config, ProgramConfig};
use crate::errors::{SolanaClientError, SolanaResult};
use crate::program::BoardProgram;
use crate::wallet::KeypairWallet;

pub struct SolanaClientFactory {
    config: ProgramConfig,
    wallet: Arc<KeypairWallet>,
}

impl SolanaClientFactory {
    pub fn new(config: ProgramConfig, wallet: Arc<KeypairWallet>) -> SolanaResult<Self> {
        validate_config(&config)?;
        Ok(Self { config, wallet })
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }
}

impl ClientFactory for SolanaClientFactory {
    fn build(&self, session: &Session) -> CoreResult<Box<dyn LedgerClient>> {
        let signer = self.wallet.signer();
        if signer.pubkey().to_string() != session.address.as_str() {
            return Err(CoreError::invalid_state(format!(
                "session {} does not belong to wallet {}",
                session.address,
                signer.pubkey()
            )));
        }
        Ok(Box::new(BoardClient::new(&self.config, signer)))
    }
}

pub struct BoardClient {
    program: BoardProgram,
    rpc: RpcClient,
    user: Arc<Keypair>,
    board_keypair: Arc<Keypair>,
}

impl BoardClient {
    pub fn new(config: &ProgramConfig, user: Arc<Keypair>) -> Self {
        Self {
            program: config.program(),
            rpc: RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment.to_config()),
            user,
            board_keypair: config.board_keypair.clone(),
        }
    }

    pub fn program(&self) -> &BoardProgram {
        &self.program
    }

    /// Read and decode the shared board account.
    pub async fn read_board(&self) -> SolanaResult<Board> {
        let account = self
            .rpc
            .get_account_with_commitment(&self.program.board, self.rpc.commitment())
            .await?
            .value
            .ok_or_else(|| SolanaClientError::AccountNotFound {
                account: self.program.board.to_string(),
            })?;
        self.program.decode_board(&account.owner, &account.data)
    }

    /// Sign with the user as fee payer plus `extra` signers, send and confirm.
    async fn send(&self, ixs: &[Instruction], extra: &[&Keypair]) -> SolanaResult<String> {
        let mut signers: Vec<&Keypair> = vec![self.user.as_ref()];
        signers.extend_from_slice(extra);

        let blockhash = self.rpc.get_latest_blockhash().await?;
        let tx = Transaction::new_signed_with_payer(ixs, Some(&self.user.pubkey()), &signers[..], blockhash);
        let sig = self.rpc.send_and_confirm_transaction(&tx).await?;
        Ok(sig.to_string())
    }
}

#[async_trait]
impl LedgerClient for BoardClient {
    async fn fetch_board(&self) -> CoreResult<Board> {
        Ok(self.read_board().await?)
    }

    async fn initialize(&self) -> CoreResult<String> {
        let ix = self.program.ix_initialize(self.user.pubkey());
        let sig = self.send(&[ix], &[self.board_keypair.as_ref()]).await?;
        tracing::info!(board = %self.program.board, %sig, "board account created");
        Ok(sig)
    }

    async fn append_entry(&self, link: &str) -> CoreResult<String> {
        let ix = self.program.ix_append(self.user.pubkey(), link)?;
        let sig = self.send(&[ix], &[]).await?;
        Ok(sig)
    }
}

/// Version string of the node behind `rpc_url`.
pub async fn node_version(rpc_url: &str) -> SolanaResult<String> {
    let rpc = RpcClient::new(rpc_url.to_string());
    let v = rpc.get_version().await?;
    Ok(v.solana_core)
}

#[cfg(test)]
mod tests {
    use super::*;

    use memehub_core::model::WalletAddress;
    use solana_program::pubkey::Pubkey;

    use crate::wallet::TrustStore;

    fn factory() -> SolanaClientFactory {
        let wallet = KeypairWallet::new(
            Keypair::new(),
            TrustStore::new("unused.json"),
            Box::new(|_: &str, _: &Pubkey| false),
        );
        let cfg = ProgramConfig::devnet(Pubkey::new_unique(), Keypair::new());
        SolanaClientFactory::new(cfg, Arc::new(wallet)).unwrap()
    }

    #[test]
    fn build_rejects_foreign_session() {
        let f = factory();
        let session = Session {
            address: WalletAddress::new(Pubkey::new_unique().to_string()).unwrap(),
            restored: false,
        };
        assert!(matches!(f.build(&session), Err(CoreError::InvalidState(_))));
    }

    #[test]
    fn build_binds_configured_program() {
        let f = factory();
        let session = Session {
            address: WalletAddress::new(f.wallet.pubkey().to_string()).unwrap(),
            restored: true,
        };
        assert!(f.build(&session).is_ok());

        let client = BoardClient::new(f.config(), f.wallet.signer());
        assert_eq!(client.program().program_id, f.config().program_id);
        assert_eq!(client.program().board, f.config().board_address());
    }
}
