//! Wiring of a portal from command line arguments.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use memehub_core::boundary::{ClientFactory, LedgerClient, WalletProvider};
use memehub_core::config::PortalConfig;
use memehub_core::events::TracingObserver;
use memehub_core::model::Session;
use memehub_core::portal::Portal;
use memehub_core::{CoreError, CoreResult};
use memehub_solana_client::config::{parse_program_id, read_program_id_from_idl};
use memehub_solana_client::keypair::read_keypair;
use memehub_solana_client::wallet::{default_trust_path, default_wallet_path};
use memehub_solana_client::{Approver, Commitment, KeypairWallet, ProgramConfig, SolanaClientFactory, TrustStore};
use solana_sdk::pubkey::Pubkey;

use crate::args::Cli;
use crate::output;

pub fn wallet_path(cli: &Cli) -> Option<PathBuf> {
    cli.wallet.as_ref().map(PathBuf::from).or_else(default_wallet_path)
}

pub fn trust_store(cli: &Cli) -> Result<TrustStore> {
    let path = cli
        .trust_store
        .as_ref()
        .map(PathBuf::from)
        .or_else(default_trust_path)
        .ok_or_else(|| anyhow!("cannot determine trust store location; pass --trust-store"))?;
    Ok(TrustStore::new(path))
}

/// Open the wallet. `None` means no wallet is installed.
pub fn open_wallet(cli: &Cli, approver: Box<dyn Approver>) -> Result<Option<Arc<KeypairWallet>>> {
    let Some(path) = wallet_path(cli) else {
        return Ok(None);
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no wallet file");
        return Ok(None);
    }
    match KeypairWallet::open(&path, trust_store(cli)?, approver) {
        Ok(w) => Ok(Some(Arc::new(w))),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "wallet file unreadable");
            Ok(None)
        }
    }
}

pub fn program_id(cli: &Cli) -> Result<Pubkey> {
    if let Some(id) = &cli.program_id {
        return Ok(parse_program_id(id)?);
    }
    read_program_id_from_idl(&cli.idl).with_context(|| {
        format!(
            "board program id not found: pass --program-id or provide an IDL at {}",
            cli.idl
        )
    })
}

pub fn program_config(cli: &Cli) -> Result<ProgramConfig> {
    let program_id = program_id(cli)?;
    let board = read_keypair(&cli.board_keypair)
        .with_context(|| format!("reading board key pair {}", cli.board_keypair))?;
    let commitment = Commitment::parse(&cli.commitment)?;

    Ok(ProgramConfig::devnet(program_id, board)
        .with_rpc_url(cli.rpc_url.clone())
        .with_commitment(commitment))
}

/// Factory used when no ledger client can be built: no wallet is installed or
/// the board program is not configured. Detection and the connect flow still
/// work; fetching reports the reason.
struct Unavailable(CoreError);

impl ClientFactory for Unavailable {
    fn build(&self, _session: &Session) -> CoreResult<Box<dyn LedgerClient>> {
        Err(self.0.clone())
    }
}

fn ledger_factory(cli: &Cli, wallet: Arc<KeypairWallet>) -> Result<SolanaClientFactory> {
    let program = program_config(cli)?;
    Ok(SolanaClientFactory::new(program, wallet)?)
}

/// Build the portal for one CLI invocation.
///
/// A missing program configuration does not prevent session detection; it
/// surfaces as a notice and as the error of any ledger action.
pub fn portal(cli: &Cli, auto_approve: bool) -> Result<Portal> {
    let wallet = open_wallet(cli, approver(auto_approve))?;

    let factory: Arc<dyn ClientFactory> = match &wallet {
        None => Arc::new(Unavailable(CoreError::ProviderMissing)),
        Some(w) => match ledger_factory(cli, w.clone()) {
            Ok(f) => Arc::new(f),
            Err(e) => {
                let reason = format!("{e:#}");
                tracing::warn!(error = %reason, "board program not configured");
                output::notice(&format!("board program not configured: {reason}"));
                Arc::new(Unavailable(CoreError::invalid_config(reason)))
            }
        },
    };
    let provider = wallet.map(|w| w as Arc<dyn WalletProvider>);

    let portal = Portal::new(PortalConfig::default(), provider, factory)?
        .with_observer(Arc::new(TracingObserver));
    Ok(portal)
}

fn approver(auto: bool) -> Box<dyn Approver> {
    if auto {
        Box::new(|_: &str, _: &Pubkey| true)
    } else {
        Box::new(prompt_approval)
    }
}

fn prompt_approval(app: &str, wallet: &Pubkey) -> bool {
    output::eprintln_line(&format!("Allow {app} to connect to wallet {wallet}? [y/N]"));
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use memehub_core::model::ListState;
    use memehub_core::portal::DetectOutcome;
    use memehub_core::view::View;
    use solana_sdk::signature::{Keypair, Signer};

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["memehub"];
        full.extend_from_slice(args);
        full.push("view");
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn missing_wallet_file_means_no_provider() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = dir.path().join("id.json");
        let trust = dir.path().join("trust.json");
        let c = cli(&[
            "--wallet",
            wallet.to_str().unwrap(),
            "--trust-store",
            trust.to_str().unwrap(),
        ]);
        assert!(open_wallet(&c, approver(true)).unwrap().is_none());
    }

    #[test]
    fn wallet_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let kp = Keypair::new();
        let wallet = dir.path().join("id.json");
        std::fs::write(&wallet, serde_json::to_string(&kp.to_bytes().to_vec()).unwrap()).unwrap();
        let trust = dir.path().join("trust.json");
        let c = cli(&[
            "--wallet",
            wallet.to_str().unwrap(),
            "--trust-store",
            trust.to_str().unwrap(),
        ]);
        let w = open_wallet(&c, approver(true)).unwrap().unwrap();
        assert_eq!(w.pubkey(), kp.pubkey());
    }

    #[tokio::test]
    async fn unconfigured_program_still_detects_and_connects() {
        let dir = tempfile::tempdir().unwrap();
        let kp = Keypair::new();
        let wallet = dir.path().join("id.json");
        std::fs::write(&wallet, serde_json::to_string(&kp.to_bytes().to_vec()).unwrap()).unwrap();
        let trust = dir.path().join("trust.json");
        let idl = dir.path().join("idl.json");
        let board = dir.path().join("keypair.json");
        let c = cli(&[
            "--wallet",
            wallet.to_str().unwrap(),
            "--trust-store",
            trust.to_str().unwrap(),
            "--idl",
            idl.to_str().unwrap(),
            "--board-keypair",
            board.to_str().unwrap(),
        ]);

        let p = portal(&c, true).unwrap();
        assert_eq!(p.detect_session().await, DetectOutcome::NotTrusted);
        let address = p.connect().await.unwrap();
        assert_eq!(address.as_str(), kp.pubkey().to_string());
        assert_eq!(p.list(), ListState::Absent);
        assert!(matches!(p.initialize().await, Err(CoreError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn missing_wallet_shows_connect_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let c = cli(&[
            "--wallet",
            dir.path().join("id.json").to_str().unwrap(),
            "--idl",
            dir.path().join("idl.json").to_str().unwrap(),
        ]);
        let p = portal(&c, false).unwrap();
        assert_eq!(p.detect_session().await, DetectOutcome::ProviderMissing);
        assert_eq!(p.view(), View::ConnectPrompt);
    }

    #[test]
    fn program_id_flag_beats_idl() {
        let id = Pubkey::new_unique();
        let c = cli(&["--program-id", &id.to_string(), "--idl", "/nonexistent/idl.json"]);
        assert_eq!(program_id(&c).unwrap(), id);

        let c = cli(&["--idl", "/nonexistent/idl.json"]);
        assert!(program_id(&c).is_err());
    }
}
