//! Keypair-file wallet provider.
//!
//! `KeypairWallet` plays the role of a wallet extension for local use: it
//! holds the user's key pair, remembers which apps the user trusted, and asks
//! an `Approver` before trusting a new app. Trusted-only connects never call
//! the approver.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use memehub_core::boundary::{ConnectOptions, WalletKind, WalletProvider};
use memehub_core::model::WalletAddress;
use memehub_core::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

use crate::errors::SolanaResult;
use crate::keypair::read_keypair;

/// Default wallet path of the Solana CLI.
pub fn default_wallet_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("solana").join("id.json"))
}

/// Default location of the trust list.
pub fn default_trust_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("memehub").join("trusted_apps.json"))
}

/// Decides whether the user authorizes an app. May prompt.
pub trait Approver: Send + Sync {
    fn approve(&self, app: &str, wallet: &Pubkey) -> bool;
}

impl<F> Approver for F
where
    F: Fn(&str, &Pubkey) -> bool + Send + Sync,
{
    fn approve(&self, app: &str, wallet: &Pubkey) -> bool {
        self(app, wallet)
    }
}

/// Apps trusted per wallet, keyed by the wallet's base58 address.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TrustFile {
    #[serde(default)]
    wallets: BTreeMap<String, BTreeSet<String>>,
}

/// Persistent record of which apps each wallet trusts.
#[derive(Debug, Clone)]
pub struct TrustStore {
    path: PathBuf,
}

impl TrustStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> SolanaResult<TrustFile> {
        if !self.path.exists() {
            return Ok(TrustFile::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, file: &TrustFile) -> SolanaResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(file)?)?;
        Ok(())
    }

    pub fn is_trusted(&self, app: &str, wallet: &Pubkey) -> SolanaResult<bool> {
        Ok(self
            .load()?
            .wallets
            .get(&wallet.to_string())
            .is_some_and(|apps| apps.contains(app)))
    }

    pub fn trust(&self, app: &str, wallet: &Pubkey) -> SolanaResult<()> {
        let mut file = self.load()?;
        let added = file
            .wallets
            .entry(wallet.to_string())
            .or_default()
            .insert(app.to_string());
        if added {
            self.save(&file)?;
        }
        Ok(())
    }

    /// Forget that `wallet` trusts `app`. Returns whether an entry was removed.
    pub fn revoke(&self, app: &str, wallet: &Pubkey) -> SolanaResult<bool> {
        let mut file = self.load()?;
        let key = wallet.to_string();
        let Some(apps) = file.wallets.get_mut(&key) else {
            return Ok(false);
        };
        let removed = apps.remove(app);
        if apps.is_empty() {
            file.wallets.remove(&key);
        }
        if removed {
            self.save(&file)?;
        }
        Ok(removed)
    }
}

pub struct KeypairWallet {
    keypair: Arc<Keypair>,
    trust: TrustStore,
    approver: Arc<dyn Approver>,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair, trust: TrustStore, approver: Box<dyn Approver>) -> Self {
        Self {
            keypair: Arc::new(keypair),
            trust,
            approver: Arc::from(approver),
        }
    }

    /// Load the wallet key pair from `path`.
    pub fn open<P: AsRef<Path>>(path: P, trust: TrustStore, approver: Box<dyn Approver>) -> SolanaResult<Self> {
        let keypair = read_keypair(path)?;
        Ok(Self::new(keypair, trust, approver))
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Signing key, shared with ledger clients built for this wallet.
    pub fn signer(&self) -> Arc<Keypair> {
        self.keypair.clone()
    }

    pub fn trust_store(&self) -> &TrustStore {
        &self.trust
    }

    fn address(&self) -> CoreResult<WalletAddress> {
        WalletAddress::new(self.pubkey().to_string())
    }
}

#[async_trait]
impl WalletProvider for KeypairWallet {
    fn kind(&self) -> WalletKind {
        WalletKind::KeypairFile
    }

    async fn connect(&self, app: &str, opts: ConnectOptions) -> CoreResult<WalletAddress> {
        let wallet = self.pubkey();
        if self.trust.is_trusted(app, &wallet).map_err(CoreError::from)? {
            return self.address();
        }
        if opts.only_if_trusted {
            return Err(CoreError::NotTrusted);
        }

        // The approver may block on user input.
        let approver = self.approver.clone();
        let name = app.to_string();
        let approved = tokio::task::spawn_blocking(move || approver.approve(&name, &wallet))
            .await
            .map_err(|e| CoreError::remote(format!("approval prompt failed: {e}")))?;
        if !approved {
            tracing::info!(app, "user rejected the connection request");
            return Err(CoreError::AuthorizationDenied);
        }
        self.trust.trust(app, &wallet).map_err(CoreError::from)?;
        tracing::debug!(app, path = %self.trust.path().display(), "app trusted");
        self.address()
    }
}
