//! Boundaries between the portal and the outside world.
//!
//! Two collaborators are abstracted here:
//! - the wallet provider, which holds user keys and authorizes the app
//! - the remote ledger, reached through a client handle built per call
//!
//! Implementations live in binding crates. Tests substitute fakes.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CoreResult;
use crate::model::{Board, Session, WalletAddress};

/// The kind a wallet provider reports for itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalletKind {
    /// Solana CLI style keypair file on disk.
    KeypairFile,
    Other(String),
}

impl WalletKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::KeypairFile => "keypair-file",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for `WalletProvider::connect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Only succeed if the app was authorized before. Must never prompt.
    pub only_if_trusted: bool,
}

impl ConnectOptions {
    pub fn trusted_only() -> Self {
        Self { only_if_trusted: true }
    }

    pub fn interactive() -> Self {
        Self { only_if_trusted: false }
    }
}

/// A wallet provider able to authorize the app.
///
/// Transaction signing is implicit: the ledger binding obtains signing
/// capability from the concrete provider it was built with.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn kind(&self) -> WalletKind;

    /// Ask the wallet to authorize `app`. Returns the wallet identity.
    async fn connect(&self, app: &str, opts: ConnectOptions) -> CoreResult<WalletAddress>;
}

/// A handle bound to the remote program, its shared board account and one
/// wallet session.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Read the shared account.
    ///
    /// Returns `CoreError::AccountNotFound` when the account does not exist.
    async fn fetch_board(&self) -> CoreResult<Board>;

    /// Create the shared account. Returns the transaction signature.
    async fn initialize(&self) -> CoreResult<String>;

    /// Append `link` tagged with the session identity. Returns the signature.
    async fn append_entry(&self, link: &str) -> CoreResult<String>;
}

/// Builds `LedgerClient` handles.
///
/// A new handle is built at every call site; callers must not cache or
/// compare handles.
pub trait ClientFactory: Send + Sync {
    fn build(&self, session: &Session) -> CoreResult<Box<dyn LedgerClient>>;
}
