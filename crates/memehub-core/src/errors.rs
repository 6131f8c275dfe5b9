//! Error taxonomy for Meme Hub.
//!
//! Errors fall into four groups:
//! - wallet: the provider is missing, of the wrong kind, or refused to connect
//! - portal: the requested action is not valid in the current state
//! - remote: RPC, transaction or program failures reported by a binding
//! - configuration: invalid explicit configuration
//!
//! `AccountNotFound` is a legitimate board state rather than a fault; the
//! portal translates it into `ListState::Absent`.

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("wallet provider not found")]
    ProviderMissing,

    #[error("unexpected wallet provider: expected {expected}, found {found}")]
    UnexpectedProvider { expected: String, found: String },

    #[error("app is not trusted by the wallet")]
    NotTrusted,

    #[error("wallet authorization denied")]
    AuthorizationDenied,

    #[error("wallet is not connected")]
    NotConnected,

    #[error("no link given")]
    EmptyDraft,

    #[error("link is {len} bytes, limit is {max}")]
    LinkTooLong { len: usize, max: usize },

    #[error("another {0} is in progress")]
    Busy(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("board account not found: {0}")]
    AccountNotFound(String),

    #[error("remote call failed: {0}")]
    Remote(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Stable machine-readable code, used by the CLI's JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProviderMissing => "provider_missing",
            Self::UnexpectedProvider { .. } => "unexpected_provider",
            Self::NotTrusted => "not_trusted",
            Self::AuthorizationDenied => "authorization_denied",
            Self::NotConnected => "not_connected",
            Self::EmptyDraft => "empty_draft",
            Self::LinkTooLong { .. } => "link_too_long",
            Self::Busy(_) => "busy",
            Self::InvalidState(_) => "invalid_state",
            Self::AccountNotFound(_) => "account_not_found",
            Self::Remote(_) => "remote",
            Self::Decode(_) => "decode",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}
