//! Board data model.
//!
//! These are plain data types. The remote program owns the board; the portal
//! only mirrors the last fetched snapshot and never reorders, deduplicates or
//! edits entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};

/// A wallet public identity in its display form (base58 for Solana).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn new(s: impl Into<String>) -> CoreResult<Self> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_state("wallet address must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authorized wallet session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub address: WalletAddress,
    /// True if the session was restored silently from a prior authorization.
    pub restored: bool,
}

/// One submitted link and the identity that submitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub link: String,
    pub submitter: WalletAddress,
}

/// Snapshot of the shared board account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Counter maintained by the remote program.
    pub total: u64,
    /// Entries in remote insertion order.
    pub entries: Vec<Entry>,
}

impl Board {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Local mirror of the board.
///
/// `Absent` means the last fetch failed (typically because the account was
/// never created). It is distinct from `Present` with an empty board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "board", rename_all = "snake_case")]
pub enum ListState {
    #[default]
    Unknown,
    Absent,
    Present(Board),
}

impl ListState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Absent => "absent",
            Self::Present(_) => "present",
        }
    }

    pub fn board(&self) -> Option<&Board> {
        match self {
            Self::Present(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}
