//! memehub-core
//!
//! Core primitives for Meme Hub:
//! - board data model (entries, list state, session)
//! - wallet provider and remote ledger boundaries
//! - the portal controller implementing the connect/initialize/submit flow
//! - portal events and the refresh contract
//! - a UI-independent view model
//!
//! The core crate does not do network or filesystem I/O. Bindings such as
//! `memehub-solana-client` implement the boundary traits and are injected by
//! the caller.

pub mod boundary;
pub mod config;
pub mod errors;
pub mod events;
pub mod model;
pub mod portal;
pub mod view;

pub use crate::errors::{CoreError, CoreResult};

/// Names of the remote program's entry points.
/// These must match the deployed program.
pub mod entrypoints {
    pub const INITIALIZE: &str = "start_stuff_off";
    pub const APPEND_ENTRY: &str = "add_gif";
    pub const BOARD_ACCOUNT: &str = "BaseAccount";
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::boundary::{
        ClientFactory, ConnectOptions, LedgerClient, WalletKind, WalletProvider,
    };
    pub use crate::config::PortalConfig;
    pub use crate::events::{Action, PortalEvent, PortalObserver};
    pub use crate::model::{Board, Entry, ListState, Session, WalletAddress};
    pub use crate::portal::{DetectOutcome, Portal, PortalState};
    pub use crate::view::View;
    pub use crate::{CoreError, CoreResult};
}
