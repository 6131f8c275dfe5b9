//! Constants shared between the board program and clients.
//!
//! Keep these stable because they affect instruction and account encoding.

/// Default cluster endpoint.
pub const DEVNET_URL: &str = "https://api.devnet.solana.com";

/// Namespace prefix of Anchor instruction discriminators.
pub const IX_NAMESPACE: &str = "global";

/// Namespace prefix of Anchor account discriminators.
pub const ACCOUNT_NAMESPACE: &str = "account";

/// Length of an Anchor discriminator in bytes.
pub const DISCRIMINATOR_LEN: usize = 8;

/// File name of the board account key pair shipped with the app.
pub const DEFAULT_BOARD_KEYPAIR_FILE: &str = "keypair.json";

/// File name of the board program IDL shipped with the app.
pub const DEFAULT_IDL_FILE: &str = "idl.json";
