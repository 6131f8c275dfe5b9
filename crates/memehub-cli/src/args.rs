use clap::{ArgAction, Parser, Subcommand};
use memehub_solana_client::constants::{DEFAULT_BOARD_KEYPAIR_FILE, DEFAULT_IDL_FILE, DEVNET_URL};

#[derive(Parser, Debug, Clone)]
#[command(name = "memehub", version, about = "Meme Hub: a GIF board on Solana")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug). MEMEHUB_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// RPC endpoint.
    #[arg(long, global = true, env = "MEMEHUB_RPC_URL", default_value = DEVNET_URL)]
    pub rpc_url: String,

    /// Commitment level: processed|confirmed|finalized
    #[arg(long, global = true, env = "MEMEHUB_COMMITMENT", default_value = "processed")]
    pub commitment: String,

    /// Board program id (base58). Takes precedence over --idl.
    #[arg(long, global = true, env = "MEMEHUB_PROGRAM_ID")]
    pub program_id: Option<String>,

    /// Anchor IDL of the board program, used to find the program id.
    #[arg(long, global = true, env = "MEMEHUB_IDL", default_value = DEFAULT_IDL_FILE)]
    pub idl: String,

    /// Key pair of the shared board account.
    #[arg(long, global = true, env = "MEMEHUB_BOARD_KEYPAIR", default_value = DEFAULT_BOARD_KEYPAIR_FILE)]
    pub board_keypair: String,

    /// Wallet key pair file (default: ~/.config/solana/id.json)
    #[arg(long, global = true, env = "MEMEHUB_WALLET")]
    pub wallet: Option<String>,

    /// Trust list of the wallet (default: <config dir>/memehub/trusted_apps.json)
    #[arg(long, global = true, env = "MEMEHUB_TRUST_STORE")]
    pub trust_store: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load the board and render it.
    View,

    /// Connect the wallet to the app (asks for approval once).
    Connect {
        /// Approve without prompting.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Revoke the app's access to the wallet.
    Disconnect,

    /// Create the shared board account (one-time).
    Init,

    /// Submit a GIF link to the board.
    Submit {
        /// Link to submit.
        link: String,
    },

    /// Run environment checks.
    Doctor,
}
