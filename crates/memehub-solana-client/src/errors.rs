use memehub_core::CoreError;
use solana_client::client_error::ClientError;
use thiserror::Error;

pub type SolanaResult<T> = Result<T, SolanaClientError>;

#[derive(Debug, Error)]
pub enum SolanaClientError {
    #[error("rpc: {0}")]
    Rpc(#[from] Box<ClientError>),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid keypair: {0}")]
    Keypair(String),

    #[error("account {account} not found")]
    AccountNotFound { account: String },

    #[error("account {account} is owned by {owner}, expected {expected}")]
    WrongOwner {
        account: String,
        owner: String,
        expected: String,
    },

    #[error("decode: {0}")]
    Decode(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<ClientError> for SolanaClientError {
    fn from(e: ClientError) -> Self {
        Self::Rpc(Box::new(e))
    }
}

impl From<SolanaClientError> for CoreError {
    fn from(e: SolanaClientError) -> Self {
        match e {
            SolanaClientError::AccountNotFound { account } => CoreError::AccountNotFound(account),
            SolanaClientError::Rpc(e) => CoreError::remote(e.to_string()),
            other @ (SolanaClientError::WrongOwner { .. } | SolanaClientError::Decode(_)) => {
                CoreError::decode(other.to_string())
            }
            SolanaClientError::InvalidConfig(msg) => CoreError::invalid_config(msg),
            other => CoreError::remote(other.to_string()),
        }
    }
}
