//! Board program encoding.
//!
//! The board program is an Anchor program. This module can:
//! - compute instruction and account discriminators
//! - build the `start_stuff_off` and `add_gif` instructions
//! - decode the shared board account into `memehub_core::model::Board`
//!
//! Instruction data is the 8-byte discriminator `sha256("global:<name>")[..8]`
//! followed by Borsh-encoded arguments. Account data is the 8-byte
//! discriminator `sha256("account:<Type>")[..8]` followed by the Borsh-encoded
//! struct and zero padding up to the allocated size.

use borsh::{BorshDeserialize, BorshSerialize};
use memehub_core::entrypoints;
use memehub_core::model::{Board, Entry, WalletAddress};
use sha2::{Digest, Sha256};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;

use crate::constants::{ACCOUNT_NAMESPACE, DISCRIMINATOR_LEN, IX_NAMESPACE};
use crate::errors::{SolanaClientError, SolanaResult};

/// Anchor discriminator for `<namespace>:<name>`.
pub fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let mut h = Sha256::new();
    h.update(namespace.as_bytes());
    h.update(b":");
    h.update(name.as_bytes());
    let digest = h.finalize();

    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    discriminator(IX_NAMESPACE, name)
}

pub fn account_discriminator(type_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    discriminator(ACCOUNT_NAMESPACE, type_name)
}

/// On-chain layout of one board item.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ItemRecord {
    pub gif_link: String,
    pub user_address: [u8; 32],
}

/// On-chain layout of the shared board account.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BoardRecord {
    pub total_gifs: u64,
    pub gif_list: Vec<ItemRecord>,
}

impl BoardRecord {
    /// Encode with the account discriminator, as the program stores it.
    pub fn to_account_data(&self) -> SolanaResult<Vec<u8>> {
        let mut out = account_discriminator(entrypoints::BOARD_ACCOUNT).to_vec();
        borsh::to_writer(&mut out, self).map_err(|e| SolanaClientError::Decode(e.to_string()))?;
        Ok(out)
    }

    /// Decode account data. Trailing bytes (allocation padding) are ignored.
    pub fn from_account_data(data: &[u8]) -> SolanaResult<Self> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(SolanaClientError::Decode(format!(
                "account data too short: {} bytes",
                data.len()
            )));
        }
        let (disc, mut body) = data.split_at(DISCRIMINATOR_LEN);
        let expected = account_discriminator(entrypoints::BOARD_ACCOUNT);
        if disc != expected {
            return Err(SolanaClientError::Decode(format!(
                "unexpected account discriminator {}, expected {}",
                hex::encode(disc),
                hex::encode(expected)
            )));
        }
        BoardRecord::deserialize(&mut body).map_err(|e| SolanaClientError::Decode(e.to_string()))
    }

    pub fn into_board(self) -> SolanaResult<Board> {
        let entries = self
            .gif_list
            .into_iter()
            .map(|item| {
                let submitter = WalletAddress::new(Pubkey::new_from_array(item.user_address).to_string())
                    .map_err(|e| SolanaClientError::Decode(e.to_string()))?;
                Ok(Entry {
                    link: item.gif_link,
                    submitter,
                })
            })
            .collect::<SolanaResult<Vec<_>>>()?;

        Ok(Board {
            total: self.total_gifs,
            entries,
        })
    }
}

/// Arguments of `add_gif`.
#[derive(Debug, Clone, BorshSerialize)]
struct AddGifArgs {
    gif_link: String,
}

/// The board program bound to one shared account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardProgram {
    pub program_id: Pubkey,
    pub board: Pubkey,
}

impl BoardProgram {
    pub fn new(program_id: Pubkey, board: Pubkey) -> Self {
        Self { program_id, board }
    }

    /// Build the one-time instruction creating the board account.
    ///
    /// Both `user` (fee and rent payer) and the board account must sign.
    pub fn ix_initialize(&self, user: Pubkey) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(self.board, true),
                AccountMeta::new(user, true),
                AccountMeta::new_readonly(solana_program::system_program::id(), false),
            ],
            data: instruction_discriminator(entrypoints::INITIALIZE).to_vec(),
        }
    }

    /// Build the instruction appending `link` on behalf of `user`.
    pub fn ix_append(&self, user: Pubkey, link: &str) -> SolanaResult<Instruction> {
        let mut data = instruction_discriminator(entrypoints::APPEND_ENTRY).to_vec();
        borsh::to_writer(&mut data, &AddGifArgs { gif_link: link.to_string() })
            .map_err(|e| SolanaClientError::Decode(e.to_string()))?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(self.board, false),
                AccountMeta::new(user, true),
            ],
            data,
        })
    }

    /// Decode the board account, checking its owner.
    pub fn decode_board(&self, owner: &Pubkey, data: &[u8]) -> SolanaResult<Board> {
        if *owner != self.program_id {
            return Err(SolanaClientError::WrongOwner {
                account: self.board.to_string(),
                owner: owner.to_string(),
                expected: self.program_id.to_string(),
            });
        }
        BoardRecord::from_account_data(data)?.into_board()
    }
}
