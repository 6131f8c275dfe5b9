//! Keypair file loading.
//!
//! Accepted formats:
//! - Solana CLI: a JSON array of 64 bytes
//! - web3.js export: `{"_keypair": {"publicKey": {..}, "secretKey": {"0": n, "1": n, ..}}}`
//! - a base58 string of the 64-byte secret key (wallet "export private key")

use std::fs;
use std::path::Path;

use serde_json::Value;
use solana_sdk::signature::Keypair;

use crate::errors::{SolanaClientError, SolanaResult};

const SECRET_KEY_LEN: usize = 64;

/// Read and parse a keypair file.
pub fn read_keypair<P: AsRef<Path>>(path: P) -> SolanaResult<Keypair> {
    let raw = fs::read_to_string(path.as_ref())?;
    parse_keypair(&raw).map_err(|e| match e {
        SolanaClientError::Keypair(msg) => {
            SolanaClientError::Keypair(format!("{}: {msg}", path.as_ref().display()))
        }
        other => other,
    })
}

/// Parse keypair text in any supported format.
pub fn parse_keypair(raw: &str) -> SolanaResult<Keypair> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SolanaClientError::Keypair("empty keypair".to_string()));
    }

    let bytes = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        let v: Value = serde_json::from_str(trimmed)?;
        secret_from_json(&v)?
    } else {
        bs58::decode(trimmed)
            .into_vec()
            .map_err(|e| SolanaClientError::Keypair(format!("invalid base58: {e}")))?
    };

    if bytes.len() != SECRET_KEY_LEN {
        return Err(SolanaClientError::Keypair(format!(
            "secret key must be {SECRET_KEY_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    Keypair::from_bytes(&bytes).map_err(|e| SolanaClientError::Keypair(e.to_string()))
}

fn secret_from_json(v: &Value) -> SolanaResult<Vec<u8>> {
    match v {
        Value::Array(items) => items.iter().map(byte).collect(),
        Value::Object(_) => {
            let secret = v
                .pointer("/_keypair/secretKey")
                .or_else(|| v.get("secretKey"))
                .ok_or_else(|| SolanaClientError::Keypair("missing secretKey".to_string()))?;
            match secret {
                Value::Array(_) => secret_from_json(secret),
                Value::Object(map) => {
                    // Index-keyed map as produced by JSON.stringify(Uint8Array).
                    let mut out = vec![0u8; map.len()];
                    for (k, val) in map {
                        let idx: usize = k.parse().map_err(|_| {
                            SolanaClientError::Keypair(format!("invalid secretKey index: {k}"))
                        })?;
                        let slot = out.get_mut(idx).ok_or_else(|| {
                            SolanaClientError::Keypair(format!("secretKey index out of range: {idx}"))
                        })?;
                        *slot = byte(val)?;
                    }
                    Ok(out)
                }
                _ => Err(SolanaClientError::Keypair("unsupported secretKey".to_string())),
            }
        }
        _ => Err(SolanaClientError::Keypair("unsupported keypair json".to_string())),
    }
}

fn byte(v: &Value) -> SolanaResult<u8> {
    v.as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| SolanaClientError::Keypair(format!("not a byte: {v}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;

    #[test]
    fn cli_array_format() {
        let kp = Keypair::new();
        let raw = serde_json::to_string(&kp.to_bytes().to_vec()).unwrap();
        assert_eq!(parse_keypair(&raw).unwrap().pubkey(), kp.pubkey());
    }

    #[test]
    fn web3_export_format() {
        let kp = Keypair::new();
        let secret: serde_json::Map<String, Value> = kp
            .to_bytes()
            .iter()
            .enumerate()
            .map(|(i, b)| (i.to_string(), Value::from(*b)))
            .collect();
        let raw = serde_json::json!({ "_keypair": { "publicKey": {}, "secretKey": secret } });
        assert_eq!(parse_keypair(&raw.to_string()).unwrap().pubkey(), kp.pubkey());
    }

    #[test]
    fn base58_format() {
        let kp = Keypair::new();
        let raw = bs58::encode(kp.to_bytes()).into_string();
        assert_eq!(parse_keypair(&raw).unwrap().pubkey(), kp.pubkey());
    }

    #[test]
    fn rejects_short_and_garbage() {
        assert!(parse_keypair("").is_err());
        assert!(parse_keypair("[1,2,3]").is_err());
        assert!(parse_keypair("[1,2,300]").is_err());
        assert!(parse_keypair("{\"foo\": 1}").is_err());
        assert!(parse_keypair("0OIl").is_err());
    }
}
