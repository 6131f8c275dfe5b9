use anyhow::{anyhow, Context, Result};
use memehub_core::config::PortalConfig;
use memehub_solana_client::keypair::read_keypair;
use serde::Serialize;
use solana_sdk::signature::Signer;

use crate::args::Cli;
use crate::context;
use crate::output;

#[derive(Debug, Serialize)]
pub struct DisconnectOut {
    pub app: String,
    pub wallet: String,
    pub revoked: bool,
}

pub fn run(cli: &Cli) -> Result<()> {
    let out = revoke(cli)?;
    let text = if out.revoked {
        format!("{} disconnected from wallet {}", out.app, out.wallet)
    } else {
        format!("{} was not connected to wallet {}", out.app, out.wallet)
    };
    output::print_either(&out, &text)
}

/// Drop the app from the wallet's trust list; the next page load shows the
/// connect prompt again.
fn revoke(cli: &Cli) -> Result<DisconnectOut> {
    let app = PortalConfig::default().app.name;
    let path = context::wallet_path(cli)
        .ok_or_else(|| anyhow!("cannot determine wallet location; pass --wallet"))?;
    let wallet = read_keypair(&path)
        .with_context(|| format!("reading wallet {}", path.display()))?
        .pubkey();

    let revoked = context::trust_store(cli)?.revoke(&app, &wallet)?;
    tracing::info!(%wallet, revoked, "disconnect");
    Ok(DisconnectOut {
        app,
        wallet: wallet.to_string(),
        revoked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use memehub_solana_client::TrustStore;
    use solana_sdk::signature::Keypair;

    #[test]
    fn disconnect_forgets_only_this_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let kp = Keypair::new();
        let wallet = dir.path().join("id.json");
        std::fs::write(&wallet, serde_json::to_string(&kp.to_bytes().to_vec()).unwrap()).unwrap();
        let trust = dir.path().join("trust.json");

        let other = Keypair::new().pubkey();
        let store = TrustStore::new(&trust);
        store.trust("memehub", &kp.pubkey()).unwrap();
        store.trust("memehub", &other).unwrap();

        let cli = Cli::try_parse_from([
            "memehub",
            "--wallet",
            wallet.to_str().unwrap(),
            "--trust-store",
            trust.to_str().unwrap(),
            "disconnect",
        ])
        .unwrap();

        let out = revoke(&cli).unwrap();
        assert!(out.revoked);
        assert_eq!(out.wallet, kp.pubkey().to_string());
        assert!(!store.is_trusted("memehub", &kp.pubkey()).unwrap());
        assert!(store.is_trusted("memehub", &other).unwrap());

        assert!(!revoke(&cli).unwrap().revoked);
    }
}
