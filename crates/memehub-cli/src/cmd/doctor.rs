use anyhow::Result;
use memehub_core::config::PortalConfig;
use memehub_solana_client::client::node_version;
use memehub_solana_client::keypair::read_keypair;
use serde::Serialize;
use solana_sdk::signature::Signer;

use crate::args::Cli;
use crate::context;
use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

impl Check {
    fn new(name: &str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            ok,
            detail: detail.into(),
        }
    }
}

pub async fn run(cli: &Cli) -> Result<()> {
    let mut checks = Vec::new();
    let app = PortalConfig::default().app.name;

    let wallet_pubkey = match context::wallet_path(cli) {
        None => {
            checks.push(Check::new("wallet", false, "no home directory; pass --wallet"));
            None
        }
        Some(path) => match read_keypair(&path) {
            Ok(kp) => {
                checks.push(Check::new("wallet", true, format!("{} ({})", kp.pubkey(), path.display())));
                Some(kp.pubkey())
            }
            Err(e) => {
                checks.push(Check::new("wallet", false, format!("{}: {e}", path.display())));
                None
            }
        },
    };

    // Trust is informational: `memehub connect` establishes it.
    if let Some(wallet) = wallet_pubkey {
        let detail = match context::trust_store(cli) {
            Err(e) => e.to_string(),
            Ok(store) => match store.is_trusted(&app, &wallet) {
                Ok(true) => format!("{app} is trusted"),
                Ok(false) => format!("{app} is not trusted yet (run `memehub connect`)"),
                Err(e) => e.to_string(),
            },
        };
        checks.push(Check::new("trust", true, detail));
    }

    match context::program_id(cli) {
        Ok(id) => checks.push(Check::new("program", true, id.to_string())),
        Err(e) => checks.push(Check::new("program", false, format!("{e:#}"))),
    }

    match read_keypair(&cli.board_keypair) {
        Ok(kp) => checks.push(Check::new("board_account", true, kp.pubkey().to_string())),
        Err(e) => checks.push(Check::new("board_account", false, e.to_string())),
    }

    let pb = super::spinner("contacting rpc node");
    let version = node_version(&cli.rpc_url).await;
    super::finish(pb);
    match version {
        Ok(v) => checks.push(Check::new("rpc", true, format!("{} (solana-core {v})", cli.rpc_url))),
        Err(e) => checks.push(Check::new("rpc", false, format!("{}: {e}", cli.rpc_url))),
    }

    let ok = checks.iter().all(|c| c.ok);
    output::print(&DoctorOut { ok, checks })?;
    Ok(())
}
