use anyhow::Result;
use memehub_core::events::Action;
use memehub_core::portal::DetectOutcome;

use super::ActionOut;
use crate::args::Cli;
use crate::context;

pub async fn run(cli: &Cli, yes: bool) -> Result<()> {
    let portal = context::portal(cli, yes)?;
    let detect = super::load(&portal).await;

    match &detect {
        DetectOutcome::Restored { address } => {
            tracing::info!(%address, "already connected");
        }
        DetectOutcome::ProviderMissing | DetectOutcome::UnexpectedProvider { .. } => {
            return super::render(&portal, detect, None);
        }
        DetectOutcome::NotTrusted | DetectOutcome::Failed { .. } => {
            // A spinner would redraw over the approval prompt.
            let pb = if yes { super::spinner("connecting") } else { None };
            let res = portal.connect().await;
            super::finish(pb);
            res?;
        }
    }

    let action = ActionOut {
        action: Action::Connect,
        signature: None,
    };
    super::render(&portal, detect, Some(action))
}
