use anyhow::Result;
use memehub_core::events::Action;

use super::ActionOut;
use crate::args::Cli;
use crate::context;

pub async fn run(cli: &Cli) -> Result<()> {
    let portal = context::portal(cli, false)?;
    let detect = super::load(&portal).await;

    let pb = super::spinner("creating board account");
    let res = portal.initialize().await;
    super::finish(pb);
    let signature = res?;

    let action = ActionOut {
        action: Action::Initialize,
        signature: Some(signature),
    };
    super::render(&portal, detect, Some(action))
}
