use anyhow::Result;
use memehub_core::events::Action;

use super::ActionOut;
use crate::args::Cli;
use crate::context;

pub async fn run(cli: &Cli, link: &str) -> Result<()> {
    let portal = context::portal(cli, false)?;
    let detect = super::load(&portal).await;

    let pb = super::spinner("sending link");
    let res = portal.submit_link(link).await;
    super::finish(pb);
    let signature = res?;

    let action = ActionOut {
        action: Action::Submit,
        signature: Some(signature),
    };
    super::render(&portal, detect, Some(action))
}
