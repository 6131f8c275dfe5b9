use anyhow::Result;

use crate::args::Cli;
use crate::context;

pub async fn run(cli: &Cli) -> Result<()> {
    let portal = context::portal(cli, false)?;
    let detect = super::load(&portal).await;
    super::render(&portal, detect, None)
}
