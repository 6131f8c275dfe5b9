use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use memehub_core::events::Action;
use memehub_core::portal::{DetectOutcome, Portal};
use memehub_core::view::{Page, View};
use serde::Serialize;

use crate::args::{Cli, Command};
use crate::output;

mod connect;
mod disconnect;
mod doctor;
mod init;
mod submit;
mod view;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::View => view::run(&cli).await,
        Command::Connect { yes } => connect::run(&cli, *yes).await,
        Command::Disconnect => disconnect::run(&cli),
        Command::Init => init::run(&cli).await,
        Command::Submit { link } => submit::run(&cli, link).await,
        Command::Doctor => doctor::run(&cli).await,
    }
}

#[derive(Debug, Serialize)]
pub struct ActionOut {
    pub action: Action,
    pub signature: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PageOut {
    pub detect: DetectOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionOut>,
    pub page: Page,
}

/// Page load: restore the session if the wallet trusts the app.
pub async fn load(portal: &Portal) -> DetectOutcome {
    let pb = spinner("loading");
    let detect = portal.detect_session().await;
    finish(pb);

    match &detect {
        DetectOutcome::ProviderMissing => output::notice(
            "Wallet not found! Create one with `solana-keygen new` or pass --wallet",
        ),
        DetectOutcome::UnexpectedProvider { found } => {
            output::notice(&format!("unsupported wallet provider: {found}"))
        }
        _ => {}
    }
    detect
}

/// Print the page and a hint for the next step.
pub fn render(portal: &Portal, detect: DetectOutcome, action: Option<ActionOut>) -> Result<()> {
    let page = portal.page();
    let hint = match &page.body {
        View::ConnectPrompt => "next: memehub connect",
        View::Loading { .. } => "next: memehub view",
        View::InitializePrompt { .. } => "next: memehub init",
        View::Board { .. } => "next: memehub submit <link>",
    };

    let mut text = String::new();
    if let Some(a) = &action {
        if let Some(sig) = &a.signature {
            text.push_str(&format!("{} ok: {sig}\n\n", a.action.as_str()));
        }
    }
    text.push_str(&page.render_text());
    text.push_str(&format!("\n\n{hint}"));

    output::print_either(&PageOut { detect, action, page }, &text)
}

/// Spinner shown while a remote call is in flight. Hidden in JSON mode.
pub fn spinner(msg: &'static str) -> Option<ProgressBar> {
    if output::is_json() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

pub fn finish(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}
