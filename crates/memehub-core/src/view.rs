//! UI-independent view model.
//!
//! `View` is a pure function of `PortalState`. Front ends render it; the
//! plain-text rendering here is what the CLI prints.

use std::fmt::Write as _;

use serde::Serialize;

use crate::config::Branding;
use crate::model::{ListState, WalletAddress};
use crate::portal::PortalState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub index: usize,
    pub link: String,
    pub submitted_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// No session: offer to connect the wallet.
    ConnectPrompt,
    /// Connected, board not fetched yet.
    Loading { address: WalletAddress },
    /// Connected, board account missing: offer one-time initialization.
    InitializePrompt { address: WalletAddress },
    /// Connected, board present: submission form and entries.
    Board {
        address: WalletAddress,
        total: u64,
        draft: String,
        submitting: bool,
        entries: Vec<EntryView>,
    },
}

impl View {
    pub fn from_state(state: &PortalState) -> Self {
        let Some(session) = &state.session else {
            return Self::ConnectPrompt;
        };
        let address = session.address.clone();

        match &state.list {
            ListState::Unknown => Self::Loading { address },
            ListState::Absent => Self::InitializePrompt { address },
            ListState::Present(board) => Self::Board {
                address,
                total: board.total,
                draft: state.draft.clone(),
                submitting: state.in_flight.is_some(),
                entries: board
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(index, e)| EntryView {
                        index,
                        link: e.link.clone(),
                        submitted_by: e.submitter.to_string(),
                    })
                    .collect(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectPrompt => "connect_prompt",
            Self::Loading { .. } => "loading",
            Self::InitializePrompt { .. } => "initialize_prompt",
            Self::Board { .. } => "board",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: String,
    pub subtitle: String,
    pub body: View,
    pub credit_text: String,
    pub credit_link: String,
}

impl Page {
    pub fn new(branding: &Branding, body: View) -> Self {
        Self {
            title: branding.title.clone(),
            subtitle: branding.subtitle.clone(),
            body,
            credit_text: branding.credit_text(),
            credit_link: branding.credit_link(),
        }
    }

    /// Render the page as plain text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", self.subtitle);
        let _ = writeln!(out);

        match &self.body {
            View::ConnectPrompt => {
                let _ = writeln!(out, "[ Connect to Wallet ]");
            }
            View::Loading { address } => {
                let _ = writeln!(out, "wallet: {address}");
                let _ = writeln!(out, "loading board...");
            }
            View::InitializePrompt { address } => {
                let _ = writeln!(out, "wallet: {address}");
                let _ = writeln!(out, "[ Do One-Time Initialization For GIF Program Account ]");
            }
            View::Board {
                address,
                total,
                draft,
                submitting,
                entries,
            } => {
                let _ = writeln!(out, "wallet: {address}");
                let _ = writeln!(out, "Enter gif link! > {draft}");
                let _ = writeln!(
                    out,
                    "{}",
                    if *submitting { "[ Submitting... ]" } else { "[ Submit ]" }
                );
                let _ = writeln!(out, "{total} gif(s) on the board");
                for e in entries {
                    let _ = writeln!(out);
                    let _ = writeln!(out, "#{} {}", e.index + 1, e.link);
                    let _ = writeln!(out, "   Submitted by: {}", e.submitted_by);
                }
            }
        }

        let _ = writeln!(out);
        let _ = write!(out, "{} ({})", self.credit_text, self.credit_link);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Action;
    use crate::model::{Board, Entry, Session};

    fn connected(list: ListState) -> PortalState {
        PortalState {
            session: Some(Session {
                address: WalletAddress::new("Wa11et").unwrap(),
                restored: true,
            }),
            list,
            ..PortalState::default()
        }
    }

    #[test]
    fn view_follows_state() {
        assert_eq!(View::from_state(&PortalState::default()), View::ConnectPrompt);
        assert_eq!(View::from_state(&connected(ListState::Unknown)).name(), "loading");
        assert_eq!(
            View::from_state(&connected(ListState::Absent)).name(),
            "initialize_prompt"
        );
        assert_eq!(
            View::from_state(&connected(ListState::Present(Board::default()))).name(),
            "board"
        );
    }

    #[test]
    fn board_view_keeps_order_and_flags_submission() {
        let board = Board {
            total: 2,
            entries: vec![
                Entry {
                    link: "https://a/1.gif".into(),
                    submitter: WalletAddress::new("A").unwrap(),
                },
                Entry {
                    link: "https://b/2.gif".into(),
                    submitter: WalletAddress::new("B").unwrap(),
                },
            ],
        };
        let mut st = connected(ListState::Present(board));
        st.in_flight = Some(Action::Submit);

        let View::Board { entries, submitting, total, .. } = View::from_state(&st) else {
            panic!("expected board view");
        };
        assert!(submitting);
        assert_eq!(total, 2);
        assert_eq!(entries[0].link, "https://a/1.gif");
        assert_eq!(entries[1].submitted_by, "B");
    }

    #[test]
    fn text_rendering_contains_branding_and_entries() {
        let board = Board {
            total: 1,
            entries: vec![Entry {
                link: "http://x/y.gif".into(),
                submitter: WalletAddress::new("Wa11et").unwrap(),
            }],
        };
        let page = Page::new(
            &Branding::default(),
            View::from_state(&connected(ListState::Present(board))),
        );
        let text = page.render_text();
        assert!(text.starts_with("Meme Hub\n"));
        assert!(text.contains("#1 http://x/y.gif"));
        assert!(text.contains("Submitted by: Wa11et"));
        assert!(text.ends_with("built on @_buildspace (https://twitter.com/_buildspace)"));
    }

    #[test]
    fn connect_prompt_json() {
        let page = Page::new(&Branding::default(), View::ConnectPrompt);
        let v = serde_json::to_value(&page).unwrap();
        assert_eq!(v["body"]["view"], "connect_prompt");
    }
}
