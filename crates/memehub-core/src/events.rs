//! Portal events and the refresh contract.
//!
//! Every state-changing step of the portal emits a `PortalEvent`. Observers
//! see all events in emission order. Whether an event is followed by a board
//! refresh is decided by `PortalEvent::requests_refresh` alone, so the
//! "fetch after every list-affecting action" rule lives in one place.

use serde::Serialize;

use crate::model::{ListState, WalletAddress};

/// User-triggered actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Connect,
    Initialize,
    Submit,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Initialize => "initialize",
            Self::Submit => "submit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PortalEvent {
    /// No wallet provider is available. User-visible notice.
    ProviderMissing,
    /// A session was established, either restored or freshly authorized.
    SessionEstablished { address: WalletAddress, restored: bool },
    ActionStarted { action: Action },
    ActionCompleted { action: Action, signature: Option<String> },
    ActionFailed { action: Action, code: String, message: String },
    /// The board mirror was replaced by a fetch.
    ListUpdated { state: String, entries: usize },
}

impl PortalEvent {
    /// The refresh contract: events after which the board must be re-read.
    pub fn requests_refresh(&self) -> bool {
        match self {
            Self::SessionEstablished { .. } => true,
            Self::ActionCompleted { action, .. } => {
                matches!(action, Action::Initialize | Action::Submit)
            }
            _ => false,
        }
    }

    pub(crate) fn list_updated(state: &ListState) -> Self {
        Self::ListUpdated {
            state: state.as_str().to_string(),
            entries: state.board().map(|b| b.len()).unwrap_or(0),
        }
    }
}

/// Receives every event emitted by a portal.
pub trait PortalObserver: Send + Sync {
    fn on_event(&self, event: &PortalEvent);
}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PortalObserver for TracingObserver {
    fn on_event(&self, event: &PortalEvent) {
        match event {
            PortalEvent::ProviderMissing => tracing::warn!("wallet provider not found"),
            PortalEvent::ActionFailed { action, code, message } => {
                tracing::warn!(action = action.as_str(), code = %code, "{message}")
            }
            other => tracing::debug!(event = ?other, "portal event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> WalletAddress {
        WalletAddress::new("wallet").unwrap()
    }

    #[test]
    fn refresh_contract() {
        assert!(PortalEvent::SessionEstablished { address: addr(), restored: true }.requests_refresh());
        assert!(PortalEvent::ActionCompleted { action: Action::Submit, signature: None }.requests_refresh());
        assert!(PortalEvent::ActionCompleted { action: Action::Initialize, signature: None }.requests_refresh());

        // Connect completion is covered by SessionEstablished.
        assert!(!PortalEvent::ActionCompleted { action: Action::Connect, signature: None }.requests_refresh());
        assert!(!PortalEvent::ActionStarted { action: Action::Submit }.requests_refresh());
        assert!(!PortalEvent::ProviderMissing.requests_refresh());
        assert!(!PortalEvent::ListUpdated { state: "absent".into(), entries: 0 }.requests_refresh());
    }
}
