//! The portal controller.
//!
//! `Portal` owns the local state of one "page": the wallet session, the board
//! mirror, the input draft and the action currently in flight. User actions
//! (`connect`, `initialize`, `submit`) and the load-time `detect_session` are
//! async methods; each emits `PortalEvent`s, and events that request a refresh
//! are followed by exactly one `refresh`.
//!
//! State machine:
//!
//! ```text
//! Disconnected --connect/detect--> Connected(Unknown) --refresh--> Connected(Absent)
//!                                                              \-> Connected(Present)
//! Connected(Absent)  --initialize--> Connected(Present([]))
//! Connected(Present) --submit------> Connected(Present(entries'))
//! ```
//!
//! Locking: the state mutex is never held across an await point.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::boundary::{ClientFactory, ConnectOptions, LedgerClient, WalletProvider};
use crate::config::{validate_config, PortalConfig};
use crate::errors::{CoreError, CoreResult};
use crate::events::{Action, PortalEvent, PortalObserver};
use crate::model::{ListState, Session, WalletAddress};
use crate::view::{Page, View};

/// Local state of one portal instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortalState {
    pub session: Option<Session>,
    pub list: ListState,
    pub draft: String,
    pub in_flight: Option<Action>,
}

/// Result of the load-time session detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DetectOutcome {
    Restored { address: WalletAddress },
    /// The provider exists but the app was never authorized.
    NotTrusted,
    ProviderMissing,
    UnexpectedProvider { found: String },
    Failed { message: String },
}

pub struct Portal {
    config: PortalConfig,
    wallet: Option<Arc<dyn WalletProvider>>,
    factory: Arc<dyn ClientFactory>,
    state: Mutex<PortalState>,
    observers: Vec<Arc<dyn PortalObserver>>,
}

/// Marks an action as in flight until dropped.
struct InFlight<'a> {
    state: &'a Mutex<PortalState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.lock().in_flight = None;
    }
}

impl Portal {
    /// Create a portal. `wallet` is `None` when no provider is installed.
    pub fn new(
        config: PortalConfig,
        wallet: Option<Arc<dyn WalletProvider>>,
        factory: Arc<dyn ClientFactory>,
    ) -> CoreResult<Self> {
        validate_config(&config)?;
        Ok(Self {
            config,
            wallet,
            factory,
            state: Mutex::new(PortalState::default()),
            observers: Vec::new(),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn PortalObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PortalState {
        self.state.lock().clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.state.lock().session.clone()
    }

    pub fn list(&self) -> ListState {
        self.state.lock().list.clone()
    }

    pub fn set_draft(&self, draft: impl Into<String>) {
        self.state.lock().draft = draft.into();
    }

    pub fn view(&self) -> View {
        View::from_state(&self.state.lock())
    }

    /// The full page: branding around the current view.
    pub fn page(&self) -> Page {
        Page::new(&self.config.branding, self.view())
    }

    /// Restore a previously authorized session without prompting.
    ///
    /// Never fails: every outcome, including provider errors, is reported in
    /// the returned `DetectOutcome` and logged.
    pub async fn detect_session(&self) -> DetectOutcome {
        let Some(wallet) = self.wallet.clone() else {
            self.notify(&PortalEvent::ProviderMissing);
            return DetectOutcome::ProviderMissing;
        };

        let kind = wallet.kind();
        if kind != self.config.wallet.expected_kind {
            tracing::warn!(
                expected = %self.config.wallet.expected_kind,
                found = %kind,
                "ignoring unexpected wallet provider"
            );
            return DetectOutcome::UnexpectedProvider {
                found: kind.to_string(),
            };
        }

        match wallet
            .connect(&self.config.app.name, ConnectOptions::trusted_only())
            .await
        {
            Ok(address) => {
                tracing::info!(%address, "restored wallet session");
                self.establish(address.clone(), true).await;
                DetectOutcome::Restored { address }
            }
            Err(CoreError::NotTrusted) => {
                tracing::debug!("wallet found, app not trusted yet");
                DetectOutcome::NotTrusted
            }
            Err(e) => {
                tracing::warn!(error = %e, "session detection failed");
                DetectOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Ask the wallet to authorize the app. May prompt the user.
    pub async fn connect(&self) -> CoreResult<WalletAddress> {
        let Some(wallet) = self.wallet.clone() else {
            self.notify(&PortalEvent::ProviderMissing);
            return Err(CoreError::ProviderMissing);
        };

        let _guard = self.begin(Action::Connect)?;
        match wallet
            .connect(&self.config.app.name, ConnectOptions::interactive())
            .await
        {
            Ok(address) => {
                tracing::info!(%address, "connected wallet");
                self.notify(&PortalEvent::ActionCompleted {
                    action: Action::Connect,
                    signature: None,
                });
                self.establish(address.clone(), false).await;
                Ok(address)
            }
            Err(e) => {
                self.fail(Action::Connect, &e);
                Err(e)
            }
        }
    }

    /// Re-read the board and replace the local mirror.
    ///
    /// Any failure, including a missing account, yields `ListState::Absent`.
    /// Without a session the mirror is left untouched.
    pub async fn refresh(&self) -> ListState {
        let Some(session) = self.session() else {
            tracing::debug!("refresh skipped: not connected");
            return self.list();
        };

        let next = match self.client(&session) {
            Ok(client) => match client.fetch_board().await {
                Ok(board) => {
                    tracing::debug!(entries = board.len(), "fetched board");
                    ListState::Present(board)
                }
                Err(CoreError::AccountNotFound(account)) => {
                    tracing::info!(%account, "board account does not exist yet");
                    ListState::Absent
                }
                Err(e) => {
                    tracing::warn!(error = %e, "fetching board failed");
                    ListState::Absent
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "building ledger client failed");
                ListState::Absent
            }
        };

        self.state.lock().list = next.clone();
        self.notify(&PortalEvent::list_updated(&next));
        next
    }

    /// Create the shared board account. Only valid while the board is absent.
    pub async fn initialize(&self) -> CoreResult<String> {
        let session = self.require_session()?;
        if !self.list().is_absent() {
            return Err(CoreError::invalid_state(
                "board account already exists or was not fetched",
            ));
        }

        let _guard = self.begin(Action::Initialize)?;
        let result = match self.client(&session) {
            Ok(client) => client.initialize().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(signature) => {
                tracing::info!(%signature, "created board account");
                self.settle(PortalEvent::ActionCompleted {
                    action: Action::Initialize,
                    signature: Some(signature.clone()),
                })
                .await;
                Ok(signature)
            }
            Err(e) => {
                self.fail(Action::Initialize, &e);
                Err(e)
            }
        }
    }

    /// Submit the current draft as a new board entry.
    ///
    /// An empty draft is rejected before any remote call. On success the
    /// draft is cleared only if it still holds the submitted text.
    pub async fn submit(&self) -> CoreResult<String> {
        let raw = self.state.lock().draft.clone();
        self.send_link(raw, false).await
    }

    /// Submit `link` as if typed into the draft. The draft is replaced only
    /// once the submission is accepted as the in-flight action.
    pub async fn submit_link(&self, link: impl Into<String>) -> CoreResult<String> {
        self.send_link(link.into(), true).await
    }

    async fn send_link(&self, raw: String, replace_draft: bool) -> CoreResult<String> {
        let session = self.require_session()?;

        let link = raw.trim().to_string();
        if link.is_empty() {
            tracing::info!("no link given");
            return Err(CoreError::EmptyDraft);
        }
        let max = self.config.draft.max_link_bytes;
        if link.len() > max {
            return Err(CoreError::LinkTooLong {
                len: link.len(),
                max,
            });
        }
        if self.list().board().is_none() {
            return Err(CoreError::invalid_state("board is not available"));
        }

        let _guard = self.begin(Action::Submit)?;
        if replace_draft {
            self.state.lock().draft = raw.clone();
        }
        tracing::info!(%link, "submitting link");
        let result = match self.client(&session) {
            Ok(client) => client.append_entry(&link).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(signature) => {
                tracing::info!(%signature, "link sent to program");
                if self.config.draft.clear_on_success {
                    let mut st = self.state.lock();
                    if st.draft == raw {
                        st.draft.clear();
                    }
                }
                self.settle(PortalEvent::ActionCompleted {
                    action: Action::Submit,
                    signature: Some(signature.clone()),
                })
                .await;
                Ok(signature)
            }
            Err(e) => {
                self.fail(Action::Submit, &e);
                Err(e)
            }
        }
    }

    async fn establish(&self, address: WalletAddress, restored: bool) {
        {
            let mut st = self.state.lock();
            st.session = Some(Session {
                address: address.clone(),
                restored,
            });
            st.list = ListState::Unknown;
        }
        self.settle(PortalEvent::SessionEstablished { address, restored })
            .await;
    }

    fn client(&self, session: &Session) -> CoreResult<Box<dyn LedgerClient>> {
        self.factory.build(session)
    }

    fn require_session(&self) -> CoreResult<Session> {
        self.session().ok_or(CoreError::NotConnected)
    }

    fn begin(&self, action: Action) -> CoreResult<InFlight<'_>> {
        let mut st = self.state.lock();
        if let Some(current) = st.in_flight {
            tracing::warn!(
                requested = action.as_str(),
                current = current.as_str(),
                "action rejected while another is in flight"
            );
            return Err(CoreError::Busy(current.as_str().to_string()));
        }
        st.in_flight = Some(action);
        drop(st);

        self.notify(&PortalEvent::ActionStarted { action });
        Ok(InFlight { state: &self.state })
    }

    fn fail(&self, action: Action, err: &CoreError) {
        tracing::warn!(action = action.as_str(), error = %err, "action failed");
        self.notify(&PortalEvent::ActionFailed {
            action,
            code: err.code().to_string(),
            message: err.to_string(),
        });
    }

    fn notify(&self, event: &PortalEvent) {
        for o in &self.observers {
            o.on_event(event);
        }
    }

    /// Notify observers and honor the refresh contract.
    async fn settle(&self, event: PortalEvent) {
        self.notify(&event);
        if event.requests_refresh() {
            self.refresh().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::boundary::WalletKind;
    use crate::model::Board;

    struct NoLedger;

    impl ClientFactory for NoLedger {
        fn build(&self, _session: &Session) -> CoreResult<Box<dyn LedgerClient>> {
            Err(CoreError::remote("offline"))
        }
    }

    struct OtherWallet;

    #[async_trait]
    impl WalletProvider for OtherWallet {
        fn kind(&self) -> WalletKind {
            WalletKind::Other("browser".into())
        }

        async fn connect(&self, _app: &str, _opts: ConnectOptions) -> CoreResult<WalletAddress> {
            WalletAddress::new("someone")
        }
    }

    fn portal(wallet: Option<Arc<dyn WalletProvider>>) -> Portal {
        Portal::new(PortalConfig::default(), wallet, Arc::new(NoLedger)).unwrap()
    }

    #[tokio::test]
    async fn unexpected_provider_is_ignored() {
        let p = portal(Some(Arc::new(OtherWallet)));
        let out = p.detect_session().await;
        assert_eq!(out, DetectOutcome::UnexpectedProvider { found: "browser".into() });
        assert!(p.session().is_none());
    }

    #[tokio::test]
    async fn unreachable_ledger_yields_absent() {
        let p = portal(None);
        p.state.lock().session = Some(Session {
            address: WalletAddress::new("me").unwrap(),
            restored: false,
        });
        assert_eq!(p.refresh().await, ListState::Absent);
    }

    #[tokio::test]
    async fn refresh_without_session_keeps_state() {
        let p = portal(None);
        assert_eq!(p.refresh().await, ListState::Unknown);
    }

    #[tokio::test]
    async fn initialize_requires_absent_board() {
        let p = portal(None);
        {
            let mut st = p.state.lock();
            st.session = Some(Session {
                address: WalletAddress::new("me").unwrap(),
                restored: false,
            });
            st.list = ListState::Present(Board::default());
        }
        let err = p.initialize().await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
    }

    #[test]
    fn in_flight_guard_resets() {
        let p = portal(None);
        {
            let _g = p.begin(Action::Submit).unwrap();
            assert_eq!(p.state().in_flight, Some(Action::Submit));
            assert_eq!(
                p.begin(Action::Initialize).err(),
                Some(CoreError::Busy("submit".into()))
            );
        }
        assert_eq!(p.state().in_flight, None);
    }

    #[tokio::test]
    async fn submit_requires_session() {
        let p = portal(None);
        assert_eq!(p.submit_link("x").await.unwrap_err(), CoreError::NotConnected);
    }
}
