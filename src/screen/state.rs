use crate::holdings::HoldingsSource;
use crate::portfolio::PortfolioSnapshot;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Initial,
    Success,
    Failure,
}

/// What the screen currently shows.
///
/// Data only exists in `Success`; a failed fetch never carries the previous
/// holdings along.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreenState {
    Initial,
    Success { snapshot: Arc<PortfolioSnapshot> },
    Failure,
}

impl ScreenState {
    pub fn status(&self) -> Status {
        match self {
            Self::Initial => Status::Initial,
            Self::Success { .. } => Status::Success,
            Self::Failure => Status::Failure,
        }
    }

    pub fn snapshot(&self) -> Option<&Arc<PortfolioSnapshot>> {
        match self {
            Self::Success { snapshot } => Some(snapshot),
            _ => None,
        }
    }
}

/// Everything a subscriber needs to draw the screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenModel {
    pub state: ScreenState,
    pub portfolio_expanded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fetch ran and the screen moved to this status.
    Completed(Status),
    /// Another refresh was still running; nothing was issued.
    AlreadyInFlight,
}

/// State container for the holdings screen.
///
/// Holds the injected fetcher, publishes every transition on a `watch`
/// channel and allows one fetch in flight at a time.
pub struct HoldingsScreen {
    source: Arc<dyn HoldingsSource>,
    model: watch::Sender<ScreenModel>,
    in_flight: Mutex<()>,
}

impl HoldingsScreen {
    pub fn new(source: Arc<dyn HoldingsSource>) -> Self {
        let (model, _) = watch::channel(ScreenModel {
            state: ScreenState::Initial,
            portfolio_expanded: false,
        });
        Self {
            source,
            model,
            in_flight: Mutex::new(()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenModel> {
        self.model.subscribe()
    }

    pub fn model(&self) -> ScreenModel {
        self.model.borrow().clone()
    }

    pub fn status(&self) -> Status {
        self.model.borrow().state.status()
    }

    /// Fetch holdings and replace whatever the screen showed before.
    ///
    /// The screen goes to `Initial` while the fetch runs, then to `Success`
    /// or `Failure`. Calls made while a fetch is running return
    /// `AlreadyInFlight` without touching the network. Dropping the returned
    /// future mid-fetch moves the screen to `Failure` so a retry is offered.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!("refresh skipped; fetch already in flight");
            return RefreshOutcome::AlreadyInFlight;
        };

        self.set_state(ScreenState::Initial);
        let mut pending = PendingFetch {
            model: &self.model,
            settled: false,
        };

        let next = match self.source.fetch().await {
            Ok(holdings) => {
                let snapshot = PortfolioSnapshot::new(holdings);
                info!(
                    count = snapshot.holdings().len(),
                    total_pnl = snapshot.totals().total_pnl,
                    fetched_at = %snapshot.fetched_at(),
                    "holdings refreshed"
                );
                ScreenState::Success { snapshot }
            }
            Err(e) => {
                warn!(error = e.message(), "holdings refresh failed");
                ScreenState::Failure
            }
        };

        pending.settled = true;
        let status = next.status();
        self.set_state(next);
        RefreshOutcome::Completed(status)
    }

    /// Expand or collapse the portfolio summary panel. Returns the new value.
    pub fn toggle_portfolio(&self) -> bool {
        let mut expanded = false;
        self.model.send_modify(|m| {
            m.portfolio_expanded = !m.portfolio_expanded;
            expanded = m.portfolio_expanded;
        });
        expanded
    }

    fn set_state(&self, state: ScreenState) {
        // send_modify publishes even when nobody is subscribed.
        self.model.send_modify(|m| m.state = state);
    }
}

/// Lives across the fetch await in `refresh`; if that future is dropped
/// before the fetch settles, the loading state is replaced with `Failure`.
struct PendingFetch<'a> {
    model: &'a watch::Sender<ScreenModel>,
    settled: bool,
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("holdings refresh cancelled before completing");
            self.model.send_modify(|m| m.state = ScreenState::Failure);
        }
    }
}
