use crate::core::AppState;
use crate::screen::{RefreshOutcome, Status};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Server startup hook.
///
/// With `STARTUP_FETCH` on (the default) the first holdings fetch is started
/// on its own task and the handle returned; the caller binds the listener
/// without waiting for it. A slow or failed fetch only leaves the screen in
/// `INITIAL` or `FAILURE`.
pub fn initialize_on_startup(state: &AppState) -> Option<JoinHandle<()>> {
    info!(
        holdings_url = %state.config.holdings_url,
        startup_fetch = state.config.startup_fetch,
        "startup"
    );

    if !state.config.startup_fetch {
        return None;
    }

    let screen = state.screen.clone();
    Some(tokio::spawn(async move {
        match screen.refresh().await {
            RefreshOutcome::Completed(Status::Success) => {
                let model = screen.model();
                let count = model.state.snapshot().map(|s| s.holdings().len()).unwrap_or(0);
                info!(count, "startup fetch ok");
            }
            RefreshOutcome::Completed(status) => {
                warn!(status = ?status, "startup fetch failed; waiting for manual refresh")
            }
            RefreshOutcome::AlreadyInFlight => {}
        }
    }))
}
