//! Start-once scrape-server bootstrap.
//!
//! The scrape listener must open at most once per process no matter how many
//! facade handles get constructed; the guard is a process-wide atomic with
//! single-writer-wins semantics.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{app_state::AppState, router};

static SCRAPE_SERVER_STARTED: AtomicBool = AtomicBool::new(false);

/// Flip the started flag; only the first caller in the process wins.
pub(crate) fn try_mark_started() -> bool {
    SCRAPE_SERVER_STARTED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
}

/// Spawn the scrape endpoint on `0.0.0.0:<scrape_port>` exactly once.
///
/// Returns `true` if this call started the server; later (or concurrently
/// racing) calls are no-ops returning `false`. Must be called from within a
/// tokio runtime. Bind or serve failures are logged, not propagated, so the
/// host's request path is never taken down by its metrics plumbing.
pub fn spawn_scrape_server(state: AppState) -> bool {
    if !try_mark_started() {
        return false;
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], state.cfg().exporter.scrape_port));
    tokio::spawn(async move {
        let app = router::build_router(state);
        match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                tracing::info!(%addr, "metrics scrape endpoint listening");
                if let Err(e) = axum::serve(listener, app).await {
                    tracing::error!(error = %e, "scrape server failed");
                }
            }
            Err(e) => {
                tracing::error!(%addr, error = %e, "failed to bind scrape endpoint");
            }
        }
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_flag_is_single_writer_wins() {
        assert!(try_mark_started());
        assert!(!try_mark_started());
        assert!(!try_mark_started());
    }
}
