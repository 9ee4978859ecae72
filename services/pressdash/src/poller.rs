//! Periodic refresh of the counters and the activity log

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::BackendClient;
use crate::render;
use crate::surface::Surface;

/// Issues the two read requests on a fixed interval and pushes the
/// results to the surface.
#[derive(Clone)]
pub struct Poller {
    api: Arc<BackendClient>,
    surface: Arc<dyn Surface>,
    interval: Duration,
    cancel: CancellationToken,
}

impl Poller {
    pub fn new(
        api: Arc<BackendClient>,
        surface: Arc<dyn Surface>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            surface,
            interval,
            cancel,
        }
    }

    /// One refresh pass: two independent reads. A failure in either is
    /// logged and leaves the other untouched.
    pub async fn refresh(api: &BackendClient, surface: &dyn Surface) {
        match api.fetch_status().await {
            Ok(snapshot) => render::render_status(surface, &snapshot),
            Err(e) => tracing::warn!("Failed to fetch status: {}", e),
        }

        match api.fetch_activity().await {
            Ok(entries) => render::render_activity(surface, &entries),
            Err(e) => tracing::warn!("Failed to fetch activity log: {}", e),
        }
    }

    /// Refresh immediately, then on every interval tick until cancelled.
    ///
    /// Each tick spawns its own refresh task: a slow or hanging request is
    /// neither cancelled nor deduplicated before the next tick fires, so
    /// overlapping in-flight refreshes are possible.
    pub async fn run(&self) {
        loop {
            let api = Arc::clone(&self.api);
            let surface = Arc::clone(&self.surface);
            tokio::spawn(async move {
                Self::refresh(&api, surface.as_ref()).await;
            });

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled");
                    break;
                }
            }
        }
    }
}
