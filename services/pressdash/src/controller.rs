//! Dashboard controller: wires the poller and the dispatcher together
//!
//! The original page-lifetime timer becomes an explicit start/stop pair so
//! the whole dashboard can be exercised in tests without a persistent timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::BackendClient;
use crate::config::{Config, RowRange};
use crate::dispatch::{ActionOutcome, Dispatcher};
use crate::io::HttpClient;
use crate::poller::Poller;
use crate::surface::Surface;

/// Owns the poll task and exposes the operator actions
pub struct DashboardController {
    poller: Poller,
    dispatcher: Dispatcher,
    canned_rows: RowRange,
    cancel: CancellationToken,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardController {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>, surface: Arc<dyn Surface>) -> Self {
        let api = Arc::new(BackendClient::new(&config.base_url, http));
        let cancel = CancellationToken::new();

        let poller = Poller::new(
            Arc::clone(&api),
            Arc::clone(&surface),
            Duration::from_secs(config.poll_interval_seconds),
            cancel.clone(),
        );
        let dispatcher = Dispatcher::new(
            api,
            surface,
            Duration::from_secs(config.refresh_delay_seconds),
        );

        Self {
            poller,
            dispatcher,
            canned_rows: config.canned_rows,
            cancel,
            poll_task: Mutex::new(None),
        }
    }

    /// Start the periodic poll task. The first refresh fires immediately.
    /// Calling start twice is a no-op.
    pub async fn start(&self) {
        let mut task = self.poll_task.lock().await;
        if task.is_some() {
            tracing::debug!("Poll task already running");
            return;
        }

        let poller = self.poller.clone();
        *task = Some(tokio::spawn(async move { poller.run().await }));
        tracing::info!("Dashboard polling started");
    }

    /// Stop the poll task and wait for it to finish
    pub async fn stop(&self) {
        self.cancel.cancel();
        if let Some(task) = self.poll_task.lock().await.take() {
            let _ = task.await;
        }
        tracing::info!("Dashboard polling stopped");
    }

    /// Submit the canned row range configured for the fixed control
    pub async fn process_canned(&self) -> ActionOutcome {
        self.dispatcher.process_canned(self.canned_rows).await
    }

    /// Submit an operator-supplied row range
    pub async fn process_custom(&self, start: Option<i64>, end: Option<i64>) -> ActionOutcome {
        self.dispatcher.process_custom(start, end).await
    }
}
