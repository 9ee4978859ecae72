//! Operator actions: row-processing requests and their lifecycle
//!
//! Each action runs a small per-control state machine:
//! Idle -> Submitting -> (Success | Failure) -> Idle. The two controls share
//! the result banner without serialization; the last settled response wins.

use std::sync::Arc;
use std::time::Duration;

use crate::api::BackendClient;
use crate::config::RowRange;
use crate::poller::Poller;
use crate::surface::{BannerTone, Control, ControlState, Surface};

const CONNECT_FAILED_TEXT: &str = "Error: Failed to connect to the server. Please try again.";
const UNKNOWN_ERROR_TEXT: &str = "Unknown error occurred";
const INVALID_RANGE_ALERT: &str =
    "Invalid row range. End row must be greater than or equal to start row.";

/// Terminal state of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Backend reported success
    Success,
    /// Backend reported failure, or the request never completed
    Failure,
    /// Validation rejected the input; no request was sent
    Blocked,
}

/// Handles the two user-initiated processing actions
pub struct Dispatcher {
    api: Arc<BackendClient>,
    surface: Arc<dyn Surface>,
    refresh_delay: Duration,
}

impl Dispatcher {
    pub fn new(api: Arc<BackendClient>, surface: Arc<dyn Surface>, refresh_delay: Duration) -> Self {
        Self {
            api,
            surface,
            refresh_delay,
        }
    }

    /// Canned action: process the configured fixed row range
    pub async fn process_canned(&self, range: RowRange) -> ActionOutcome {
        self.submit(Control::ProcessCanned, range).await
    }

    /// Custom action: validate the operator-supplied bounds, then submit.
    ///
    /// Both bounds must be present and start must be <= end. A violation
    /// raises a blocking alert and the state machine does not advance:
    /// the control stays enabled and no request is sent.
    pub async fn process_custom(&self, start: Option<i64>, end: Option<i64>) -> ActionOutcome {
        let range = match (start, end) {
            (Some(start), Some(end)) if start <= end => RowRange { start, end },
            _ => {
                self.surface.alert(INVALID_RANGE_ALERT);
                return ActionOutcome::Blocked;
            }
        };
        self.submit(Control::ProcessCustom, range).await
    }

    async fn submit(&self, control: Control, range: RowRange) -> ActionOutcome {
        self.surface.set_control(control, ControlState::Busy);
        self.surface.show_banner(
            BannerTone::Info,
            &format!(
                "Processing rows {} to {}. This may take a moment...",
                range.start, range.end
            ),
        );

        let outcome = match self.api.process_rows(range.start, range.end).await {
            Ok(result) if result.success => {
                self.surface.show_banner(
                    BannerTone::Success,
                    &format!(
                        "Success! Rows {} to {} have been processed. Check the activity log for details.",
                        range.start, range.end
                    ),
                );
                ActionOutcome::Success
            }
            Ok(result) => {
                let reason = result.error.as_deref().unwrap_or(UNKNOWN_ERROR_TEXT);
                self.surface
                    .show_banner(BannerTone::Danger, &format!("Error: {}", reason));
                ActionOutcome::Failure
            }
            Err(e) => {
                tracing::warn!("Row processing request failed: {}", e);
                self.surface.show_banner(BannerTone::Danger, CONNECT_FAILED_TEXT);
                ActionOutcome::Failure
            }
        };

        self.surface.set_control(control, ControlState::Ready);
        self.surface.refresh_icons();
        self.schedule_refresh();

        outcome
    }

    /// Exactly one follow-up refresh after the configured delay, whatever
    /// the outcome was.
    fn schedule_refresh(&self) {
        let api = Arc::clone(&self.api);
        let surface = Arc::clone(&self.surface);
        let delay = self.refresh_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            Poller::refresh(&api, surface.as_ref()).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{HttpResponse, MockHttpClient};
    use crate::surface::MockSurface;
    use mockall::Sequence;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const REFRESH_DELAY: Duration = Duration::from_secs(2);

    fn dispatcher_with(http: MockHttpClient, surface: MockSurface) -> Dispatcher {
        let api = Arc::new(BackendClient::new("http://localhost:5000", Arc::new(http)));
        Dispatcher::new(api, Arc::new(surface), REFRESH_DELAY)
    }

    fn http_returning(body: &'static str) -> (MockHttpClient, Arc<AtomicUsize>) {
        let posts = Arc::new(AtomicUsize::new(0));
        let posts_in_mock = Arc::clone(&posts);
        let mut mock = MockHttpClient::new();
        mock.expect_post_json().returning(move |_| {
            posts_in_mock.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                Ok(HttpResponse {
                    status: 200,
                    body: body.to_string(),
                })
            })
        });
        // The delayed follow-up refresh hits both read endpoints
        mock.expect_get().returning(|url| {
            let body = if url.ends_with("/api/status") {
                "{}".to_string()
            } else {
                "[]".to_string()
            };
            Box::pin(async move { Ok(HttpResponse { status: 200, body }) })
        });
        (mock, posts)
    }

    fn surface_expecting_banner(
        final_tone: BannerTone,
        final_text_check: fn(&str) -> bool,
    ) -> MockSurface {
        let mut surface = MockSurface::new();
        let mut seq = Sequence::new();
        surface
            .expect_set_control()
            .withf(|_, state| *state == ControlState::Busy)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        surface
            .expect_show_banner()
            .withf(|tone, text| *tone == BannerTone::Info && text.starts_with("Processing rows"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        surface
            .expect_show_banner()
            .withf(move |tone, text| *tone == final_tone && final_text_check(text))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        surface
            .expect_set_control()
            .withf(|_, state| *state == ControlState::Ready)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        surface
            .expect_refresh_icons()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        // Follow-up refresh lands here once the delay elapses
        surface.expect_show_counters().return_const(());
        surface.expect_replace_activity().return_const(());
        surface
    }

    #[tokio::test(start_paused = true)]
    async fn custom_success_names_the_range() {
        let (http, posts) = http_returning(r#"{"success": true}"#);
        let surface = surface_expecting_banner(BannerTone::Success, |text| {
            text.contains("Rows 3 to 9 have been processed")
        });
        let dispatcher = dispatcher_with(http, surface);

        let outcome = dispatcher.process_custom(Some(3), Some(9)).await;
        assert_eq!(outcome, ActionOutcome::Success);
        assert_eq!(posts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn canned_action_uses_configured_range() {
        let posts = Arc::new(AtomicUsize::new(0));
        let posts_in_mock = Arc::clone(&posts);
        let mut http = MockHttpClient::new();
        http.expect_post_json()
            .withf(|url| url.ends_with("/api/process/rows?start=26&end=27"))
            .times(1)
            .returning(move |_| {
                posts_in_mock.fetch_add(1, Ordering::SeqCst);
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 200,
                        body: r#"{"success": true}"#.to_string(),
                    })
                })
            });
        http.expect_get().returning(|_| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 200,
                    body: "[]".to_string(),
                })
            })
        });

        let surface = surface_expecting_banner(BannerTone::Success, |text| {
            text.contains("Rows 26 to 27 have been processed")
        });
        let dispatcher = dispatcher_with(http, surface);

        let outcome = dispatcher.process_canned(RowRange::default()).await;
        assert_eq!(outcome, ActionOutcome::Success);
        assert_eq!(posts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_shows_server_error_text() {
        let (http, _) = http_returning(r#"{"success": false, "error": "Sheet unavailable"}"#);
        let surface = surface_expecting_banner(BannerTone::Danger, |text| {
            text == "Error: Sheet unavailable"
        });
        let dispatcher = dispatcher_with(http, surface);

        let outcome = dispatcher.process_custom(Some(1), Some(2)).await;
        assert_eq!(outcome, ActionOutcome::Failure);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_without_error_text_uses_fallback() {
        let (http, _) = http_returning(r#"{"success": false}"#);
        let surface = surface_expecting_banner(BannerTone::Danger, |text| {
            text == "Error: Unknown error occurred"
        });
        let dispatcher = dispatcher_with(http, surface);

        let outcome = dispatcher.process_custom(Some(1), Some(2)).await;
        assert_eq!(outcome, ActionOutcome::Failure);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_shows_connection_banner() {
        let mut http = MockHttpClient::new();
        http.expect_post_json().returning(|_| {
            Box::pin(async { Err(crate::DashboardError::Http("connection refused".to_string())) })
        });
        http.expect_get().returning(|_| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 200,
                    body: "[]".to_string(),
                })
            })
        });

        let surface = surface_expecting_banner(BannerTone::Danger, |text| {
            text == "Error: Failed to connect to the server. Please try again."
        });
        let dispatcher = dispatcher_with(http, surface);

        let outcome = dispatcher.process_custom(Some(1), Some(2)).await;
        assert_eq!(outcome, ActionOutcome::Failure);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_range_alerts_and_sends_nothing() {
        for (start, end) in [(Some(9), Some(3)), (None, Some(3)), (Some(9), None), (None, None)] {
            let mut http = MockHttpClient::new();
            // No request of any kind may go out
            http.expect_post_json().times(0);
            http.expect_get().times(0);

            let mut surface = MockSurface::new();
            surface
                .expect_alert()
                .withf(|msg| msg.contains("Invalid row range"))
                .times(1)
                .return_const(());
            surface.expect_set_control().times(0);
            surface.expect_show_banner().times(0);

            let dispatcher = dispatcher_with(http, surface);
            let outcome = dispatcher.process_custom(start, end).await;
            assert_eq!(outcome, ActionOutcome::Blocked);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn equal_bounds_are_valid() {
        let (http, posts) = http_returning(r#"{"success": true}"#);
        let surface = surface_expecting_banner(BannerTone::Success, |text| {
            text.contains("Rows 5 to 5")
        });
        let dispatcher = dispatcher_with(http, surface);

        let outcome = dispatcher.process_custom(Some(5), Some(5)).await;
        assert_eq!(outcome, ActionOutcome::Success);
        assert_eq!(posts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn follow_up_refresh_fires_after_delay() {
        let gets = Arc::new(AtomicUsize::new(0));
        let gets_in_mock = Arc::clone(&gets);
        let mut http = MockHttpClient::new();
        http.expect_post_json().returning(|_| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 200,
                    body: r#"{"success": true}"#.to_string(),
                })
            })
        });
        http.expect_get().returning(move |url| {
            gets_in_mock.fetch_add(1, Ordering::SeqCst);
            let body = if url.ends_with("/api/status") {
                "{}".to_string()
            } else {
                "[]".to_string()
            };
            Box::pin(async move { Ok(HttpResponse { status: 200, body }) })
        });

        let surface = surface_expecting_banner(BannerTone::Success, |_| true);
        let dispatcher = dispatcher_with(http, surface);

        dispatcher.process_custom(Some(1), Some(2)).await;
        assert_eq!(gets.load(Ordering::SeqCst), 0);

        // The single follow-up refresh lands once the delay elapses
        tokio::time::sleep(REFRESH_DELAY + Duration::from_millis(10)).await;
        assert_eq!(gets.load(Ordering::SeqCst), 2);

        // And exactly once: no further refreshes later
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(gets.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_still_schedules_refresh() {
        let gets = Arc::new(AtomicUsize::new(0));
        let gets_in_mock = Arc::clone(&gets);
        let mut http = MockHttpClient::new();
        http.expect_post_json().returning(|_| {
            Box::pin(async { Err(crate::DashboardError::Http("timed out".to_string())) })
        });
        http.expect_get().returning(move |url| {
            gets_in_mock.fetch_add(1, Ordering::SeqCst);
            let body = if url.ends_with("/api/status") {
                "{}".to_string()
            } else {
                "[]".to_string()
            };
            Box::pin(async move { Ok(HttpResponse { status: 200, body }) })
        });

        let surface = surface_expecting_banner(BannerTone::Danger, |_| true);
        let dispatcher = dispatcher_with(http, surface);

        dispatcher.process_custom(Some(1), Some(2)).await;
        tokio::time::sleep(REFRESH_DELAY + Duration::from_millis(10)).await;
        assert_eq!(gets.load(Ordering::SeqCst), 2);
    }
}
