//! Typed client for the publishing backend's dashboard API

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::io::HttpClient;

/// Counter snapshot as returned by /api/status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub pending_posts: i64,
    #[serde(default)]
    pub published_today: i64,
    #[serde(default)]
    pub error_count: i64,
}

/// One activity log entry as returned by /api/logs
///
/// Every field tolerates absence; the backend has emitted both `time`
/// and `timestamp` over its lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub details: String,
}

impl ActivityEntry {
    /// The raw timestamp string, preferring `time` over `timestamp`
    pub fn raw_time(&self) -> &str {
        self.time
            .as_deref()
            .or(self.timestamp.as_deref())
            .unwrap_or("")
    }
}

/// Outcome of a row-processing request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the backend's dashboard endpoints
pub struct BackendClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BackendClient {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Fetch the current counter snapshot
    pub async fn fetch_status(&self) -> crate::Result<StatusSnapshot> {
        let url = format!("{}/api/status", self.base_url);
        let response = self.http.get(&url).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Fetch the activity log, in server-determined order
    pub async fn fetch_activity(&self) -> crate::Result<Vec<ActivityEntry>> {
        let url = format!("{}/api/logs", self.base_url);
        let response = self.http.get(&url).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Submit a row-processing request for the inclusive range [start, end].
    ///
    /// The backend reports application-level failures inside the body
    /// (`success: false`, possibly with a non-2xx status), so the body is
    /// parsed regardless of status code. Only transport and parse errors
    /// surface as `Err`.
    pub async fn process_rows(&self, start: i64, end: i64) -> crate::Result<ProcessOutcome> {
        let url = format!(
            "{}/api/process/rows?start={}&end={}",
            self.base_url, start, end
        );
        let response = self.http.post_json(&url).await?;
        Ok(serde_json::from_str(&response.body)?)
    }
}
