//! Identify (GetFeatureInfo) results and the panel that shows them.

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum IdentifyError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON in feature info response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Outcome of one identify request.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifyResult {
    Success(Value),
    Failure(String),
}

impl IdentifyResult {
    /// JSON shown in the panel. Failures display as `{"error": "..."}`.
    pub fn to_json(&self) -> Value {
        match self {
            IdentifyResult::Success(value) => value.clone(),
            IdentifyResult::Failure(message) => json!({ "error": message }),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, IdentifyResult::Success(_))
    }
}

impl From<Result<Value, IdentifyError>> for IdentifyResult {
    fn from(result: Result<Value, IdentifyError>) -> Self {
        match result {
            Ok(value) => IdentifyResult::Success(value),
            Err(e) => IdentifyResult::Failure(e.to_string()),
        }
    }
}

/// Holds the most recently published result.
///
/// Every publish replaces the previous value wholesale; whichever request
/// finishes last is what the panel shows.
#[derive(Debug)]
pub struct IdentifyPanel {
    tx: Arc<watch::Sender<Option<IdentifyResult>>>,
}

impl Default for IdentifyPanel {
    fn default() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }
}

impl IdentifyPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for background tasks to publish into.
    pub fn publisher(&self) -> Arc<watch::Sender<Option<IdentifyResult>>> {
        Arc::clone(&self.tx)
    }

    pub fn current(&self) -> Option<IdentifyResult> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<IdentifyResult>> {
        self.tx.subscribe()
    }

    /// Pretty-printed panel text; `null` before the first result.
    pub fn render(&self) -> String {
        render_json(self.tx.borrow().as_ref())
    }
}

fn render_json(result: Option<&IdentifyResult>) -> String {
    let value = result.map(IdentifyResult::to_json).unwrap_or(Value::Null);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "null".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_renders_as_error_object() {
        let failure = IdentifyResult::Failure("connection refused".to_string());
        assert_eq!(failure.to_json(), json!({"error": "connection refused"}));
        assert!(!failure.is_success());
    }

    #[test]
    fn test_empty_panel_renders_null() {
        assert_eq!(IdentifyPanel::new().render(), "null");
    }

    #[test]
    fn test_publish_replaces_previous() {
        let panel = IdentifyPanel::new();
        let publisher = panel.publisher();
        publisher.send_replace(Some(IdentifyResult::Success(json!({"features": []}))));
        publisher.send_replace(Some(IdentifyResult::Failure("boom".into())));
        assert_eq!(
            panel.current(),
            Some(IdentifyResult::Failure("boom".into()))
        );
        assert!(panel.render().contains("\"error\": \"boom\""));
    }

    #[test]
    fn test_subscriber_wakes_on_publish() {
        let panel = IdentifyPanel::new();
        let mut rx = panel.subscribe();
        panel
            .publisher()
            .send_replace(Some(IdentifyResult::Success(json!({"features": []}))));

        tokio_test::block_on(rx.changed()).unwrap();
        assert!(rx.borrow().as_ref().is_some_and(IdentifyResult::is_success));
    }

    #[test]
    fn test_from_result() {
        let err: Result<Value, IdentifyError> = Err(IdentifyError::Other("nope".into()));
        assert_eq!(IdentifyResult::from(err), IdentifyResult::Failure("nope".into()));
    }
}
