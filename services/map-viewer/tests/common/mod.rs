//! Test doubles for the identify HTTP seam.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;

use map_viewer::{FeatureInfoFetcher, IdentifyError};

/// Answers every request with the same JSON and remembers the URLs.
#[derive(Default)]
pub struct RecordingFetcher {
    pub response: Value,
    urls: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl RecordingFetcher {
    pub fn new(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeatureInfoFetcher for RecordingFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, IdentifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        Ok(self.response.clone())
    }
}

/// Holds each request until the test releases it.
///
/// Gates are keyed by URL so the test decides the order responses resolve in,
/// independent of the order tasks get polled.
#[derive(Default)]
pub struct GatedFetcher {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<Value, String>>>>,
}

impl GatedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a gate for `url`; send on the returned sender to resolve it.
    pub fn gate(&self, url: &str) -> oneshot::Sender<Result<Value, String>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(url.to_string(), rx);
        tx
    }
}

#[async_trait]
impl FeatureInfoFetcher for GatedFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, IdentifyError> {
        let gate = self.gates.lock().unwrap().remove(url);
        let gate = gate.ok_or_else(|| IdentifyError::Other(format!("no gate for {}", url)))?;
        match gate.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(IdentifyError::Other(message)),
            Err(_) => Err(IdentifyError::Other("gate dropped".to_string())),
        }
    }
}

/// Query parameters of a URL.
pub fn query_params(url: &str) -> HashMap<String, String> {
    url::Url::parse(url)
        .unwrap()
        .query_pairs()
        .into_owned()
        .collect()
}
