use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::HeaderValue;
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use resfi::config::ServerConfig;
use resfi::registry::{RepositoryError, WaitlistEntry, WaitlistRepository};
use resfi::waitlist::{Goal, WaitlistPayload};
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Vec-backed store standing in for a real database. Duplicate detection is
/// keyed on the already-lowercased email.
#[derive(Default)]
pub(crate) struct InMemoryWaitlistRepository {
    entries: Mutex<Vec<WaitlistEntry>>,
    next_id: AtomicU64,
}

impl WaitlistRepository for InMemoryWaitlistRepository {
    fn insert(&self, payload: WaitlistPayload) -> Result<WaitlistEntry, RepositoryError> {
        let mut entries = self.entries.lock().expect("repository mutex poisoned");
        if entries.iter().any(|entry| entry.email == payload.email) {
            return Err(RepositoryError::Duplicate);
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let entry = WaitlistEntry::from_payload(id, payload, Utc::now());
        entries.push(entry.clone());
        Ok(entry)
    }

    fn all(&self) -> Result<Vec<WaitlistEntry>, RepositoryError> {
        Ok(self
            .entries
            .lock()
            .expect("repository mutex poisoned")
            .clone())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.entries.lock().expect("repository mutex poisoned").len())
    }
}

pub(crate) fn parse_goal(raw: &str) -> Result<Goal, String> {
    raw.parse()
}

pub(crate) fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if server.allows_any_origin() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
