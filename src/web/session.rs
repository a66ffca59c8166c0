// Per-upload sessions.
//
// Each POST /api/similarity creates a session holding the report it produced;
// downloads and resets name the session explicitly. Concurrent users never
// share state, and stale sessions are pruned by age.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use tokio::sync::RwLock;

use crate::similarity::SimilarityReport;

#[derive(Debug, Clone)]
pub struct UploadSession {
    pub report: SimilarityReport,
    pub created_at: DateTime<Utc>,
}

/// Shared map of session id to upload session.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, UploadSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a report under a fresh session id and return the id.
    pub async fn insert(&self, report: SimilarityReport) -> String {
        let id = new_session_id();
        let session = UploadSession {
            report,
            created_at: Utc::now(),
        };
        self.inner.write().await.insert(id.clone(), session);
        id
    }

    pub async fn report(&self, id: &str) -> Option<SimilarityReport> {
        self.inner.read().await.get(id).map(|s| s.report.clone())
    }

    /// Forget a session. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        self.inner.write().await.remove(id).is_some()
    }

    /// Drop sessions older than `ttl`. Returns how many were removed.
    pub async fn prune(&self, ttl: Duration) -> usize {
        let cutoff = Utc::now() - ttl;
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.created_at >= cutoff);
        before - sessions.len()
    }

}

/// 128 random bits, hex-encoded.
pub fn new_session_id() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
