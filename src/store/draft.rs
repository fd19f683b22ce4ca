//! Draft snapshots and the debounced draft store
//!
//! Drafts give the form session persistence: the latest raw values survive a
//! process restart and are re-validated on load. Persistence is best-effort;
//! a failed write is logged and noted, never surfaced as a fault.

use super::backend::StorageBackend;
use crate::form::FormValues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// A serializable copy of a form's raw values.
///
/// Only raw values are stored; validity is always recomputed on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub values: FormValues,
    /// Monotonic per-store counter, bumped for every distinct snapshot
    pub version: u64,
    pub saved_at: DateTime<Utc>,
}

impl DraftSnapshot {
    fn new(values: FormValues, version: u64) -> Self {
        Self {
            values,
            version,
            saved_at: Utc::now(),
        }
    }
}

/// Debounce and versioning policy over a storage backend.
///
/// Rapid edits coalesce to at most one write per debounce window; the
/// pending write always carries the latest snapshot (last value wins).
/// `flush` forces the pending write on blur or a submit attempt.
pub struct DraftStore {
    backend: Box<dyn StorageBackend>,
    window: Duration,
    version: u64,
    pending: HashMap<String, DraftSnapshot>,
    last_write_at: HashMap<String, Instant>,
    last_persisted: HashMap<String, FormValues>,
    notice: Option<String>,
}

impl DraftStore {
    pub fn new(backend: Box<dyn StorageBackend>, window: Duration) -> Self {
        Self {
            backend,
            window,
            version: 0,
            pending: HashMap::new(),
            last_write_at: HashMap::new(),
            last_persisted: HashMap::new(),
            notice: None,
        }
    }

    /// Record the latest values for a form key.
    ///
    /// Writes immediately when outside the debounce window, otherwise parks
    /// the snapshot until the next `tick` or `flush`. Saving values equal to
    /// what is already persisted is a no-op.
    pub async fn save(&mut self, form_key: &str, values: FormValues) {
        if self.last_persisted.get(form_key) == Some(&values) {
            self.pending.remove(form_key);
            return;
        }

        self.version += 1;
        let snapshot = DraftSnapshot::new(values, self.version);

        let due = self
            .last_write_at
            .get(form_key)
            .map_or(true, |t| t.elapsed() >= self.window);
        if due {
            self.write(form_key, snapshot).await;
        } else {
            self.pending.insert(form_key.to_string(), snapshot);
        }
    }

    /// Flush pending snapshots whose debounce window has elapsed
    pub async fn tick(&mut self) {
        let due: Vec<String> = self
            .pending
            .keys()
            .filter(|key| {
                self.last_write_at
                    .get(*key)
                    .map_or(true, |t| t.elapsed() >= self.window)
            })
            .cloned()
            .collect();
        for key in due {
            if let Some(snapshot) = self.pending.remove(&key) {
                self.write(&key, snapshot).await;
            }
        }
    }

    /// Force the pending snapshot for a form key out immediately
    pub async fn flush(&mut self, form_key: &str) {
        if let Some(snapshot) = self.pending.remove(form_key) {
            self.write(form_key, snapshot).await;
        }
    }

    /// Latest snapshot for a form key, or None.
    ///
    /// A pending (not yet written) snapshot wins over the persisted one.
    /// Backend or decode failures are absorbed and logged.
    pub async fn load(&mut self, form_key: &str) -> Option<DraftSnapshot> {
        if let Some(snapshot) = self.pending.get(form_key) {
            return Some(snapshot.clone());
        }
        match self.backend.get(form_key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!(form_key, error = %e, "stored draft is unreadable, ignoring");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(form_key, error = %e, "failed to load draft");
                None
            }
        }
    }

    /// Remove any draft for a form key (called after a successful submit)
    pub async fn clear(&mut self, form_key: &str) {
        self.pending.remove(form_key);
        self.last_persisted.remove(form_key);
        self.last_write_at.remove(form_key);
        if let Err(e) = self.backend.delete(form_key).await {
            warn!(form_key, error = %e, "failed to clear draft");
            self.notice = Some("draft could not be removed".to_string());
        }
    }

    /// Low-priority persistence notice, if any (consumed on read)
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Whether a snapshot is parked awaiting its debounce window
    pub fn has_pending(&self, form_key: &str) -> bool {
        self.pending.contains_key(form_key)
    }

    async fn write(&mut self, form_key: &str, snapshot: DraftSnapshot) {
        let raw = match serde_json::to_string(&snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(form_key, error = %e, "failed to encode draft");
                self.notice = Some("draft could not be saved".to_string());
                return;
            }
        };
        match self.backend.set(form_key, raw).await {
            Ok(()) => {
                debug!(form_key, version = snapshot.version, "draft persisted");
                self.last_write_at.insert(form_key.to_string(), Instant::now());
                self.last_persisted
                    .insert(form_key.to_string(), snapshot.values);
            }
            Err(e) => {
                warn!(form_key, error = %e, "failed to persist draft");
                self.notice = Some("draft could not be saved".to_string());
            }
        }
    }
}
