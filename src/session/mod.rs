//! Session-blob persistence interface (spec §6). The HTTP ingress and the
//! actual store (in-process LRU or a TTL'd external key-value store) are
//! external collaborators out of scope for this crate; this module defines
//! only the data shape and the trait boundary, plus one reference
//! in-memory implementation a caller may use as-is or replace.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::digitizer::DebugOverlay;
use crate::types::{Bitmap, GridModel, LeadSignal};

/// Everything an in-flight digitization request needs to resume from, keyed
/// by session id. Mirrors the original system's `{file_bytes, is_pdf, gray,
/// overlay, grid, digitized, warnings, ready}` shape.
#[derive(Debug, Clone)]
pub struct SessionBlob {
    pub file_bytes: Vec<u8>,
    pub is_pdf: bool,
    pub gray: Option<Bitmap>,
    pub overlay: Option<DebugOverlay>,
    pub grid: Option<GridModel>,
    pub digitized: Option<Vec<LeadSignal>>,
    pub warnings: Vec<String>,
    pub ready: bool,
}

pub trait SessionStore {
    fn get(&self, session_id: &str) -> Option<SessionBlob>;
    fn put(&mut self, session_id: String, blob: SessionBlob, ttl: Option<Duration>);
    fn evict(&mut self, session_id: &str);
}

struct Entry {
    blob: SessionBlob,
    expires_at: Option<Instant>,
    last_touched: Instant,
}

/// LRU-with-TTL in-memory reference implementation. Eviction happens lazily
/// on `get`/`put`, not on a background timer — matching the core's
/// synchronous, no-component-calls-upward posture.
pub struct InMemorySessionStore {
    capacity: usize,
    default_ttl: Option<Duration>,
    entries: HashMap<String, Entry>,
}

impl InMemorySessionStore {
    pub fn new(capacity: usize, default_ttl: Option<Duration>) -> Self {
        Self {
            capacity,
            default_ttl,
            entries: HashMap::new(),
        }
    }

    fn evict_expired(&mut self) {
        let now = Instant::now();
        self.entries.retain(|_, e| e.expires_at.map_or(true, |exp| exp > now));
    }

    fn evict_lru_if_over_capacity(&mut self) {
        while self.entries.len() > self.capacity {
            if let Some(oldest_key) = self.entries.iter().min_by_key(|(_, e)| e.last_touched).map(|(k, _)| k.clone()) {
                self.entries.remove(&oldest_key);
            } else {
                break;
            }
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Option<SessionBlob> {
        let now = Instant::now();
        self.entries.get(session_id).filter(|e| e.expires_at.map_or(true, |exp| exp > now)).map(|e| e.blob.clone())
    }

    fn put(&mut self, session_id: String, blob: SessionBlob, ttl: Option<Duration>) {
        self.evict_expired();
        let ttl = ttl.or(self.default_ttl);
        let now = Instant::now();
        self.entries.insert(
            session_id,
            Entry {
                blob,
                expires_at: ttl.map(|d| now + d),
                last_touched: now,
            },
        );
        self.evict_lru_if_over_capacity();
    }

    fn evict(&mut self, session_id: &str) {
        self.entries.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LeadLabel;

    fn blob() -> SessionBlob {
        SessionBlob {
            file_bytes: vec![1, 2, 3],
            is_pdf: false,
            gray: None,
            overlay: None,
            grid: None,
            digitized: Some(vec![LeadSignal::failed(LeadLabel::II, "test")]),
            warnings: vec![],
            ready: false,
        }
    }

    #[test]
    fn put_then_get_round_trips() {
        let mut store = InMemorySessionStore::new(10, None);
        store.put("abc".to_string(), blob(), None);
        assert!(store.get("abc").is_some());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut store = InMemorySessionStore::new(1, None);
        store.put("first".to_string(), blob(), None);
        store.put("second".to_string(), blob(), None);
        assert!(store.get("first").is_none());
        assert!(store.get("second").is_some());
    }

    #[test]
    fn ttl_expiry_evicts_on_access() {
        let mut store = InMemorySessionStore::new(10, None);
        store.put("expiring".to_string(), blob(), Some(Duration::from_millis(0)));
        std::thread::sleep(Duration::from_millis(5));
        assert!(store.get("expiring").is_none());
    }

    #[test]
    fn explicit_evict_removes_entry() {
        let mut store = InMemorySessionStore::new(10, None);
        store.put("abc".to_string(), blob(), None);
        store.evict("abc");
        assert!(store.get("abc").is_none());
    }
}
