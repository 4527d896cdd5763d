use serde_json::{json, Value};

use crate::db::{KeyValueBackend, RecordStore};

/// Readiness of the persistence backend. The bool is false when the stored
/// collection cannot be read or parsed.
pub fn readyz<B: KeyValueBackend>(store: &RecordStore<B>) -> (bool, Value) {
    let status = store.status();

    if status.readable {
        (
            true,
            json!({
                "status": "ready",
                "service": "team-checkins",
                "version": env!("CARGO_PKG_VERSION"),
                "checks": { "storage": "ok" },
                "storage": status,
            }),
        )
    } else {
        (
            false,
            json!({
                "status": "not_ready",
                "service": "team-checkins",
                "version": env!("CARGO_PKG_VERSION"),
                "checks": { "storage": "failed" },
                "storage": status,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryBackend;

    #[test]
    fn test_readyz_ok_on_empty_storage() {
        let store = RecordStore::with_default_key(MemoryBackend::new());
        let (ready, body) = readyz(&store);
        assert!(ready);
        assert_eq!(body["checks"]["storage"], "ok");
        assert_eq!(body["service"], "team-checkins");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["storage"]["record_count"], 0);
    }

    #[test]
    fn test_readyz_fails_when_unreadable() {
        let backend = MemoryBackend::new();
        backend.set_fail_reads(true);
        let store = RecordStore::with_default_key(backend);
        let (ready, body) = readyz(&store);
        assert!(!ready);
        assert_eq!(body["status"], "not_ready");
        assert_eq!(body["service"], "team-checkins");
        assert!(body["storage"]["error"].is_string());
    }
}
