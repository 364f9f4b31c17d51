use super::*;
use crate::error::RemapError;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory reader double; counts reads so tests can observe caching.
struct FakeReader {
    images: Option<serde_json::Value>,
    calls: AtomicUsize,
}

impl FakeReader {
    fn new(images: Option<serde_json::Value>) -> Self {
        Self {
            images,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Reader for FakeReader {
    fn unmarshal_key<T: DeserializeOwned>(&self, _key: &str) -> Result<Option<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.images {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                RemapError::config_with_source("Failed to unmarshal image override configurations", e)
            }),
        }
    }
}

fn rule(repository: &str, tag: &str) -> ImageRule {
    ImageRule {
        repository: repository.to_string(),
        tag: tag.to_string(),
    }
}

#[test]
fn test_resolve_without_configuration_returns_none() {
    let reader = FakeReader::new(None);
    let store = OverrideStore::new(&reader);

    assert_eq!(store.resolve("cert-manager").unwrap(), None);
}

#[test]
fn test_absent_configuration_is_cached() {
    let reader = FakeReader::new(None);
    let store = OverrideStore::new(&reader);

    assert_eq!(store.resolve("cert-manager").unwrap(), None);
    assert_eq!(store.resolve("cert-manager").unwrap(), None);
    assert_eq!(reader.calls(), 1);
}

#[test]
fn test_resolve_wildcard_only() {
    let reader = FakeReader::new(Some(json!({
        "all": { "repository": "myreg.io/myorg" }
    })));
    let store = OverrideStore::new(&reader);

    let resolved = store.resolve("cert-manager").unwrap().unwrap();
    assert_eq!(resolved, rule("myreg.io/myorg", ""));
}

#[test]
fn test_resolve_component_only() {
    let reader = FakeReader::new(Some(json!({
        "cert-manager": { "tag": "v1.14.4" }
    })));
    let store = OverrideStore::new(&reader);

    let resolved = store.resolve("cert-manager").unwrap().unwrap();
    assert_eq!(resolved, rule("", "v1.14.4"));
}

#[test]
fn test_resolve_component_wins_over_wildcard_per_field() {
    let reader = FakeReader::new(Some(json!({
        "all": { "repository": "wildcard.io/org", "tag": "stable" },
        "cert-manager": { "repository": "specific.io/org" }
    })));
    let store = OverrideStore::new(&reader);

    let resolved = store.resolve("cert-manager").unwrap().unwrap();
    assert_eq!(resolved, rule("specific.io/org", "stable"));
}

#[test]
fn test_resolve_unmatched_component_yields_empty_rule() {
    // The configuration exists but names neither "all" nor the component;
    // this resolves to an empty rule, not to the no-configuration marker.
    let reader = FakeReader::new(Some(json!({
        "other-component": { "tag": "v9" }
    })));
    let store = OverrideStore::new(&reader);

    let resolved = store.resolve("cert-manager").unwrap().unwrap();
    assert!(resolved.is_empty());
}

#[test]
fn test_resolve_is_cached_per_component() {
    let reader = FakeReader::new(Some(json!({
        "all": { "repository": "myreg.io/myorg" }
    })));
    let store = OverrideStore::new(&reader);

    let first = store.resolve("cert-manager").unwrap();
    let second = store.resolve("cert-manager").unwrap();
    assert_eq!(first, second);
    assert_eq!(reader.calls(), 1);
}

#[test]
fn test_components_resolve_independently() {
    let reader = FakeReader::new(Some(json!({
        "all": { "repository": "myreg.io/myorg" },
        "capi": { "tag": "v1.7.0" }
    })));
    let store = OverrideStore::new(&reader);

    assert_eq!(
        store.resolve("capi").unwrap().unwrap(),
        rule("myreg.io/myorg", "v1.7.0")
    );
    assert_eq!(
        store.resolve("cert-manager").unwrap().unwrap(),
        rule("myreg.io/myorg", "")
    );

    // One raw read per uncached component, then cache hits only.
    assert_eq!(reader.calls(), 2);
    store.resolve("capi").unwrap();
    store.resolve("cert-manager").unwrap();
    assert_eq!(reader.calls(), 2);
}

#[test]
fn test_unreadable_configuration_is_not_cached() {
    let reader = FakeReader::new(Some(json!("not a map")));
    let store = OverrideStore::new(&reader);

    for _ in 0..2 {
        let err = store.resolve("cert-manager").unwrap_err();
        assert!(matches!(err, RemapError::Config { .. }));
    }
    // Both calls hit the reader: failures are retried, not cached.
    assert_eq!(reader.calls(), 2);
}

#[test]
fn test_transient_failure_is_seen_fixed_on_retry() {
    // Nothing was cached on failure, so once the source is repaired the
    // next resolve picks up the fix.
    let reader = FlippingReader::new(json!("not a map"));
    let store = OverrideStore::new(&reader);

    assert!(store.resolve("cert-manager").is_err());

    reader.replace(json!({ "all": { "repository": "myreg.io/myorg" } }));
    assert_eq!(
        store.resolve("cert-manager").unwrap().unwrap(),
        rule("myreg.io/myorg", "")
    );
}

/// Reader double whose raw value can be swapped between reads.
struct FlippingReader {
    images: std::sync::Mutex<serde_json::Value>,
}

impl FlippingReader {
    fn new(images: serde_json::Value) -> Self {
        Self {
            images: std::sync::Mutex::new(images),
        }
    }

    fn replace(&self, images: serde_json::Value) {
        *self.images.lock().unwrap() = images;
    }
}

impl Reader for FlippingReader {
    fn unmarshal_key<T: DeserializeOwned>(&self, _key: &str) -> Result<Option<T>> {
        let value = self.images.lock().unwrap().clone();
        serde_json::from_value(value).map(Some).map_err(|e| {
            RemapError::config_with_source("Failed to unmarshal image override configurations", e)
        })
    }
}
