//! Override resolution and caching.
//!
//! This module loads the raw override configuration through an injected
//! [`Reader`] capability, merges wildcard and component-specific rules,
//! and caches the result per component for the lifetime of the store.

use crate::error::Result;
use crate::rule::ImageRule;
use log::debug;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;

#[cfg(test)]
mod tests;

/// Configuration key holding the raw override map.
pub const IMAGES_KEY: &str = "images";

/// Map entry applied to every component before its own entry.
pub const ALL_KEY: &str = "all";

/// Capability for reading a typed value out of a configuration source.
///
/// `Ok(None)` means the key is absent, a legitimate steady state (no
/// overrides configured); an error means the key exists but does not
/// deserialize into the requested shape. Implementations must be
/// idempotent and free of side effects, since the store may read the same
/// key once per component.
pub trait Reader {
    fn unmarshal_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>;
}

impl<R: Reader + ?Sized> Reader for &R {
    fn unmarshal_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        (**self).unmarshal_key(key)
    }
}

/// Loads, merges, and caches per-component override rules.
pub struct OverrideStore<R: Reader> {
    reader: R,
    /// Resolved rules per component. `None` marks "no override
    /// configuration exists at all"; entries are written once and never
    /// evicted, the configuration source being immutable for the process
    /// lifetime.
    cache: Mutex<HashMap<String, Option<ImageRule>>>,
}

impl<R: Reader> OverrideStore<R> {
    /// Creates a store over the given configuration reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves the effective override rule for `component`.
    ///
    /// The first call per component reads the raw override map under
    /// [`IMAGES_KEY`] and unions the [`ALL_KEY`] entry with the
    /// component's own entry, the latter winning per field. The result is
    /// cached, so later calls never touch the reader again. A read
    /// failure is propagated without touching the cache; the next call
    /// retries the read, so a retried invocation sees transient fixes.
    ///
    /// Returns `None` when no override configuration exists at all.
    pub fn resolve(&self, component: &str) -> Result<Option<ImageRule>> {
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(resolved) = cache.get(component) {
            return Ok(resolved.clone());
        }

        let raw: Option<HashMap<String, ImageRule>> = self.reader.unmarshal_key(IMAGES_KEY)?;
        let Some(raw) = raw else {
            debug!("no image override configuration found");
            cache.insert(component.to_string(), None);
            return Ok(None);
        };

        let mut rule = ImageRule::default();
        if let Some(all) = raw.get(ALL_KEY) {
            rule.union(all);
        }
        if let Some(specific) = raw.get(component) {
            rule.union(specific);
        }
        debug!(
            "resolved image overrides for component '{}': {:?}",
            component, rule
        );

        cache.insert(component.to_string(), Some(rule.clone()));
        Ok(Some(rule))
    }
}
