//! High-level API for the Remap library.
//!
//! This module provides the entry point most callers need: one engine
//! object that resolves a component's override configuration and applies
//! it to an image reference string.
//!
//! # Examples
//!
//! ```
//! use libremap::{ConfigReader, Remap};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reader = ConfigReader::from_yaml_str(
//!         r"
//! images:
//!   all:
//!     repository: myregistry.io/myorg
//! ",
//!     )?;
//!     let remap = Remap::new(reader);
//!
//!     let image = remap.alter_image("cert-manager", "quay.io/jetstack/cert-manager:v1.14.4")?;
//!     assert_eq!(image, "myregistry.io/myorg/cert-manager:v1.14.4");
//!     Ok(())
//! }
//! ```

use crate::error::Result;
use crate::store::{OverrideStore, Reader};

/// High-level interface for applying image override configurations.
///
/// `Remap` owns an [`OverrideStore`] and exposes the one operation the
/// surrounding manifest pipeline needs: rewriting a single image string on
/// behalf of a named component. Rules are resolved lazily and cached per
/// component, so calling this once per image found in a manifest stays
/// cheap.
pub struct Remap<R: Reader> {
    /// Resolves and caches per-component override rules.
    store: OverrideStore<R>,
}

impl<R: Reader> Remap<R> {
    /// Creates an engine over the given configuration reader.
    pub fn new(reader: R) -> Self {
        Self {
            store: OverrideStore::new(reader),
        }
    }

    /// Rewrites `image` according to the overrides configured for
    /// `component`.
    ///
    /// Returns the input unchanged when no override configuration exists
    /// or when the resolved rule overrides nothing. Fails with
    /// [`RemapError::Config`](crate::RemapError::Config) when the
    /// configuration cannot be deserialized and with
    /// [`RemapError::InvalidReference`](crate::RemapError::InvalidReference)
    /// when the image string (or the configured repository prefix) does
    /// not parse; neither failure is cached.
    pub fn alter_image(&self, component: &str, image: &str) -> Result<String> {
        match self.store.resolve(component)? {
            Some(rule) => rule.apply(image),
            None => Ok(image.to_string()),
        }
    }
}
