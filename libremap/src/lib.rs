//! Remap - Image Reference Override Library
//!
//! Remap rewrites container image references according to per-component
//! override configurations, so the images named in manifests can be pulled
//! from a private registry or pinned to a specific tag without editing the
//! manifests themselves.
//!
//! # Quick Start
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
//!   cert-manager:
//!     tag: v1.14.4
//! ",
//!     )?;
//!     let remap = Remap::new(reader);
//!
//!     let image = remap.alter_image("cert-manager", "quay.io/jetstack/cert-manager:v1.5.3")?;
//!     assert_eq!(image, "myregistry.io/myorg/cert-manager:v1.14.4");
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - **Two-level overrides**: a wildcard `all` rule layered under
//!   component-specific rules, merged field by field
//! - **Grammar-faithful rewriting**: references are parsed and
//!   re-serialized against the distribution reference grammar, preserving
//!   tags and digests across repository relocation
//! - **Lazy, cached resolution**: the raw configuration is read once per
//!   component and the merged rule cached for the engine's lifetime
//! - **Pluggable configuration**: any source implementing the [`Reader`]
//!   capability can supply overrides; a YAML-backed [`ConfigReader`] ships
//!   in the crate
//!
//! # Main Types
//!
//! - [`Remap`] - Main entry point, rewrites one image per call
//! - [`ConfigReader`] - YAML/file configuration source
//! - [`ImageRule`] - A repository/tag override and its merge rules
//! - [`Reference`] - Image reference parsing and manipulation
//! - [`Digest`] - Content digest validation
//!
//! # Architecture
//!
//! The high-level [`Remap`] engine composes the low-level modules: the
//! `store` resolves and caches rules through an injected `Reader`
//! capability, and the `rule` rewriter applies them by parsing and
//! re-serializing references via the `reference` module. The low-level
//! modules stay available for callers that need fine-grained control, but
//! are not shown in the documentation by default.

#![warn(clippy::all)]

/// Returns the libremap crate version.
///
/// # Examples
///
/// ```
/// let version = libremap::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// High-level public API (main entry point)
mod remap;
pub use remap::Remap;

// Re-export commonly used types for convenience
pub use config::ConfigReader;
pub use digest::Digest;
pub use error::{RemapError, Result};
pub use reference::Reference;
pub use rule::ImageRule;
pub use store::{OverrideStore, Reader};

// Low-level implementation modules (hidden from docs but still public)
// These are available for advanced users who need fine-grained control
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod digest;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod reference;
#[doc(hidden)]
pub mod rule;
#[doc(hidden)]
pub mod store;
