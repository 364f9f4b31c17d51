//! Override rules and the reference rewriter.
//!
//! An [`ImageRule`] describes how to transform the image references found
//! in manifests: relocate them under a different registry/repository
//! prefix, pin them to a tag, or both.

use crate::error::Result;
use crate::reference::Reference;
use serde::{Deserialize, Serialize};
use std::str::FromStr;


/// A transformation to apply to an image reference.
///
/// An empty field means "no override for that part"; merging never resets
/// a previously set field back to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRule {
    /// Replacement registry and path prefix, e.g. `myregistry.io/myorg`.
    #[serde(default)]
    pub repository: String,

    /// Replacement tag.
    #[serde(default)]
    pub tag: String,
}

impl ImageRule {
    /// Returns true when the rule overrides nothing.
    pub fn is_empty(&self) -> bool {
        self.repository.is_empty() && self.tag.is_empty()
    }

    /// Merges `other` into `self`; fields set on `other` win.
    pub fn union(&mut self, other: &ImageRule) {
        if !other.repository.is_empty() {
            self.repository = other.repository.clone();
        }
        if !other.tag.is_empty() {
            self.tag = other.tag.clone();
        }
    }

    /// Rewrites `image` according to this rule.
    ///
    /// An empty rule returns the input unchanged. A repository override
    /// keeps only the image's leaf name and relocates it under the new
    /// prefix, carrying the original tag and digest over. A tag override
    /// replaces the tag and drops any digest, since the old digest no
    /// longer identifies what the new tag points at.
    pub fn apply(&self, image: &str) -> Result<String> {
        if self.is_empty() {
            return Ok(image.to_string());
        }

        let mut reference = Reference::from_str(image)?;

        if !self.repository.is_empty() {
            let tag = reference.tag().map(str::to_string);
            let digest = reference.digest().map(str::to_string);

            let relocated = format!(
                "{}/{}",
                self.repository.trim_end_matches('/'),
                reference.leaf_name()
            );
            reference = Reference::from_str(&relocated)?;

            if let Some(tag) = &tag {
                reference = reference.with_tag(tag)?;
            }
            if let Some(digest) = &digest {
                reference = reference.with_digest(digest)?;
            }
        }

        if !self.tag.is_empty() {
            reference = reference.trimmed().with_tag(&self.tag)?;
        }

        Ok(reference.to_string())
    }
}
