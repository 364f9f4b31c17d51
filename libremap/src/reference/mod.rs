//! Image reference parsing and manipulation.
//!
//! This module implements the distribution reference grammar,
//! `[registry/]path[:tag][@digest]`, together with the default-registry
//! normalization rule: a reference without a registry host is anchored to
//! `docker.io`, and a bare single-segment path gains the `library/`
//! namespace (`nginx` parses as `docker.io/library/nginx`). Serialization
//! always emits the fully qualified form, so parsing an already normalized
//! string and printing it back is stable.

use crate::digest::Digest;
use crate::error::{RemapError, Result};
use std::fmt;
use std::str::FromStr;


/// Registry assumed for references without an explicit registry host.
pub const DEFAULT_REGISTRY: &str = "docker.io";

/// Namespace prefixed to single-segment paths on the default registry.
pub const DEFAULT_NAMESPACE: &str = "library";

/// Maximum total length of the normalized `registry/repository` name.
const NAME_TOTAL_LENGTH_MAX: usize = 255;

/// Maximum length of a tag.
const TAG_LENGTH_MAX: usize = 128;

/// A parsed, normalized image reference.
///
/// The registry and repository are always concrete after parsing; tag and
/// digest are optional, and a reference may carry both at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    registry: String,
    repository: String,
    tag: Option<String>,
    digest: Option<Digest>,
}

impl FromStr for Reference {
    type Err = RemapError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(RemapError::invalid_reference("image reference is empty"));
        }

        // The digest comes after '@'; the tag after the last ':' unless
        // that colon belongs to a registry port.
        let (rest, digest) = match s.split_once('@') {
            Some((rest, raw)) => (rest, Some(Digest::from_str(raw)?)),
            None => (s, None),
        };
        let (name, tag) = match rest.rsplit_once(':') {
            Some((name, candidate)) if !candidate.contains('/') => {
                validate_tag(candidate)?;
                (name, Some(candidate.to_string()))
            }
            _ => (rest, None),
        };

        // The leading path token is a registry host only when it looks
        // like one: it contains '.' or ':', or is exactly "localhost".
        let (registry, mut repository) = match name.split_once('/') {
            Some((host, path)) if is_registry_token(host) => (host.to_string(), path.to_string()),
            _ => (DEFAULT_REGISTRY.to_string(), name.to_string()),
        };
        if registry == DEFAULT_REGISTRY && !repository.contains('/') {
            repository = format!("{}/{}", DEFAULT_NAMESPACE, repository);
        }

        validate_registry(&registry)?;
        validate_repository(&repository)?;
        if registry.len() + 1 + repository.len() > NAME_TOTAL_LENGTH_MAX {
            return Err(RemapError::invalid_reference(format!(
                "repository name '{}/{}' exceeds {} characters",
                registry, repository, NAME_TOTAL_LENGTH_MAX
            )));
        }

        Ok(Reference {
            registry,
            repository,
            tag,
            digest,
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.registry, self.repository)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}

impl Reference {
    /// Returns the registry part of the reference.
    pub fn registry(&self) -> &str {
        &self.registry
    }

    /// Returns the repository part of the reference.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the tag part of the reference, if present.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns the digest part of the reference, if present.
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_ref().map(Digest::as_str)
    }

    /// Returns the full `registry/repository` name, without tag or digest.
    pub fn name(&self) -> String {
        format!("{}/{}", self.registry, self.repository)
    }

    /// Returns the final path segment of the repository.
    ///
    /// This is the image's base name once any registry and namespace
    /// prefixes are dropped: `gcr.io/my-project/my-image` yields
    /// `my-image`.
    pub fn leaf_name(&self) -> &str {
        match self.repository.rfind('/') {
            Some(index) => &self.repository[index + 1..],
            None => &self.repository,
        }
    }

    /// Returns a copy of this reference with the given tag.
    ///
    /// The digest, if any, is left in place.
    pub fn with_tag(&self, tag: &str) -> Result<Self> {
        validate_tag(tag)?;
        Ok(Reference {
            tag: Some(tag.to_string()),
            ..self.clone()
        })
    }

    /// Returns a copy of this reference with the given digest.
    ///
    /// The tag, if any, is left in place.
    pub fn with_digest(&self, digest: &str) -> Result<Self> {
        Ok(Reference {
            digest: Some(Digest::from_str(digest)?),
            ..self.clone()
        })
    }

    /// Returns a copy of this reference with tag and digest dropped.
    pub fn trimmed(&self) -> Self {
        Reference {
            tag: None,
            digest: None,
            ..self.clone()
        }
    }
}

fn is_registry_token(token: &str) -> bool {
    token.contains('.') || token.contains(':') || token == "localhost"
}

// host[:port]; host labels of alphanumerics and inner '-' joined by '.',
// port all digits.
fn validate_registry(registry: &str) -> Result<()> {
    let (host, port) = match registry.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (registry, None),
    };
    if let Some(port) = port {
        if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
            return Err(RemapError::invalid_reference(format!(
                "invalid port in registry '{}'",
                registry
            )));
        }
    }
    if host.is_empty() {
        return Err(RemapError::invalid_reference(format!(
            "invalid registry '{}'",
            registry
        )));
    }
    for label in host.split('.') {
        let valid = !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(RemapError::invalid_reference(format!(
                "invalid registry host '{}'",
                host
            )));
        }
    }
    Ok(())
}

fn validate_repository(repository: &str) -> Result<()> {
    if repository.is_empty() {
        return Err(RemapError::invalid_reference("repository path is empty"));
    }
    for component in repository.split('/') {
        validate_path_component(component, repository)?;
    }
    Ok(())
}

// Lowercase alphanumeric runs joined by separators; a separator is a
// single '.', a single '_', a double '__', or a run of '-'.
fn validate_path_component(component: &str, repository: &str) -> Result<()> {
    let invalid = || {
        RemapError::invalid_reference(format!("invalid repository path '{}'", repository))
    };

    if component.is_empty() {
        return Err(invalid());
    }

    let mut separator = String::new();
    let mut seen_alphanumeric = false;
    for c in component.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if !separator.is_empty() && !is_path_separator(&separator) {
                return Err(invalid());
            }
            separator.clear();
            seen_alphanumeric = true;
        } else if c == '.' || c == '_' || c == '-' {
            if !seen_alphanumeric {
                return Err(invalid());
            }
            separator.push(c);
        } else {
            return Err(invalid());
        }
    }
    if !separator.is_empty() {
        return Err(invalid());
    }
    Ok(())
}

fn is_path_separator(separator: &str) -> bool {
    matches!(separator, "." | "_" | "__") || separator.bytes().all(|b| b == b'-')
}

fn validate_tag(tag: &str) -> Result<()> {
    let invalid = || RemapError::invalid_reference(format!("invalid tag '{}'", tag));

    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() || first == '_' => {}
        _ => return Err(invalid()),
    }
    if tag.len() > TAG_LENGTH_MAX
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
    {
        return Err(invalid());
    }
    Ok(())
}
