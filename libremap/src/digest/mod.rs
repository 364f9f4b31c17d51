//! Content digest validation and formatting.
//!
//! A digest pins a reference to exact image content. It has the form
//! `algorithm:hex`, e.g. `sha256:e3b0c442...`; the hex encoding must be at
//! least [`MIN_ENCODED_LENGTH`] digits.

use crate::error::{RemapError, Result};
use std::fmt;
use std::str::FromStr;


/// Minimum number of hex digits in the encoded portion of a digest.
pub const MIN_ENCODED_LENGTH: usize = 32;

/// A validated content digest of the form `algorithm:hex`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest(String);

impl FromStr for Digest {
    type Err = RemapError;

    fn from_str(s: &str) -> Result<Self> {
        let (algorithm, encoded) = s.split_once(':').ok_or_else(|| {
            RemapError::invalid_reference(format!("digest '{}' has no algorithm separator", s))
        })?;
        validate_algorithm(algorithm)?;
        validate_encoded(encoded)?;
        Ok(Digest(s.to_string()))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Digest {
    /// Returns the full `algorithm:hex` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the algorithm portion, e.g. `sha256`.
    pub fn algorithm(&self) -> &str {
        self.0.split(':').next().unwrap_or("")
    }
}

// Algorithm parts are lowercase alphanumerics starting with a letter,
// joined by '+', '.', '_' or '-' (e.g. `sha256`, `sha512+b3`).
fn validate_algorithm(algorithm: &str) -> Result<()> {
    if algorithm.is_empty() {
        return Err(RemapError::invalid_reference("digest algorithm is empty"));
    }
    for part in algorithm.split(['+', '.', '_', '-']) {
        let mut chars = part.chars();
        let valid = match chars.next() {
            Some(first) => {
                first.is_ascii_lowercase()
                    && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            }
            None => false,
        };
        if !valid {
            return Err(RemapError::invalid_reference(format!(
                "invalid digest algorithm '{}'",
                algorithm
            )));
        }
    }
    Ok(())
}

fn validate_encoded(encoded: &str) -> Result<()> {
    if encoded.len() < MIN_ENCODED_LENGTH || !encoded.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(RemapError::invalid_reference(format!(
            "invalid digest encoding '{}'",
            encoded
        )));
    }
    Ok(())
}
