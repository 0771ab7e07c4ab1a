//! Derivation path parsing and tree walks.

use std::fmt;
use std::str::FromStr;

use crate::extended_key::{ExtendedPrivKey, ExtendedPubKey, HARDENED_OFFSET};
use crate::KeyError;

/// A BIP-32 derivation path such as `m/44'/0'/0'/0/1`.
///
/// Hardened segments carry the offset in their stored index; `'` and `h`
/// are both accepted as the hardened suffix when parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// The raw child indices, hardened offset included.
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Walk the path downward from a private parent.
    pub fn derive_priv(&self, parent: &ExtendedPrivKey) -> Result<ExtendedPrivKey, KeyError> {
        let mut key = parent.clone();
        for &index in &self.0 {
            key = key.derive_child(index)?;
        }
        Ok(key)
    }

    /// Walk the path downward from a public parent; hardened segments
    /// fail because they need the private scalar.
    pub fn derive_pub(&self, parent: &ExtendedPubKey) -> Result<ExtendedPubKey, KeyError> {
        let mut key = parent.clone();
        for &index in &self.0 {
            key = key.derive_child(index)?;
        }
        Ok(key)
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(indices: Vec<u32>) -> Self {
        DerivationPath(indices)
    }
}

impl FromStr for DerivationPath {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, KeyError> {
        let s = s.trim();
        let rest = match s.strip_prefix("m/").or_else(|| s.strip_prefix("M/")) {
            Some(rest) => rest,
            None if s == "m" || s == "M" => return Ok(DerivationPath(Vec::new())),
            None => s,
        };

        let mut indices = Vec::new();
        for segment in rest.split('/') {
            if segment.is_empty() {
                return Err(KeyError::InvalidPath("empty path segment".to_string()));
            }
            let hardened = segment.ends_with('\'') || segment.ends_with('h');
            let digits = if hardened {
                &segment[..segment.len() - 1]
            } else {
                segment
            };
            let index: u32 = digits.parse().map_err(|_| {
                KeyError::InvalidPath(format!("segment {segment:?} is not an index"))
            })?;
            let index = if hardened {
                index.checked_add(HARDENED_OFFSET).ok_or_else(|| {
                    KeyError::InvalidPath(format!("hardened index {index} out of range"))
                })?
            } else {
                index
            };
            indices.push(index);
        }
        Ok(DerivationPath(indices))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for &index in &self.0 {
            if index >= HARDENED_OFFSET {
                write!(f, "/{}'", index - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{index}")?;
            }
        }
        Ok(())
    }
}
