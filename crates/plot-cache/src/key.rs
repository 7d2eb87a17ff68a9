//! Cache keys with deterministic canonical serialization
//!
//! Two keys are equivalent iff their canonical serializations are byte-equal.
//! Keys are nested primitives and sequences, which keeps canonicalization
//! trivial: depth-first tag-plus-payload encoding with no map-ordering concerns.
//!
//! There is no built-in TTL; a host wanting time-based expiry embeds a coarse
//! timestamp bucket in the key, rotating old entries out through normal LRU
//! pressure.

use serde::{Deserialize, Serialize};

/// A deterministically serializable cache key value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlotKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Seq(Vec<PlotKey>),
}

// Tag bytes for the canonical encoding. Stable: cached entries from earlier
// processes (persistent backends) must keep hitting.
const TAG_NULL: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_INT: u8 = 2;
const TAG_FLOAT: u8 = 3;
const TAG_TEXT: u8 = 4;
const TAG_SEQ: u8 = 5;

impl PlotKey {
    /// Canonical byte form; structural equality is byte equality of this.
    ///
    /// Floats encode as their IEEE bit pattern, so every value (NaN payloads
    /// included) canonicalizes deterministically. Note that this makes `0.0`
    /// and `-0.0` distinct keys.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_canonical(&mut out);
        out
    }

    fn write_canonical(&self, out: &mut Vec<u8>) {
        match self {
            PlotKey::Null => out.push(TAG_NULL),
            PlotKey::Bool(b) => {
                out.push(TAG_BOOL);
                out.push(*b as u8);
            }
            PlotKey::Int(i) => {
                out.push(TAG_INT);
                out.extend_from_slice(&i.to_le_bytes());
            }
            PlotKey::Float(f) => {
                out.push(TAG_FLOAT);
                out.extend_from_slice(&f.to_bits().to_le_bytes());
            }
            PlotKey::Text(s) => {
                out.push(TAG_TEXT);
                out.extend_from_slice(&(s.len() as u64).to_le_bytes());
                out.extend_from_slice(s.as_bytes());
            }
            PlotKey::Seq(items) => {
                out.push(TAG_SEQ);
                out.extend_from_slice(&(items.len() as u64).to_le_bytes());
                for item in items {
                    item.write_canonical(out);
                }
            }
        }
    }
}

impl PartialEq for PlotKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bytes() == other.canonical_bytes()
    }
}

impl Eq for PlotKey {}

impl std::hash::Hash for PlotKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical_bytes().hash(state);
    }
}

impl From<bool> for PlotKey {
    fn from(v: bool) -> Self {
        PlotKey::Bool(v)
    }
}

impl From<i64> for PlotKey {
    fn from(v: i64) -> Self {
        PlotKey::Int(v)
    }
}

impl From<f64> for PlotKey {
    fn from(v: f64) -> Self {
        PlotKey::Float(v)
    }
}

impl From<&str> for PlotKey {
    fn from(v: &str) -> Self {
        PlotKey::Text(v.to_string())
    }
}

impl From<String> for PlotKey {
    fn from(v: String) -> Self {
        PlotKey::Text(v)
    }
}

impl<T: Into<PlotKey>> From<Vec<T>> for PlotKey {
    fn from(v: Vec<T>) -> Self {
        PlotKey::Seq(v.into_iter().map(Into::into).collect())
    }
}
