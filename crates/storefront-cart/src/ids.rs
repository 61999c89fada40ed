//! Product identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalog product.
///
/// Serializes as a bare JSON number so persisted carts keep the `"id": 42`
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create a new product ID.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw numeric ID.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
