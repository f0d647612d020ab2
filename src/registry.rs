//! # Status Registry
//!
//! The allocation unit for credential status: a fixed-capacity bitmap plus
//! an allocation counter, uniquely identified and owned by one issuing
//! principal. Registries are partitioned per owner: an owner only ever
//! allocates from, and sees, its own registries.

use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bitmap::StatusBitmap;
use crate::error::Error;
use crate::Result;

/// Default registry capacity when the allocate request does not supply one.
pub const DEFAULT_CAPACITY: usize = 100;

/// The semantic meaning of a set status bit. Orthogonal to encoding.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusPurpose {
    /// A set bit means the credential has been revoked. Permanent in
    /// intent, though this subsystem allows the bit to be cleared.
    #[default]
    Revocation,

    /// A set bit means the credential is suspended.
    Suspension,
}

impl Display for StatusPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Revocation => write!(f, "revocation"),
            Self::Suspension => write!(f, "suspension"),
        }
    }
}

/// A status registry: one status list plus the metadata needed to allocate
/// slots from it.
///
/// Mutated only by `allocate` (increments `last_index`) and by
/// `revoke`/`unrevoke` (flips a bit). Never deleted by this subsystem.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Registry {
    /// Unique identifier, assigned at creation.
    pub id: String,

    /// Identifier of the issuing principal that owns this registry.
    pub owner: String,

    /// Owner-supplied lookup key (for example, a credential definition id
    /// or DID). Used only for grouping, never by allocation logic.
    pub context: String,

    /// Meaning of a set bit in this registry's list.
    pub purpose: StatusPurpose,

    /// Number of slots, fixed at creation.
    pub capacity: usize,

    /// Count of slots already allocated, in `0..=capacity`. Monotonically
    /// non-decreasing. Not the count of revoked slots.
    pub last_index: usize,

    /// The registry's bitmap in its only persisted form: compressed,
    /// base64url-encoded.
    pub encoded_list: String,

    /// Optimistic concurrency token, compare-and-swapped by
    /// `RegistryStore::save`.
    pub version: u64,

    /// Creation time. Determines allocation order across an owner's
    /// registries.
    pub created_at: DateTime<Utc>,
}

impl Registry {
    /// Creates a registry with a fresh all-zero status list and no slots
    /// allocated.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if `capacity` is zero and
    /// `Error::Codec` if the fresh list cannot be encoded.
    pub fn new(
        owner: impl Into<String>, context: impl Into<String>, purpose: StatusPurpose,
        capacity: usize,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::AllocationFailed("capacity must be greater than zero".into()));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            owner: owner.into(),
            context: context.into(),
            purpose,
            capacity,
            last_index: 0,
            encoded_list: StatusBitmap::new(capacity).encode()?,
            version: 0,
            created_at: Utc::now(),
        })
    }

    /// `true` when every slot has been allocated. Full registries are never
    /// selected for new allocations but continue to serve status updates
    /// and reads.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.last_index == self.capacity
    }

    /// Decodes the registry's status list into a working bitmap.
    ///
    /// # Errors
    ///
    /// Returns `Error::Codec` if the persisted list is malformed.
    pub fn bitmap(&self) -> Result<StatusBitmap> {
        StatusBitmap::from_encoded(&self.encoded_list, self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registry() {
        let registry =
            Registry::new("issuer-1", "ctx", StatusPurpose::Revocation, 100).expect("should create");

        assert_eq!(registry.last_index, 0);
        assert!(!registry.is_full());

        let bitmap = registry.bitmap().expect("should decode");
        assert_eq!(bitmap.capacity(), 100);
        assert_eq!(bitmap.count_ones(), 0);
    }

    #[test]
    fn zero_capacity() {
        let err = Registry::new("issuer-1", "ctx", StatusPurpose::Revocation, 0)
            .expect_err("should fail");
        assert!(matches!(err, Error::AllocationFailed(_)));
    }

    #[test]
    fn purpose_serde() {
        let json = serde_json::to_string(&StatusPurpose::Suspension).expect("should serialize");
        assert_eq!(json, r#""suspension""#);
        assert_eq!(StatusPurpose::Revocation.to_string(), "revocation");
    }
}
