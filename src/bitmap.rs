//! # Status Bitmap
//!
//! An in-memory status bitmap of fixed capacity. One bit per issued
//! credential slot; a set bit means the slot's credential has the status
//! named by the owning registry's purpose (revoked, suspended).
//!
//! The bitmap carries no record of which slots have been allocated. A zero
//! bit for an unallocated slot is indistinguishable from a zero bit for an
//! active credential. That distinction lives in `Registry::last_index` and
//! callers must not touch bits at or beyond it.

use bitvec::bitvec;
use bitvec::order::Msb0;
use bitvec::vec::BitVec;

use crate::error::Error;
use crate::{bitstring, Result};

/// Fixed-capacity bit array backing one status list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBitmap {
    bits: BitVec<u8, Msb0>,
}

impl StatusBitmap {
    /// Creates an all-zero bitmap of the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![u8, Msb0; 0; capacity],
        }
    }

    /// Reconstructs a bitmap from an encoded status list.
    ///
    /// # Errors
    ///
    /// Returns `Error::Codec` if the encoded list is malformed or covers
    /// fewer than `capacity` bits.
    pub fn from_encoded(encoded: &str, capacity: usize) -> Result<Self> {
        Ok(Self {
            bits: bitstring::decode(encoded, capacity)?,
        })
    }

    /// The bitmap's capacity, fixed at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Returns the status bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfRange` if `index` is not within
    /// `[0, capacity)`.
    pub fn get(&self, index: usize) -> Result<bool> {
        let Some(bit) = self.bits.get(index) else {
            return Err(Error::IndexOutOfRange(format!(
                "index {index} is outside capacity {}",
                self.bits.len()
            )));
        };
        Ok(*bit)
    }

    /// Sets the status bit at `index`. Idempotent: setting a bit to its
    /// current value is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfRange` if `index` is not within
    /// `[0, capacity)`.
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        if index >= self.bits.len() {
            return Err(Error::IndexOutOfRange(format!(
                "index {index} is outside capacity {}",
                self.bits.len()
            )));
        }
        self.bits.set(index, value);
        Ok(())
    }

    /// The number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// The bitmap as a vector of booleans, for read-only projections.
    #[must_use]
    pub fn to_vec(&self) -> Vec<bool> {
        self.bits.iter().by_vals().collect()
    }

    /// Serializes the bitmap as a compressed, base64url-encoded status list.
    ///
    /// # Errors
    ///
    /// Returns `Error::Codec` if compression fails.
    pub fn encode(&self) -> Result<String> {
        bitstring::encode(&self.bits)
    }
}
