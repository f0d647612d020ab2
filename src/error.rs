//! # Status Registry Errors
//!
//! This module defines errors for status list allocation, revocation, and
//! encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status registry error codes.
///
/// Errors are strongly typed so the hosting web layer can map them to HTTP
/// status codes without string matching. The subsystem never logs and
/// suppresses: every failure propagates to the caller.
#[derive(Error, Debug, Deserialize)]
pub enum Error {
    /// An encoded status list could not be decoded. Only expected for
    /// externally supplied or tampered data, never for this crate's own
    /// output.
    #[error(r#"{{"error": "codec_error", "error_description": "{0}"}}"#)]
    Codec(String),

    /// The slot index is outside the registry's capacity.
    #[error(r#"{{"error": "index_out_of_range", "error_description": "{0}"}}"#)]
    IndexOutOfRange(String),

    /// The slot index refers to a slot that has never been allocated.
    #[error(r#"{{"error": "slot_not_allocated", "error_description": "{0}"}}"#)]
    SlotNotAllocated(String),

    /// A new registry could not be created: the registrar publication or
    /// the store create failed. The caller decides whether to retry the
    /// whole `allocate` call.
    #[error(r#"{{"error": "allocation_failed", "error_description": "{0}"}}"#)]
    AllocationFailed(String),

    /// The registry store could not service the request. Transient.
    #[error(r#"{{"error": "store_unavailable", "error_description": "{0}"}}"#)]
    StoreUnavailable(String),

    /// Another caller updated the registry between this call's read and
    /// write. The caller should retry a bounded number of times.
    #[error(r#"{{"error": "concurrency_conflict", "error_description": "{0}"}}"#)]
    ConcurrencyConflict(String),
}

impl Serialize for Error {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::Error as SerdeError;

        let Ok(error) = serde_json::from_str::<ErrorResponse>(&self.to_string()) else {
            return Err(SerdeError::custom("failed to serialize error"));
        };
        error.serialize(serializer)
    }
}

impl Error {
    /// Transform the error to a JSON error body.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.to_string()).unwrap_or_default()
    }
}

/// Error response body for status registry errors.
#[allow(clippy::module_name_repetitions)]
#[derive(Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub error: String,

    /// Error description.
    pub error_description: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_json() {
        let err = Error::SlotNotAllocated("slot 7 has not been issued".into());
        assert_eq!(
            err.to_json(),
            json!({
                "error": "slot_not_allocated",
                "error_description": "slot 7 has not been issued"
            })
        );
    }

    #[test]
    fn error_serialize() {
        let err = Error::IndexOutOfRange("slot 100 is outside capacity 100".into());
        let value = serde_json::to_value(&err).expect("should serialize");
        assert_eq!(value["error"], "index_out_of_range");
    }
}
