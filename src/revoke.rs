//! # Revoke and Unrevoke Endpoints
//!
//! Flips the status bit for a previously allocated slot. Only slots that
//! have actually been issued (`slot_index < last_index`) can be updated;
//! the bitmap itself does not distinguish unallocated slots from active
//! ones. Both endpoints are idempotent at this layer; detecting a second
//! revocation of the same slot is a business concern for callers that
//! first inspect `status`.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Error;
use crate::provider::{Conflict, Provider, RegistryStore};
use crate::Result;

/// A request to update the status bit of one allocated slot.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RevokeRequest {
    /// The registry holding the slot.
    pub registry_id: String,

    /// The slot to update, as returned by `allocate`.
    pub slot_index: usize,
}

/// Response to a revoke or unrevoke request.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RevokeResponse {}

/// Revoke request handler. Sets the slot's status bit.
///
/// # Errors
///
/// Returns `IndexOutOfRange` if the slot is outside the registry's
/// capacity, `SlotNotAllocated` if it has never been issued, and
/// `ConcurrencyConflict`/`StoreUnavailable` for store failures.
#[instrument(level = "debug", skip(provider))]
pub async fn revoke(provider: impl Provider, request: RevokeRequest) -> Result<RevokeResponse> {
    process(&provider, request, true).await
}

/// Unrevoke request handler. Clears the slot's status bit.
///
/// # Errors
///
/// As for [`revoke`].
#[instrument(level = "debug", skip(provider))]
pub async fn unrevoke(
    provider: impl Provider, request: RevokeRequest,
) -> Result<RevokeResponse> {
    process(&provider, request, false).await
}

async fn process(
    provider: &impl Provider, request: RevokeRequest, value: bool,
) -> Result<RevokeResponse> {
    tracing::debug!("revoke::process");

    let mut registry = RegistryStore::load(provider, &request.registry_id)
        .await
        .map_err(|e| Error::StoreUnavailable(format!("issue loading registry: {e}")))?;

    if request.slot_index >= registry.capacity {
        return Err(Error::IndexOutOfRange(format!(
            "slot {} is outside capacity {}",
            request.slot_index, registry.capacity
        )));
    }
    if request.slot_index >= registry.last_index {
        return Err(Error::SlotNotAllocated(format!(
            "slot {} has not been issued",
            request.slot_index
        )));
    }

    let mut bitmap = registry.bitmap()?;
    bitmap.set(request.slot_index, value)?;
    registry.encoded_list = bitmap.encode()?;

    if let Err(e) = RegistryStore::save(provider, &registry).await {
        if e.downcast_ref::<Conflict>().is_some() {
            return Err(Error::ConcurrencyConflict(format!(
                "registry {} was updated concurrently",
                registry.id
            )));
        }
        return Err(Error::StoreUnavailable(format!("issue saving registry: {e}")));
    }

    Ok(RevokeResponse {})
}
