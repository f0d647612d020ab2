//! # Allocate Endpoint
//!
//! Reserves the next free status slot for a newly issued credential. The
//! owner's registries are scanned in creation order and the first with
//! spare capacity is used, keeping earlier registries filled before new
//! ones are opened. This minimizes the number of lists an owner must
//! publish. When every registry is full (or none exists) a new one is
//! created: its definition is published through the [`StatusRegistrar`]
//! and it is persisted, in that order, all-or-nothing.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Error;
use crate::provider::{Conflict, Provider, RegistryStore, StatusRegistrar};
use crate::registry::{Registry, StatusPurpose, DEFAULT_CAPACITY};
use crate::Result;

/// A request to allocate a status slot for a credential about to be issued.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AllocateRequest {
    /// The issuing principal requesting the slot.
    pub owner: String,

    /// Free-form grouping key (for example, a credential definition id).
    /// Slots are allocated per `(owner, context)` pair.
    pub context: String,

    /// Purpose of any registry created by this call.
    #[serde(default)]
    pub purpose: StatusPurpose,

    /// Capacity of any registry created by this call. Existing registries
    /// keep their creation-time capacity. Defaults to
    /// [`DEFAULT_CAPACITY`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

/// The allocated slot.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AllocateResponse {
    /// The registry the slot belongs to.
    pub registry_id: String,

    /// The allocated slot index, unique within the registry and never
    /// reused.
    pub slot_index: usize,
}

/// Allocate request handler.
///
/// # Errors
///
/// Returns `AllocationFailed` if a new registry was needed and could not be
/// created, `ConcurrencyConflict` if another caller updated the selected
/// registry first, and `StoreUnavailable` for other store failures.
#[instrument(level = "debug", skip(provider))]
pub async fn allocate(
    provider: impl Provider, request: AllocateRequest,
) -> Result<AllocateResponse> {
    process(&provider, request).await
}

async fn process(
    provider: &impl Provider, request: AllocateRequest,
) -> Result<AllocateResponse> {
    tracing::debug!("allocate::process");

    let registries = RegistryStore::find(provider, &request.owner, &request.context)
        .await
        .map_err(|e| Error::StoreUnavailable(format!("issue fetching registries: {e}")))?;

    let mut registry = match registries.into_iter().find(|r| !r.is_full()) {
        Some(registry) => registry,
        None => create_registry(provider, &request).await?,
    };

    let slot_index = registry.last_index;
    registry.last_index += 1;

    if let Err(e) = RegistryStore::save(provider, &registry).await {
        if e.downcast_ref::<Conflict>().is_some() {
            return Err(Error::ConcurrencyConflict(format!(
                "registry {} was updated concurrently",
                registry.id
            )));
        }
        return Err(Error::StoreUnavailable(format!("issue saving registry: {e}")));
    }

    Ok(AllocateResponse {
        registry_id: registry.id,
        slot_index,
    })
}

// Creation is all-or-nothing: the registrar publishes first and the store
// persists second, so a failed publication leaves nothing visible to other
// allocators.
async fn create_registry(
    provider: &impl Provider, request: &AllocateRequest,
) -> Result<Registry> {
    let capacity = request.capacity.unwrap_or(DEFAULT_CAPACITY);
    let registry = Registry::new(&request.owner, &request.context, request.purpose, capacity)?;

    StatusRegistrar::register(provider, &registry)
        .await
        .map_err(|e| Error::AllocationFailed(format!("issue publishing registry: {e}")))?;
    RegistryStore::create(provider, &registry)
        .await
        .map_err(|e| Error::AllocationFailed(format!("issue persisting registry: {e}")))?;

    Ok(registry)
}
