//! # Provider
//!
//! External collaborator traits the host application implements: registry
//! persistence and status list (ledger) publication. Retry policy lives
//! behind these traits, not in this crate.

use std::future::Future;

use crate::registry::Registry;

/// Result is used for all external errors.
pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;

/// Provider trait.
pub trait Provider: RegistryStore + StatusRegistrar + Clone {}

/// `RegistryStore` is used to persist and retrieve status registries.
///
/// The store must scope queries to the requesting owner: one owner's
/// registries are never visible to another.
pub trait RegistryStore: Send + Sync {
    /// Returns all of the owner's registries for the given context, in
    /// creation order.
    fn find(
        &self, owner: &str, context: &str,
    ) -> impl Future<Output = Result<Vec<Registry>>> + Send;

    /// Persists a newly created registry.
    fn create(&self, registry: &Registry) -> impl Future<Output = Result<()>> + Send;

    /// Retrieves a registry by id.
    fn load(&self, registry_id: &str) -> impl Future<Output = Result<Registry>> + Send;

    /// Persists an updated registry.
    ///
    /// Must compare-and-swap on `Registry::version`: if the stored version
    /// differs from `registry.version` the save must fail with an error
    /// downcastable to [`Conflict`], leaving the stored record unchanged.
    /// On success the stored version is incremented.
    fn save(&self, registry: &Registry) -> impl Future<Output = Result<()>> + Send;
}

/// `StatusRegistrar` publishes a new registry's public definition (for
/// example, to a verifiable data registry or ledger).
///
/// Invoked once per registry creation, before the registry is persisted. A
/// single fallible, cancellable call: this crate does not retry it, since
/// retrying a partially failed publication can be unsafe.
pub trait StatusRegistrar: Send + Sync {
    /// Publishes the registry's public definition.
    fn register(&self, registry: &Registry) -> impl Future<Output = Result<()>> + Send;
}

/// Marker error returned by [`RegistryStore::save`] when the stored version
/// does not match the version being saved.
#[derive(Debug, thiserror::Error)]
#[error("registry was modified by another caller")]
pub struct Conflict;
