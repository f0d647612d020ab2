//! In-memory registry store and registrar.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;

use crate::provider::{Conflict, Provider, RegistryStore, Result, StatusRegistrar};
use crate::registry::Registry;

/// In-memory provider. Registries are held in creation order and `save`
/// enforces the compare-and-swap contract on `Registry::version`.
#[derive(Clone, Debug, Default)]
pub struct ProviderImpl {
    registries: Arc<Mutex<Vec<Registry>>>,
    fail_register: Arc<AtomicBool>,
}

impl ProviderImpl {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `register` fails, simulating an unavailable ledger.
    pub fn fail_registration(&self, fail: bool) {
        self.fail_register.store(fail, Ordering::SeqCst);
    }

    /// Number of registries the store holds, across all owners.
    #[must_use]
    pub fn registry_count(&self) -> usize {
        self.registries.lock().expect("should lock").len()
    }
}

impl Provider for ProviderImpl {}

impl RegistryStore for ProviderImpl {
    async fn find(&self, owner: &str, context: &str) -> Result<Vec<Registry>> {
        let registries = self.registries.lock().expect("should lock");
        Ok(registries
            .iter()
            .filter(|r| r.owner == owner && r.context == context)
            .cloned()
            .collect())
    }

    async fn create(&self, registry: &Registry) -> Result<()> {
        let mut registries = self.registries.lock().expect("should lock");
        if registries.iter().any(|r| r.id == registry.id) {
            return Err(anyhow!("registry already exists: {}", registry.id));
        }
        registries.push(registry.clone());
        Ok(())
    }

    async fn load(&self, registry_id: &str) -> Result<Registry> {
        let registries = self.registries.lock().expect("should lock");
        let Some(registry) = registries.iter().find(|r| r.id == registry_id) else {
            return Err(anyhow!("registry not found: {registry_id}"));
        };
        Ok(registry.clone())
    }

    async fn save(&self, registry: &Registry) -> Result<()> {
        let mut registries = self.registries.lock().expect("should lock");
        let Some(stored) = registries.iter_mut().find(|r| r.id == registry.id) else {
            return Err(anyhow!("registry not found: {}", registry.id));
        };
        if stored.version != registry.version {
            return Err(Conflict.into());
        }
        *stored = Registry {
            version: registry.version + 1,
            ..registry.clone()
        };
        Ok(())
    }
}

impl StatusRegistrar for ProviderImpl {
    async fn register(&self, registry: &Registry) -> Result<()> {
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(anyhow!("issue registering definition for {}", registry.id));
        }
        Ok(())
    }
}
