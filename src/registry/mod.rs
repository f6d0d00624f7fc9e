//! Registration surface for resource discovery and branch rendering.
//!
//! Backends register under a resource-type name. Registration fires a
//! change event immediately (the tree re-renders to pick the backend up)
//! and returns a [`Registration`] guard; dropping the guard removes the
//! entry and fires another change.

use crate::branch::{compat_provider_pair, BranchDataProvider, LegacyWorkspaceResourceProvider};
use crate::types::{Resource, WorkspaceFolder};
use crate::{Error, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};
use tokio::sync::broadcast;

/// Discovers top-level resources inside a workspace folder.
#[async_trait]
pub trait WorkspaceResourceProvider: Send + Sync {
    async fn get_resources(&self, folder: &WorkspaceFolder) -> Result<Vec<Resource>>;
}

/// Disposal handle returned by every registration. Dropping it removes the
/// registration and notifies subscribers; [`Registration::dispose`] does the
/// same eagerly.
pub struct Registration {
    cleanup: Option<Box<dyn FnOnce() + Send>>,
}

impl Registration {
    pub(crate) fn new(cleanup: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    pub fn dispose(mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

/// Named-type registry of [`WorkspaceResourceProvider`]s with an aggregated
/// discovery call and a change event.
pub struct ResourceProviderManager {
    providers: RwLock<HashMap<String, Arc<dyn WorkspaceResourceProvider>>>,
    changes: broadcast::Sender<()>,
}

impl ResourceProviderManager {
    pub fn new() -> Arc<Self> {
        let (changes, _) = broadcast::channel(16);
        Arc::new(Self {
            providers: RwLock::new(HashMap::new()),
            changes,
        })
    }

    pub fn register(
        self: &Arc<Self>,
        resource_type: impl Into<String>,
        provider: Arc<dyn WorkspaceResourceProvider>,
    ) -> Registration {
        let resource_type = resource_type.into();
        self.providers
            .write()
            .unwrap()
            .insert(resource_type.clone(), provider);
        tracing::debug!(%resource_type, "workspace resource provider registered");
        self.notify();

        let manager: Weak<Self> = Arc::downgrade(self);
        Registration::new(move || {
            if let Some(manager) = manager.upgrade() {
                manager.providers.write().unwrap().remove(&resource_type);
                tracing::debug!(%resource_type, "workspace resource provider removed");
                manager.notify();
            }
        })
    }

    pub fn has_providers(&self) -> bool {
        !self.providers.read().unwrap().is_empty()
    }

    /// Union of every registered provider's resources for `folder`.
    /// Provider errors abort the aggregation and propagate unchanged.
    pub async fn get_resources(&self, folder: &WorkspaceFolder) -> Result<Vec<Resource>> {
        let providers: Vec<Arc<dyn WorkspaceResourceProvider>> =
            self.providers.read().unwrap().values().cloned().collect();

        let mut resources = Vec::new();
        for provider in providers {
            resources.extend(provider.get_resources(folder).await?);
        }
        Ok(resources)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        let _ = self.changes.send(());
    }
}

/// Resource-type to [`BranchDataProvider`] registry with an optional
/// default fallback and a change event.
pub struct BranchDataProviderManager {
    providers: RwLock<HashMap<String, Arc<dyn BranchDataProvider>>>,
    default_provider: RwLock<Option<Arc<dyn BranchDataProvider>>>,
    changes: broadcast::Sender<()>,
}

impl BranchDataProviderManager {
    pub fn new() -> Arc<Self> {
        let (changes, _) = broadcast::channel(16);
        Arc::new(Self {
            providers: RwLock::new(HashMap::new()),
            default_provider: RwLock::new(None),
            changes,
        })
    }

    pub fn register(
        self: &Arc<Self>,
        resource_type: impl Into<String>,
        provider: Arc<dyn BranchDataProvider>,
    ) -> Registration {
        let resource_type = resource_type.into();
        self.providers
            .write()
            .unwrap()
            .insert(resource_type.clone(), provider);
        tracing::debug!(%resource_type, "branch data provider registered");
        self.notify();

        let manager: Weak<Self> = Arc::downgrade(self);
        Registration::new(move || {
            if let Some(manager) = manager.upgrade() {
                manager.providers.write().unwrap().remove(&resource_type);
                tracing::debug!(%resource_type, "branch data provider removed");
                manager.notify();
            }
        })
    }

    /// Fallback for resource types without a dedicated provider.
    pub fn set_default(&self, provider: Arc<dyn BranchDataProvider>) {
        *self.default_provider.write().unwrap() = Some(provider);
        self.notify();
    }

    pub fn provider_for(&self, resource_type: &str) -> Result<Arc<dyn BranchDataProvider>> {
        if let Some(provider) = self.providers.read().unwrap().get(resource_type) {
            return Ok(provider.clone());
        }
        self.default_provider
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::NoProvider(resource_type.to_string()))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        let _ = self.changes.send(());
    }
}

/// Module-level record of legacy providers, mirroring the registration
/// model of the previous generation where providers were looked up by name
/// out of band.
static LEGACY_WORKSPACE_PROVIDERS: Lazy<
    RwLock<HashMap<String, Arc<dyn LegacyWorkspaceResourceProvider>>>,
> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Whether a legacy provider is currently registered for `resource_type`.
pub fn has_legacy_workspace_provider(resource_type: &str) -> bool {
    LEGACY_WORKSPACE_PROVIDERS
        .read()
        .unwrap()
        .contains_key(resource_type)
}

/// Register a previous-generation provider on the current surfaces.
///
/// The legacy provider is recorded in the module-level table, adapted into
/// a discovery/branch provider pair via the compatibility shims, and
/// registered with both managers. The returned guard tears all of it down.
pub fn register_legacy_workspace_provider(
    resource_type: &str,
    provider: Arc<dyn LegacyWorkspaceResourceProvider>,
    resources: &Arc<ResourceProviderManager>,
    branches: &Arc<BranchDataProviderManager>,
) -> Registration {
    LEGACY_WORKSPACE_PROVIDERS
        .write()
        .unwrap()
        .insert(resource_type.to_string(), provider.clone());

    let (workspace_provider, branch_provider) = compat_provider_pair(resource_type, provider);
    let resource_registration = resources.register(resource_type, workspace_provider);
    let branch_registration = branches.register(resource_type, branch_provider);

    let resource_type = resource_type.to_string();
    Registration::new(move || {
        LEGACY_WORKSPACE_PROVIDERS
            .write()
            .unwrap()
            .remove(&resource_type);
        resource_registration.dispose();
        branch_registration.dispose();
    })
}
