//! Host contexts and container resolution.
//!
//! A host is the owning context components attach to — the window or
//! activity equivalent. The lifecycle layer asks exactly one thing of it:
//! resolving a declared [`ContainerId`] to a live [`Container`] in the
//! host's view tree when a component crosses the create boundary.
//!
//! [`Container`]: crate::Container

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use rustc_hash::FxHashMap;

use crate::view::{Container, ContainerId, ContainerRef, container_ref};

/// Shared handle to a host.
pub type HostRef = Rc<RefCell<dyn Host>>;

/// Weak, non-owning back-reference from a managed component to its host.
///
/// The coordinator holds one of these per created component and clears it on
/// full teardown; the host is never owned through it.
pub type WeakHostRef = Weak<RefCell<dyn Host>>;

/// Wraps a host into the shared handle form the coordinator binds to.
pub fn host_ref<H: Host>(host: H) -> HostRef {
    Rc::new(RefCell::new(host))
}

/// View-resolution service a host provides to the lifecycle coordinator.
pub trait Host: 'static {
    /// Resolves a declared container id to the live container registered
    /// under it, or `None` when no such container exists.
    fn resolve_container(&self, id: ContainerId) -> Option<ContainerRef>;
}

/// Registry-backed [`Host`] for examples, tests, and simple embedders.
///
/// Real hosts usually resolve containers out of whatever structure their
/// renderer maintains; this one keeps a flat id registry, which is all the
/// lifecycle contract needs.
#[derive(Default)]
pub struct HostContext {
    containers: FxHashMap<ContainerId, ContainerRef>,
}

impl HostContext {
    /// Creates a host with no registered containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `container` under `id`, replacing any previous
    /// registration.
    pub fn register_container(&mut self, id: ContainerId, container: ContainerRef) {
        self.containers.insert(id, container);
    }

    /// Creates a fresh empty container, registers it under `id`, and
    /// returns it.
    pub fn add_container(&mut self, id: ContainerId) -> ContainerRef {
        let container = container_ref(Container::new());
        self.containers.insert(id, container.clone());
        container
    }
}

impl Host for HostContext {
    fn resolve_container(&self, id: ContainerId) -> Option<ContainerRef> {
        self.containers.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_containers() {
        let mut host = HostContext::new();
        let container = host.add_container(ContainerId::new(7));
        let resolved = host
            .resolve_container(ContainerId::new(7))
            .expect("container was registered");
        assert!(Rc::ptr_eq(&resolved, &container));
    }

    #[test]
    fn unregistered_ids_do_not_resolve() {
        let host = HostContext::new();
        assert!(host.resolve_container(ContainerId::new(1)).is_none());
    }
}
