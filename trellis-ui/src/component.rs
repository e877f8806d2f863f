//! The managed-component contract.
//!
//! Anything whose lifecycle a [`LifecycleCoordinator`] drives implements
//! [`Component`]: a fixed set of boundary callbacks plus two declarations
//! (the target container and the rendered view). Every callback returns an
//! explicit [`Ack`] so the coordinator can verify the callback ran its part
//! of the contract instead of trusting a side-channel flag.
//!
//! [`LifecycleCoordinator`]: crate::LifecycleCoordinator

use std::{
    cell::RefCell,
    fmt,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    host::HostRef,
    saved_state::SavedState,
    view::{ContainerId, ViewRef},
};

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier assigned to a component when it is attached to a
/// coordinator.
///
/// Identifiers are unique for the lifetime of the process, so an id stays
/// meaningful in logs even after its component has been detached.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ComponentId(u64);

impl ComponentId {
    pub(crate) fn next() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Explicit acknowledgment returned by every lifecycle callback.
///
/// The coordinator refuses to move a component across a boundary unless the
/// boundary's callback returned [`Ack::Acknowledged`]. A callback returning
/// [`Ack::Unacknowledged`] fails the whole drive with
/// [`LifecycleError::ContractViolation`], naming the callback, and leaves
/// the component at the last state it successfully reached.
///
/// [`LifecycleError::ContractViolation`]: crate::LifecycleError::ContractViolation
#[must_use = "the coordinator checks every callback's acknowledgment"]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Ack {
    /// The callback executed its part of the lifecycle contract.
    Acknowledged,
    /// The callback did not execute its contract; fatal to the drive.
    Unacknowledged,
}

/// Shared handle to a managed component.
pub type ComponentRef = Rc<RefCell<dyn Component>>;

/// Wraps a component into the shared handle form the coordinator manages.
///
/// Callers that want to keep inspecting the concrete type after attaching
/// can build the `Rc<RefCell<_>>` themselves and hand the coordinator a
/// clone instead.
pub fn component_ref<C: Component>(component: C) -> ComponentRef {
    Rc::new(RefCell::new(component))
}

/// Capability contract for anything managed by a
/// [`LifecycleCoordinator`](crate::LifecycleCoordinator).
///
/// Every callback has a default body that acknowledges, so implementations
/// override only the boundaries they care about. All callbacks are invoked
/// synchronously on the driving thread and are expected to return promptly.
pub trait Component: 'static {
    /// Returns the component name for logging and diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Declares the container this component's view is inserted into, or
    /// `None` for a viewless component.
    ///
    /// A declared id that the host cannot resolve at the create boundary is
    /// a configuration error and fails the drive with
    /// [`LifecycleError::UnresolvedContainer`].
    ///
    /// [`LifecycleError::UnresolvedContainer`]: crate::LifecycleError::UnresolvedContainer
    fn container_target(&self) -> Option<ContainerId> {
        None
    }

    /// Produces the component's rendered view.
    ///
    /// Called once per create boundary, after [`Component::on_create`] has
    /// acknowledged. The coordinator owns the returned view until the
    /// component regresses below `Created`.
    fn build_view(&mut self) -> Option<ViewRef> {
        None
    }

    /// Crossing into `Created`, before [`Component::on_create`]: the host
    /// reference has been bound and is passed for the component to keep a
    /// weak handle to if it wants one.
    fn on_attach(&mut self, _host: &HostRef) -> Ack {
        Ack::Acknowledged
    }

    /// Crossing into `Created`: allocate whatever the component owns.
    ///
    /// `saved_state` carries the payload the host restored, when the drive
    /// originated from [`dispatch_create`] with one.
    ///
    /// [`dispatch_create`]: crate::LifecycleCoordinator::dispatch_create
    fn on_create(&mut self, _saved_state: Option<&SavedState>) -> Ack {
        Ack::Acknowledged
    }

    /// Crossing `Created → Started`.
    fn on_start(&mut self) -> Ack {
        Ack::Acknowledged
    }

    /// Crossing `Started → Resumed`.
    fn on_resume(&mut self) -> Ack {
        Ack::Acknowledged
    }

    /// Crossing `Resumed → Started`.
    fn on_pause(&mut self) -> Ack {
        Ack::Acknowledged
    }

    /// Crossing `Started → Created`.
    fn on_stop(&mut self) -> Ack {
        Ack::Acknowledged
    }

    /// Crossing `Created → Unattached`, before [`Component::on_detach`]:
    /// release owned resources.
    fn on_destroy(&mut self) -> Ack {
        Ack::Acknowledged
    }

    /// Crossing `Created → Unattached`, after [`Component::on_destroy`]:
    /// drop any kept host handle.
    fn on_detach(&mut self) -> Ack {
        Ack::Acknowledged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inert;

    impl Component for Inert {}

    #[test]
    fn default_callbacks_acknowledge() {
        let mut inert = Inert;
        assert_eq!(inert.on_start(), Ack::Acknowledged);
        assert_eq!(inert.on_stop(), Ack::Acknowledged);
        assert_eq!(inert.container_target(), None);
        assert!(inert.build_view().is_none());
    }

    #[test]
    fn default_name_is_the_type_name() {
        assert!(Inert.name().ends_with("Inert"));
    }

    #[test]
    fn component_ids_are_unique() {
        let a = ComponentId::next();
        let b = ComponentId::next();
        assert_ne!(a, b);
    }
}
