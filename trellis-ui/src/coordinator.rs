//! Lifecycle coordination for host-managed components.
//!
//! ## Overview
//!
//! A [`LifecycleCoordinator`] owns an ordered collection of managed
//! components and drives each one through the linear state machine in
//! [`LifecycleState`] in response to coarse host events: the `dispatch_*`
//! operations a window or activity forwards as it is created, shown,
//! foregrounded, and torn down.
//!
//! ## Responsibilities
//!
//! - Transition components one at a time, in attachment order, one adjacent
//!   boundary at a time — a component fully reaches (or fails to reach) the
//!   target state before the next component is visited.
//! - Enforce the acknowledgment contract: every callback must return
//!   [`Ack::Acknowledged`] or the drive fails.
//! - Track per-component bookkeeping (reached state, weak host handle,
//!   container, rendered view) and release it on teardown.
//!
//! The coordinator is single-threaded by contract: all operations take
//! `&mut self` and run callbacks synchronously on the calling thread, so a
//! drive can never observe the component sequence changing under it.

use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    component::{Ack, Component, ComponentId, ComponentRef},
    host::{HostRef, WeakHostRef},
    saved_state::SavedState,
    state::LifecycleState,
    view::{ContainerId, ContainerRef, ViewRef},
};

/// Errors surfaced by coordinator operations.
///
/// All failures are fatal to the operation that raised them and are
/// surfaced synchronously; nothing is retried or swallowed. A failed drive
/// leaves already-visited components at their newly reached state and
/// not-yet-visited components untouched.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A lifecycle callback returned [`Ack::Unacknowledged`]. The bug is in
    /// the component implementation; the component stays at the last state
    /// it successfully reached.
    #[error("component '{name}' ({id}) did not acknowledge {callback}")]
    ContractViolation {
        /// Name of the offending component.
        name: &'static str,
        /// Identifier of the offending component.
        id: ComponentId,
        /// The callback that did not acknowledge.
        callback: &'static str,
    },
    /// A declared container id could not be resolved through the host at
    /// the create boundary. This is a configuration error in the
    /// component's declared attachment point, not a transient condition.
    #[error("no container found for {container:?} declared by component '{name}' ({id})")]
    UnresolvedContainer {
        /// Name of the declaring component.
        name: &'static str,
        /// Identifier of the declaring component.
        id: ComponentId,
        /// The container id that did not resolve.
        container: ContainerId,
    },
    /// [`LifecycleCoordinator::attach_host`] was called while a host is
    /// already bound.
    #[error("a host is already attached to this coordinator")]
    HostAlreadyAttached,
    /// A dispatch targeting a state above `Unattached` was issued with no
    /// host bound.
    #[error("no host attached")]
    NoHostAttached,
}

/// Bookkeeping the coordinator tracks for one managed component.
#[derive(Default)]
struct LifecycleRecord {
    state: LifecycleState,
    host: Option<WeakHostRef>,
    container: Option<ContainerRef>,
    view: Option<ViewRef>,
}

struct ComponentEntry {
    id: ComponentId,
    name: &'static str,
    component: ComponentRef,
    record: LifecycleRecord,
}

impl ComponentEntry {
    /// Invokes one callback and enforces its acknowledgment.
    fn invoke(
        &mut self,
        callback: &'static str,
        call: impl FnOnce(&mut dyn Component) -> Ack,
    ) -> Result<(), LifecycleError> {
        let ack = call(&mut *self.component.borrow_mut());
        match ack {
            Ack::Acknowledged => {
                trace!("Component '{}' ({}) acknowledged {}", self.name, self.id, callback);
                Ok(())
            }
            Ack::Unacknowledged => Err(LifecycleError::ContractViolation {
                name: self.name,
                id: self.id,
                callback,
            }),
        }
    }
}

/// Drives an ordered collection of [`Component`]s through the lifecycle
/// state machine on behalf of a host.
///
/// Create one per host, bind the host with
/// [`attach_host`](Self::attach_host), register components with
/// [`attach_component`](Self::attach_component), and forward the host's
/// lifecycle events through the `dispatch_*` operations. See the crate
/// documentation for a complete walkthrough.
#[derive(Default)]
pub struct LifecycleCoordinator {
    entries: Vec<ComponentEntry>,
    current_target: LifecycleState,
    host: Option<HostRef>,
}

impl LifecycleCoordinator {
    /// Creates a coordinator with no host and no managed components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the coordinator to its owning host context.
    ///
    /// Fails with [`LifecycleError::HostAlreadyAttached`] if a host is
    /// already bound; the existing binding is left untouched.
    pub fn attach_host(&mut self, host: HostRef) -> Result<(), LifecycleError> {
        if self.host.is_some() {
            return Err(LifecycleError::HostAlreadyAttached);
        }
        debug!("Host attached");
        self.host = Some(host);
        Ok(())
    }

    /// Appends `component` to the managed sequence and returns its
    /// identifier.
    ///
    /// Attachment alone never changes lifecycle state: the component stays
    /// `Unattached` until the next drive. Attaching the same reference more
    /// than once is permitted and yields independent entries.
    pub fn attach_component(&mut self, component: ComponentRef) -> ComponentId {
        let id = ComponentId::next();
        let name = component.borrow().name();
        debug!("Component '{}' ({}) attached", name, id);
        self.entries.push(ComponentEntry {
            id,
            name,
            component,
            record: LifecycleRecord::default(),
        });
        id
    }

    /// Removes the first entry holding the exact reference `component` and
    /// synchronously force-regresses it to `Unattached`, running every
    /// intervening teardown callback, regardless of the current target
    /// state.
    ///
    /// References this coordinator does not manage are ignored.
    pub fn detach_component(&mut self, component: &ComponentRef) -> Result<(), LifecycleError> {
        // Vtable pointers are not guaranteed unique across codegen units;
        // compare data addresses only.
        let position = self.entries.iter().position(|entry| {
            std::ptr::addr_eq(Rc::as_ptr(&entry.component), Rc::as_ptr(component))
        });
        let Some(position) = position else {
            warn!("Detach requested for a component this coordinator does not manage; ignoring");
            return Ok(());
        };
        let mut entry = self.entries.remove(position);
        debug!("Component '{}' ({}) detached", entry.name, entry.id);
        Self::transition_entry(
            self.host.as_ref(),
            &mut entry,
            LifecycleState::Unattached,
            None,
        )
    }

    /// Sets the current target state and transitions every managed
    /// component to it, in attachment order.
    ///
    /// An error aborts the pass: the failing component keeps the last state
    /// it reached, components visited earlier keep their new state, and
    /// components not yet visited are untouched. Nothing is rolled back.
    pub fn drive_to(&mut self, target: LifecycleState) -> Result<(), LifecycleError> {
        self.drive_all(target, None)
    }

    /// Host window was created. Drives everything to `Created`, delivering
    /// `saved_state` to each component's `on_create`.
    pub fn dispatch_create(
        &mut self,
        saved_state: Option<&SavedState>,
    ) -> Result<(), LifecycleError> {
        self.drive_all(LifecycleState::Created, saved_state)
    }

    /// Host became visible. Drives everything to `Started`.
    pub fn dispatch_start(&mut self) -> Result<(), LifecycleError> {
        self.drive_to(LifecycleState::Started)
    }

    /// Host entered the foreground. Drives everything to `Resumed`.
    pub fn dispatch_resume(&mut self) -> Result<(), LifecycleError> {
        self.drive_to(LifecycleState::Resumed)
    }

    /// Host left the foreground. Drives everything back to `Started`.
    pub fn dispatch_pause(&mut self) -> Result<(), LifecycleError> {
        self.drive_to(LifecycleState::Started)
    }

    /// Host is no longer visible. Drives everything back to `Created`.
    pub fn dispatch_stop(&mut self) -> Result<(), LifecycleError> {
        self.drive_to(LifecycleState::Created)
    }

    /// Host is being destroyed. Drives everything to `Unattached`, then
    /// releases the host binding.
    ///
    /// The host stays bound when the downward drive fails, so the caller
    /// can observe the partial-teardown state.
    pub fn dispatch_destroy(&mut self) -> Result<(), LifecycleError> {
        self.drive_to(LifecycleState::Unattached)?;
        self.host = None;
        Ok(())
    }

    /// The bound host, if any.
    pub fn host(&self) -> Option<&HostRef> {
        self.host.as_ref()
    }

    /// The state components are currently driven toward.
    pub fn current_target(&self) -> LifecycleState {
        self.current_target
    }

    /// Number of managed components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the coordinator manages no components.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `component` (by exact reference) is currently managed.
    pub fn contains(&self, component: &ComponentRef) -> bool {
        self.entries.iter().any(|entry| {
            std::ptr::addr_eq(Rc::as_ptr(&entry.component), Rc::as_ptr(component))
        })
    }

    /// Identifiers of the managed components, in attachment order.
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// The last state the identified component successfully reached.
    pub fn state_of(&self, id: ComponentId) -> Option<LifecycleState> {
        self.entry(id).map(|entry| entry.record.state)
    }

    /// The identified component's rendered view, while it is at or above
    /// `Created`.
    pub fn view_of(&self, id: ComponentId) -> Option<ViewRef> {
        self.entry(id).and_then(|entry| entry.record.view.clone())
    }

    /// The container the identified component's view is parented to, while
    /// it is at or above `Created`.
    pub fn container_of(&self, id: ComponentId) -> Option<ContainerRef> {
        self.entry(id).and_then(|entry| entry.record.container.clone())
    }

    /// The host the identified component is attached to, while it is at or
    /// above `Created` and the host is still alive.
    pub fn host_of(&self, id: ComponentId) -> Option<HostRef> {
        self.entry(id)?.record.host.as_ref()?.upgrade()
    }

    fn entry(&self, id: ComponentId) -> Option<&ComponentEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    fn drive_all(
        &mut self,
        target: LifecycleState,
        saved_state: Option<&SavedState>,
    ) -> Result<(), LifecycleError> {
        if self.host.is_none() && target > LifecycleState::Unattached {
            return Err(LifecycleError::NoHostAttached);
        }
        self.current_target = target;
        debug!("Driving {} component(s) to {:?}", self.entries.len(), target);
        let host = self.host.clone();
        for entry in &mut self.entries {
            Self::transition_entry(host.as_ref(), entry, target, saved_state)?;
        }
        Ok(())
    }

    /// Walks one component to `target`, one adjacent boundary per
    /// iteration. The reached state is committed only after the boundary's
    /// callbacks acknowledged, so a failure leaves the component exactly at
    /// the last boundary it crossed.
    fn transition_entry(
        host: Option<&HostRef>,
        entry: &mut ComponentEntry,
        target: LifecycleState,
        saved_state: Option<&SavedState>,
    ) -> Result<(), LifecycleError> {
        while let Some(next) = entry.record.state.step_toward(target) {
            trace!(
                "Component '{}' ({}) moving {:?} -> {:?}",
                entry.name, entry.id, entry.record.state, next
            );
            if next > entry.record.state {
                match next {
                    LifecycleState::Created => Self::enter_created(host, entry, saved_state)?,
                    LifecycleState::Started => entry.invoke("on_start", |c| c.on_start())?,
                    LifecycleState::Resumed => entry.invoke("on_resume", |c| c.on_resume())?,
                    LifecycleState::Unattached => unreachable!("no upward boundary enters Unattached"),
                }
            } else {
                match entry.record.state {
                    LifecycleState::Resumed => entry.invoke("on_pause", |c| c.on_pause())?,
                    LifecycleState::Started => entry.invoke("on_stop", |c| c.on_stop())?,
                    LifecycleState::Created => Self::exit_created(entry)?,
                    LifecycleState::Unattached => unreachable!("no downward boundary leaves Unattached"),
                }
            }
            entry.record.state = next;
        }
        Ok(())
    }

    /// The `Unattached → Created` boundary bundles two notifications:
    /// attach (host binding) then create, each required to acknowledge
    /// before the next step runs. Container resolution and view insertion
    /// happen as side effects of the create step.
    fn enter_created(
        host: Option<&HostRef>,
        entry: &mut ComponentEntry,
        saved_state: Option<&SavedState>,
    ) -> Result<(), LifecycleError> {
        let Some(host) = host else {
            return Err(LifecycleError::NoHostAttached);
        };

        entry.record.host = Some(Rc::downgrade(host));
        entry.invoke("on_attach", |c| c.on_attach(host))?;
        entry.invoke("on_create", |c| c.on_create(saved_state))?;

        let declared = entry.component.borrow().container_target();
        if let Some(container_id) = declared {
            let resolved = host.borrow().resolve_container(container_id);
            let Some(container) = resolved else {
                return Err(LifecycleError::UnresolvedContainer {
                    name: entry.name,
                    id: entry.id,
                    container: container_id,
                });
            };
            entry.record.container = Some(container);
        }

        let view = entry.component.borrow_mut().build_view();
        if let (Some(container), Some(view)) = (&entry.record.container, &view) {
            container.borrow_mut().push_child(view.clone());
        }
        entry.record.view = view;
        Ok(())
    }

    /// The `Created → Unattached` boundary mirrors the attach/create
    /// bundle: destroy then detach, both required, then the view leaves its
    /// container and every held reference is released.
    fn exit_created(entry: &mut ComponentEntry) -> Result<(), LifecycleError> {
        entry.invoke("on_destroy", |c| c.on_destroy())?;
        entry.invoke("on_detach", |c| c.on_detach())?;

        if let (Some(container), Some(view)) = (&entry.record.container, &entry.record.view) {
            container.borrow_mut().remove_child(view);
        }
        entry.record.container = None;
        entry.record.view = None;
        entry.record.host = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        host::HostContext,
        view::{View, view_ref},
    };

    #[derive(Default)]
    struct Probe {
        calls: Vec<&'static str>,
        refuse: Option<&'static str>,
        target: Option<ContainerId>,
        with_view: bool,
        restored: Option<String>,
    }

    impl Probe {
        fn record(&mut self, callback: &'static str) -> Ack {
            self.calls.push(callback);
            if self.refuse == Some(callback) {
                Ack::Unacknowledged
            } else {
                Ack::Acknowledged
            }
        }
    }

    struct ProbeView;

    impl View for ProbeView {}

    impl Component for Probe {
        fn container_target(&self) -> Option<ContainerId> {
            self.target
        }

        fn build_view(&mut self) -> Option<ViewRef> {
            self.with_view.then(|| view_ref(ProbeView))
        }

        fn on_attach(&mut self, _host: &HostRef) -> Ack {
            self.record("on_attach")
        }

        fn on_create(&mut self, saved_state: Option<&SavedState>) -> Ack {
            self.restored = saved_state
                .and_then(|state| state.get("restored"))
                .map(str::to_owned);
            self.record("on_create")
        }

        fn on_start(&mut self) -> Ack {
            self.record("on_start")
        }

        fn on_resume(&mut self) -> Ack {
            self.record("on_resume")
        }

        fn on_pause(&mut self) -> Ack {
            self.record("on_pause")
        }

        fn on_stop(&mut self) -> Ack {
            self.record("on_stop")
        }

        fn on_destroy(&mut self) -> Ack {
            self.record("on_destroy")
        }

        fn on_detach(&mut self) -> Ack {
            self.record("on_detach")
        }
    }

    fn probe() -> Rc<RefCell<Probe>> {
        Rc::new(RefCell::new(Probe::default()))
    }

    fn refusing(callback: &'static str) -> Rc<RefCell<Probe>> {
        Rc::new(RefCell::new(Probe {
            refuse: Some(callback),
            ..Probe::default()
        }))
    }

    fn hosted() -> (LifecycleCoordinator, Rc<RefCell<HostContext>>) {
        let host = Rc::new(RefCell::new(HostContext::new()));
        let mut coordinator = LifecycleCoordinator::new();
        coordinator
            .attach_host(host.clone())
            .expect("fresh coordinator has no host");
        (coordinator, host)
    }

    fn resume_all(coordinator: &mut LifecycleCoordinator) {
        coordinator.dispatch_create(None).expect("create succeeds");
        coordinator.dispatch_start().expect("start succeeds");
        coordinator.dispatch_resume().expect("resume succeeds");
    }

    #[test]
    fn forward_drive_runs_callbacks_in_order() {
        let (mut coordinator, _host) = hosted();
        let component = probe();
        let id = coordinator.attach_component(component.clone());

        resume_all(&mut coordinator);

        assert_eq!(coordinator.state_of(id), Some(LifecycleState::Resumed));
        assert_eq!(
            component.borrow().calls,
            ["on_attach", "on_create", "on_start", "on_resume"],
        );
    }

    #[test]
    fn teardown_mirrors_the_forward_order() {
        let (mut coordinator, _host) = hosted();
        let component = probe();
        let id = coordinator.attach_component(component.clone());
        resume_all(&mut coordinator);
        component.borrow_mut().calls.clear();

        coordinator.dispatch_destroy().expect("teardown succeeds");

        assert_eq!(coordinator.state_of(id), Some(LifecycleState::Unattached));
        assert_eq!(
            component.borrow().calls,
            ["on_pause", "on_stop", "on_destroy", "on_detach"],
        );
    }

    #[test]
    fn driving_to_the_current_state_triggers_no_callbacks() {
        let (mut coordinator, _host) = hosted();
        let component = probe();
        coordinator.attach_component(component.clone());
        resume_all(&mut coordinator);
        component.borrow_mut().calls.clear();

        coordinator.dispatch_resume().expect("no-op resume succeeds");

        assert!(component.borrow().calls.is_empty());
    }

    #[test]
    fn attachment_alone_changes_no_state() {
        let (mut coordinator, _host) = hosted();
        let component = probe();
        let id = coordinator.attach_component(component.clone());

        assert_eq!(coordinator.state_of(id), Some(LifecycleState::Unattached));
        assert!(component.borrow().calls.is_empty());
    }

    #[test]
    fn round_trip_releases_every_reference() {
        let (mut coordinator, host) = hosted();
        let container = host.borrow_mut().add_container(ContainerId::new(1));
        let component = Rc::new(RefCell::new(Probe {
            target: Some(ContainerId::new(1)),
            with_view: true,
            ..Probe::default()
        }));
        let id = coordinator.attach_component(component.clone());

        resume_all(&mut coordinator);
        assert!(coordinator.view_of(id).is_some());
        assert!(coordinator.container_of(id).is_some());
        assert!(coordinator.host_of(id).is_some());
        assert_eq!(container.borrow().len(), 1);

        coordinator.dispatch_destroy().expect("teardown succeeds");

        assert_eq!(coordinator.state_of(id), Some(LifecycleState::Unattached));
        assert!(coordinator.view_of(id).is_none());
        assert!(coordinator.container_of(id).is_none());
        assert!(coordinator.host_of(id).is_none());
        assert!(container.borrow().is_empty());
    }

    #[test]
    fn created_view_is_parented_to_the_declared_container() {
        let (mut coordinator, host) = hosted();
        let container = host.borrow_mut().add_container(ContainerId::new(3));
        let component = Rc::new(RefCell::new(Probe {
            target: Some(ContainerId::new(3)),
            with_view: true,
            ..Probe::default()
        }));
        let id = coordinator.attach_component(component.clone());

        coordinator.dispatch_create(None).expect("create succeeds");

        let view = coordinator.view_of(id).expect("view exists once created");
        assert_eq!(container.borrow().len(), 1);
        assert!(std::ptr::addr_eq(
            Rc::as_ptr(&container.borrow().children()[0]),
            Rc::as_ptr(&view),
        ));

        // Stopping keeps the view; only regression below Created removes it.
        coordinator.dispatch_start().expect("start succeeds");
        coordinator.dispatch_stop().expect("stop succeeds");
        assert_eq!(container.borrow().len(), 1);
    }

    #[test]
    fn unacknowledged_on_create_is_a_contract_violation() {
        let (mut coordinator, _host) = hosted();
        let component = refusing("on_create");
        let id = coordinator.attach_component(component.clone());

        let error = coordinator
            .dispatch_create(None)
            .expect_err("refusing component fails the drive");

        assert!(matches!(
            error,
            LifecycleError::ContractViolation {
                callback: "on_create",
                ..
            }
        ));
        assert_eq!(coordinator.state_of(id), Some(LifecycleState::Unattached));
    }

    #[test]
    fn unacknowledged_on_pause_leaves_the_component_resumed() {
        let (mut coordinator, _host) = hosted();
        let component = refusing("on_pause");
        let id = coordinator.attach_component(component.clone());
        resume_all(&mut coordinator);

        let error = coordinator
            .dispatch_pause()
            .expect_err("refusing component fails the drive");

        assert!(matches!(
            error,
            LifecycleError::ContractViolation {
                callback: "on_pause",
                ..
            }
        ));
        assert_eq!(coordinator.state_of(id), Some(LifecycleState::Resumed));
    }

    #[test]
    fn unresolved_container_fails_the_pass_partially() {
        let (mut coordinator, _host) = hosted();
        let first = probe();
        let second = Rc::new(RefCell::new(Probe {
            target: Some(ContainerId::new(99)),
            ..Probe::default()
        }));
        let third = probe();
        let first_id = coordinator.attach_component(first.clone());
        let second_id = coordinator.attach_component(second.clone());
        let third_id = coordinator.attach_component(third.clone());

        let error = coordinator
            .dispatch_create(None)
            .expect_err("unresolvable container fails the drive");

        match error {
            LifecycleError::UnresolvedContainer { container, .. } => {
                assert_eq!(container, ContainerId::new(99));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Already-visited components keep their new state; unvisited ones
        // are untouched; the failing one never reached Created.
        assert_eq!(coordinator.state_of(first_id), Some(LifecycleState::Created));
        assert_eq!(coordinator.state_of(second_id), Some(LifecycleState::Unattached));
        assert_eq!(coordinator.state_of(third_id), Some(LifecycleState::Unattached));
        assert!(third.borrow().calls.is_empty());
    }

    #[test]
    fn detach_runs_the_full_teardown_chain_synchronously() {
        let (mut coordinator, _host) = hosted();
        let component = probe();
        coordinator.attach_component(component.clone());
        resume_all(&mut coordinator);
        component.borrow_mut().calls.clear();

        let as_managed: ComponentRef = component.clone();
        coordinator
            .detach_component(&as_managed)
            .expect("teardown succeeds");

        assert_eq!(
            component.borrow().calls,
            ["on_pause", "on_stop", "on_destroy", "on_detach"],
        );
        assert!(coordinator.is_empty());
        assert!(!coordinator.contains(&as_managed));

        // Detached components are not visited by later drives.
        component.borrow_mut().calls.clear();
        coordinator.dispatch_create(None).expect("empty drive succeeds");
        assert!(component.borrow().calls.is_empty());
    }

    #[test]
    fn detaching_an_unmanaged_reference_is_a_no_op() {
        let (mut coordinator, _host) = hosted();
        let stranger: ComponentRef = probe();

        coordinator
            .detach_component(&stranger)
            .expect("unmanaged detach is ignored");
        assert!(coordinator.is_empty());
    }

    #[test]
    fn duplicate_attachment_yields_independent_entries() {
        let (mut coordinator, _host) = hosted();
        let component = probe();
        let first_id = coordinator.attach_component(component.clone());
        let second_id = coordinator.attach_component(component.clone());
        assert_ne!(first_id, second_id);

        coordinator.dispatch_create(None).expect("create succeeds");
        assert_eq!(
            component.borrow().calls,
            ["on_attach", "on_create", "on_attach", "on_create"],
        );

        let as_managed: ComponentRef = component.clone();
        coordinator
            .detach_component(&as_managed)
            .expect("teardown succeeds");
        assert_eq!(coordinator.len(), 1);
    }

    #[test]
    fn attach_host_twice_is_rejected() {
        let (mut coordinator, _host) = hosted();
        let other = Rc::new(RefCell::new(HostContext::new()));

        let error = coordinator
            .attach_host(other)
            .expect_err("second host is rejected");
        assert!(matches!(error, LifecycleError::HostAlreadyAttached));
    }

    #[test]
    fn dispatch_without_a_host_is_rejected() {
        let mut coordinator = LifecycleCoordinator::new();
        let id = coordinator.attach_component(probe());

        let error = coordinator
            .dispatch_create(None)
            .expect_err("no host to resolve against");
        assert!(matches!(error, LifecycleError::NoHostAttached));
        assert_eq!(coordinator.state_of(id), Some(LifecycleState::Unattached));
        assert_eq!(coordinator.current_target(), LifecycleState::Unattached);
    }

    #[test]
    fn dispatch_destroy_without_a_host_is_permitted() {
        let mut coordinator = LifecycleCoordinator::new();
        coordinator.attach_component(probe());
        coordinator
            .dispatch_destroy()
            .expect("teardown needs no host");
    }

    #[test]
    fn dispatch_destroy_releases_the_host_binding() {
        let (mut coordinator, _host) = hosted();
        coordinator.attach_component(probe());
        resume_all(&mut coordinator);

        coordinator.dispatch_destroy().expect("teardown succeeds");

        assert!(coordinator.host().is_none());
        let replacement = Rc::new(RefCell::new(HostContext::new()));
        coordinator
            .attach_host(replacement)
            .expect("a new host can bind after destroy");
    }

    #[test]
    fn late_attached_component_catches_up_on_the_next_drive() {
        let (mut coordinator, _host) = hosted();
        let early = probe();
        coordinator.attach_component(early.clone());
        resume_all(&mut coordinator);

        let late = probe();
        let late_id = coordinator.attach_component(late.clone());
        assert_eq!(coordinator.state_of(late_id), Some(LifecycleState::Unattached));

        // The next drive walks the early component down and the late one up
        // to the same target.
        coordinator.dispatch_pause().expect("pause succeeds");

        assert_eq!(coordinator.state_of(late_id), Some(LifecycleState::Started));
        assert_eq!(late.borrow().calls, ["on_attach", "on_create", "on_start"]);
        assert_eq!(early.borrow().calls.last(), Some(&"on_pause"));
    }

    #[test]
    fn saved_state_reaches_every_on_create() {
        let (mut coordinator, _host) = hosted();
        let component = probe();
        coordinator.attach_component(component.clone());

        let mut saved = SavedState::new();
        saved.put("restored", "scroll=42");
        coordinator
            .dispatch_create(Some(&saved))
            .expect("create succeeds");

        assert_eq!(component.borrow().restored.as_deref(), Some("scroll=42"));
    }

    #[test]
    fn plain_drives_pass_no_saved_state() {
        let (mut coordinator, _host) = hosted();
        let component = probe();
        coordinator.attach_component(component.clone());

        coordinator
            .drive_to(LifecycleState::Created)
            .expect("create succeeds");

        assert!(component.borrow().restored.is_none());
    }

    #[test]
    fn contract_violation_names_the_component() {
        let (mut coordinator, _host) = hosted();
        coordinator.attach_component(refusing("on_start"));
        coordinator.dispatch_create(None).expect("create succeeds");

        let error = coordinator
            .dispatch_start()
            .expect_err("refusing component fails the drive");
        let message = error.to_string();
        assert!(message.contains("Probe"));
        assert!(message.contains("on_start"));
    }
}
