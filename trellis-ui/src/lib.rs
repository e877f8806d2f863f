//! trellis is a host-driven lifecycle coordination library for UI
//! components, focused on explicit state transitions and contract
//! enforcement.
//!
//! # Overview
//!
//! A host — a window, an activity, anything that owns a piece of screen —
//! creates one [`LifecycleCoordinator`] and forwards its coarse lifecycle
//! events to it. The coordinator drives every managed [`Component`] through
//! the linear state machine
//!
//! ```text
//! Unattached → Created → Started → Resumed
//! ```
//!
//! one adjacent boundary at a time, in both directions, and verifies that
//! every boundary callback explicitly acknowledged running its part of the
//! contract.
//!
//! # Components
//!
//! Implement [`Component`] and override the boundaries you care about;
//! every callback has an acknowledging default body.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use trellis_ui::{
//!     Ack, Component, HostContext, LifecycleCoordinator, LifecycleState, host_ref,
//! };
//!
//! struct Banner {
//!     shown: bool,
//! }
//!
//! impl Component for Banner {
//!     fn on_resume(&mut self) -> Ack {
//!         self.shown = true;
//!         Ack::Acknowledged
//!     }
//!
//!     fn on_pause(&mut self) -> Ack {
//!         self.shown = false;
//!         Ack::Acknowledged
//!     }
//! }
//!
//! let mut lifecycle = LifecycleCoordinator::new();
//! lifecycle
//!     .attach_host(host_ref(HostContext::new()))
//!     .expect("no host bound yet");
//!
//! let banner = Rc::new(RefCell::new(Banner { shown: false }));
//! let id = lifecycle.attach_component(banner.clone());
//!
//! lifecycle.dispatch_create(None).expect("banner acknowledges");
//! lifecycle.dispatch_start().expect("banner acknowledges");
//! lifecycle.dispatch_resume().expect("banner acknowledges");
//!
//! assert_eq!(lifecycle.state_of(id), Some(LifecycleState::Resumed));
//! assert!(banner.borrow().shown);
//! ```
//!
//! # Views and containers
//!
//! A component that renders something declares the container its view
//! belongs in via [`Component::container_target`] and produces the view in
//! [`Component::build_view`]. The coordinator resolves the container
//! through the bound [`Host`] at the create boundary, parents the view
//! there, and removes it again when the component regresses below
//! `Created`. What a view *is* stays opaque to this crate.
//!
//! # Threading
//!
//! The coordinator is deliberately single-threaded: every operation takes
//! `&mut self`, callbacks run synchronously on the calling thread, and
//! there is no internal locking. Drive it from one control thread — for
//! most hosts, the event loop that delivers the window events being
//! forwarded.
#![deny(missing_docs, clippy::unwrap_used)]

mod component;
mod coordinator;
mod host;
mod saved_state;
mod state;
mod view;

pub use crate::{
    component::{Ack, Component, ComponentId, ComponentRef, component_ref},
    coordinator::{LifecycleCoordinator, LifecycleError},
    host::{Host, HostContext, HostRef, WeakHostRef, host_ref},
    saved_state::SavedState,
    state::LifecycleState,
    view::{Container, ContainerId, ContainerRef, View, ViewRef, container_ref, view_ref},
};
