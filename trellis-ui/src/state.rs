//! Lifecycle states and the ordered walk between them.
//!
//! Managed components progress through a fixed linear sequence:
//! `Unattached → Created → Started → Resumed`. The coordinator never skips a
//! state in either direction; it crosses one adjacent boundary at a time
//! until the target state is reached, dispatching the callback that belongs
//! to each boundary as it goes.

use std::cmp::Ordering;

/// One state in the linear component lifecycle.
///
/// The variants are strictly ordered (`Unattached < Created < Started <
/// Resumed`) and the derived [`Ord`] carries that ordering, so host code can
/// compare states directly.
///
/// # Examples
///
/// ```
/// use trellis_ui::LifecycleState;
///
/// assert!(LifecycleState::Unattached < LifecycleState::Resumed);
/// assert_eq!(
///     LifecycleState::Unattached.step_toward(LifecycleState::Resumed),
///     Some(LifecycleState::Created),
/// );
/// assert_eq!(
///     LifecycleState::Started.step_toward(LifecycleState::Started),
///     None,
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LifecycleState {
    /// Not bound to any host; the component holds no lifecycle resources.
    #[default]
    Unattached,
    /// Attached to a host and created; the rendered view, if the component
    /// declares one, exists and is parented to its container.
    Created,
    /// Visible to the user but not in the foreground.
    Started,
    /// In the foreground and interactive.
    Resumed,
}

impl LifecycleState {
    /// Returns the adjacent state one step toward `target`, or `None` when
    /// already there.
    ///
    /// Walking with `step_toward` visits every intermediate state, which is
    /// what guarantees no lifecycle boundary is skipped on a multi-level
    /// transition.
    pub fn step_toward(self, target: LifecycleState) -> Option<LifecycleState> {
        use LifecycleState::*;

        let next = match self.cmp(&target) {
            Ordering::Equal => return None,
            Ordering::Less => match self {
                Unattached => Created,
                Created => Started,
                Started | Resumed => Resumed,
            },
            Ordering::Greater => match self {
                Resumed => Started,
                Started => Created,
                Created | Unattached => Unattached,
            },
        };
        Some(next)
    }
}
