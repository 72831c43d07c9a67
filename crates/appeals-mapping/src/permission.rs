//! Permission and action gating
//!
//! The permission check itself is an injected collaborator
//! ([`PermissionEvaluator`]); nothing here holds a global permission registry.

use appeals_components::{ActionItem, Actions};
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Pure predicate over a session and a permission
pub trait PermissionEvaluator: Send + Sync {
    /// Permission names
    type Permission: Copy + Debug;

    /// Session the principal is read from
    type Session: ?Sized;

    /// Whether the session's principal holds `permission`
    fn user_has_permission(&self, permission: Self::Permission, session: &Self::Session) -> bool;
}

/// Sessions that carry their resolved capability set
pub trait HasCapabilities<P> {
    /// Granted permissions
    fn capabilities(&self) -> &BTreeSet<P>;
}

/// Evaluator that reads the capability set resolved onto the session
#[derive(Debug)]
pub struct SessionCapabilities<P, S: ?Sized> {
    _marker: std::marker::PhantomData<fn(P, &S)>,
}

impl<P, S: ?Sized> SessionCapabilities<P, S> {
    /// Create evaluator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<P, S: ?Sized> Default for SessionCapabilities<P, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, S> PermissionEvaluator for SessionCapabilities<P, S>
where
    P: Copy + Debug + Ord,
    S: HasCapabilities<P> + ?Sized,
{
    type Permission = P;
    type Session = S;

    #[inline]
    fn user_has_permission(&self, permission: P, session: &S) -> bool {
        session.capabilities().contains(&permission)
    }
}

/// The action, if the session holds `permission`
///
/// Callers pass results through [`gated_actions`] so absent actions never
/// reach a renderer.
#[must_use]
pub fn map_action_component<E>(
    evaluator: &E,
    permission: E::Permission,
    session: &E::Session,
    action: ActionItem,
) -> Option<ActionItem>
where
    E: PermissionEvaluator + ?Sized,
{
    if evaluator.user_has_permission(permission, session) {
        Some(action)
    } else {
        tracing::trace!(?permission, href = %action.href, "action withheld");
        None
    }
}

/// Collect gated actions, dropping the withheld ones
#[inline]
#[must_use]
pub fn gated_actions(actions: impl IntoIterator<Item = Option<ActionItem>>) -> Actions {
    Actions::from_optional(actions)
}

/// Editable when the permission is held and the domain gate is open
#[inline]
#[must_use]
pub fn editable_when<E>(
    evaluator: &E,
    permission: E::Permission,
    session: &E::Session,
    domain_gate: bool,
) -> bool
where
    E: PermissionEvaluator + ?Sized,
{
    domain_gate && evaluator.user_has_permission(permission, session)
}
