//! Permission model: actions, resource kinds, grants, and permission sets
//!
//! Grants are typed selector pairs rather than `resource:action` strings;
//! the string form only appears in audit messages and error payloads.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Action being performed on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Write,
    Update,
    Delete,
    Manage,
}

impl Action {
    /// All five actions, the expansion of an action wildcard
    pub const ALL: [Action; 5] = [
        Action::Read,
        Action::Write,
        Action::Update,
        Action::Delete,
        Action::Manage,
    ];
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Read => write!(f, "read"),
            Action::Write => write!(f, "write"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
            Action::Manage => write!(f, "manage"),
        }
    }
}

/// Kind of resource protected by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Appointment,
    Salon,
    Staff,
    Customer,
    Billing,
    Service,
    Analytics,
}

impl ResourceKind {
    /// All protected resource kinds
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Appointment,
        ResourceKind::Salon,
        ResourceKind::Staff,
        ResourceKind::Customer,
        ResourceKind::Billing,
        ResourceKind::Service,
        ResourceKind::Analytics,
    ];
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Appointment => write!(f, "appointment"),
            ResourceKind::Salon => write!(f, "salon"),
            ResourceKind::Staff => write!(f, "staff"),
            ResourceKind::Customer => write!(f, "customer"),
            ResourceKind::Billing => write!(f, "billing"),
            ResourceKind::Service => write!(f, "service"),
            ResourceKind::Analytics => write!(f, "analytics"),
        }
    }
}

/// Resource side of a grant: a concrete kind or the wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceSelector {
    Is(ResourceKind),
    Any,
}

/// Action side of a grant: a concrete action or the wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSelector {
    Is(Action),
    Any,
}

/// A single catalog entry: what a role may do to which resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    pub resource: ResourceSelector,
    pub action: ActionSelector,
}

impl Grant {
    /// Grant of a single action on a single resource kind
    pub const fn of(kind: ResourceKind, action: Action) -> Self {
        Self {
            resource: ResourceSelector::Is(kind),
            action: ActionSelector::Is(action),
        }
    }

    /// Grant of all actions on a single resource kind
    pub const fn all_actions(kind: ResourceKind) -> Self {
        Self {
            resource: ResourceSelector::Is(kind),
            action: ActionSelector::Any,
        }
    }

    /// The universal grant; collapses to the universal-access sentinel
    pub const fn universal() -> Self {
        Self {
            resource: ResourceSelector::Any,
            action: ActionSelector::Any,
        }
    }

    /// Whether this grant covers the given kind/action pair
    pub fn implies(&self, kind: ResourceKind, action: Action) -> bool {
        let resource_ok = match self.resource {
            ResourceSelector::Is(k) => k == kind,
            ResourceSelector::Any => true,
        };
        let action_ok = match self.action {
            ActionSelector::Is(a) => a == action,
            ActionSelector::Any => true,
        };
        resource_ok && action_ok
    }
}

/// Render the `resource:action` key used in audit entries and denial errors
pub fn permission_key(kind: ResourceKind, action: Action) -> String {
    format!("{}:{}", kind, action)
}

/// Eagerly expanded permission set for one role
///
/// `universal` is the sentinel produced by a wildcard-resource grant and
/// implicitly satisfies every check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    universal: bool,
    entries: HashSet<(ResourceKind, Action)>,
}

impl PermissionSet {
    /// The empty permission set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Expand a list of grants into a concrete permission set
    pub fn from_grants(grants: &[Grant]) -> Self {
        let mut set = Self::default();
        for grant in grants {
            match (grant.resource, grant.action) {
                (ResourceSelector::Any, _) => set.universal = true,
                (ResourceSelector::Is(kind), ActionSelector::Any) => {
                    for action in Action::ALL {
                        set.entries.insert((kind, action));
                    }
                }
                (ResourceSelector::Is(kind), ActionSelector::Is(action)) => {
                    set.entries.insert((kind, action));
                }
            }
        }
        set
    }

    /// Whether the set allows the given kind/action pair
    pub fn allows(&self, kind: ResourceKind, action: Action) -> bool {
        self.universal || self.entries.contains(&(kind, action))
    }

    /// Whether the set carries the universal-access sentinel
    pub fn is_universal(&self) -> bool {
        self.universal
    }

    /// Number of concrete entries (the sentinel is not counted)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has neither entries nor the sentinel
    pub fn is_empty(&self) -> bool {
        !self.universal && self.entries.is_empty()
    }
}
