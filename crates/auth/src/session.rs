//! Session value derived from the profile query.

use std::collections::HashSet;

use crate::permissions::Permission;
use crate::user::User;

/// Authenticated iff a profile fetch returned a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            user: None,
            is_authenticated: false,
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
        }
    }

    /// Effective permissions; empty for an anonymous session.
    pub fn permissions(&self) -> HashSet<Permission> {
        match (&self.user, self.is_authenticated) {
            (Some(user), true) => user.effective_permissions().into_iter().collect(),
            _ => HashSet::new(),
        }
    }
}

/// Whether the session is known yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Profile fetch still in flight.
    Pending,
    Resolved(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Pending => None,
            SessionState::Resolved(session) => Some(session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some_and(|s| s.is_authenticated)
    }
}
