use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::navigation::{Navigator, Route};
use crate::permissions::Permission;
use crate::session::{Session, SessionState};

/// How a required permission list is matched against the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionMatch {
    /// Every required permission must be held.
    #[default]
    All,
    /// Holding any one required permission is enough.
    Any,
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// The session is not resolved yet; render nothing.
    Pending,
    Granted,
    Denied,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Page-level permission gate.
///
/// - No IO
/// - No panics
/// - Denial is silent: the only side effect is the optional redirect
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate {
    mode: PermissionMatch,
}

impl AccessGate {
    pub fn new(mode: PermissionMatch) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> PermissionMatch {
        self.mode
    }

    /// Pure policy check for a resolved session.
    pub fn authorize(&self, session: &Session, required: &[Permission]) -> Result<(), AccessError> {
        if !session.is_authenticated {
            return Err(AccessError::Unauthenticated);
        }

        let held = session.permissions();
        if held.iter().any(Permission::is_wildcard) || required.is_empty() {
            return Ok(());
        }

        match self.mode {
            PermissionMatch::All => match required.iter().find(|p| !held.contains(*p)) {
                Some(missing) => Err(AccessError::Forbidden(missing.to_string())),
                None => Ok(()),
            },
            PermissionMatch::Any => {
                if required.iter().any(|p| held.contains(p)) {
                    Ok(())
                } else {
                    Err(AccessError::Forbidden(
                        required
                            .iter()
                            .map(Permission::as_str)
                            .collect::<Vec<_>>()
                            .join("|"),
                    ))
                }
            }
        }
    }

    /// Decide without side effects.
    pub fn decide(&self, state: &SessionState, required: &[Permission]) -> Access {
        match state {
            SessionState::Pending => Access::Pending,
            SessionState::Resolved(session) => match self.authorize(session, required) {
                Ok(()) => Access::Granted,
                Err(_) => Access::Denied,
            },
        }
    }

    /// Decide and, on denial with `redirect_if_denied`, navigate home.
    pub fn check_access(
        &self,
        state: &SessionState,
        required: &[Permission],
        redirect_if_denied: bool,
        navigator: &dyn Navigator,
    ) -> Access {
        let access = self.decide(state, required);
        if access == Access::Denied {
            tracing::debug!(?required, redirect_if_denied, "access denied");
            if redirect_if_denied {
                navigator.navigate(Route::Home);
            }
        }
        access
    }

    /// Produce protected content only once access is granted.
    ///
    /// `children` is never invoked for a pending or denied session.
    pub fn render<T>(
        &self,
        state: &SessionState,
        required: &[Permission],
        redirect_if_denied: bool,
        navigator: &dyn Navigator,
        children: impl FnOnce() -> T,
    ) -> Option<T> {
        match self.check_access(state, required, redirect_if_denied, navigator) {
            Access::Granted => Some(children()),
            Access::Pending | Access::Denied => None,
        }
    }

    /// Explain why a check passes or fails (audit/debug output).
    pub fn explain(&self, session: &Session, required: &[Permission]) -> AccessExplanation {
        let held = session.permissions();
        let has_wildcard = held.iter().any(Permission::is_wildcard);

        let mut missing: Vec<String> = required
            .iter()
            .filter(|p| !held.contains(*p))
            .map(|p| p.to_string())
            .collect();
        if has_wildcard {
            missing.clear();
        }

        let mut effective: Vec<String> = held.iter().map(|p| p.to_string()).collect();
        effective.sort();

        let granted = self.authorize(session, required).is_ok();
        let reason = if !session.is_authenticated {
            "Session is not authenticated".to_string()
        } else if has_wildcard {
            "Session holds wildcard permission '*'".to_string()
        } else if granted {
            match self.mode {
                PermissionMatch::All => "Session holds every required permission".to_string(),
                PermissionMatch::Any => "Session holds at least one required permission".to_string(),
            }
        } else {
            format!("Session is missing {:?}", missing)
        };

        AccessExplanation {
            required: required.iter().map(|p| p.to_string()).collect(),
            mode: self.mode,
            granted,
            reason,
            effective_permissions: effective,
            missing,
        }
    }
}

/// Detailed explanation of an access decision.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub required: Vec<String>,
    pub mode: PermissionMatch,
    pub granted: bool,
    pub reason: String,
    pub effective_permissions: Vec<String>,
    /// Required permissions the session lacks (empty under wildcard).
    pub missing: Vec<String>,
}

impl AccessExplanation {
    pub fn missing_set(&self) -> HashSet<&str> {
        self.missing.iter().map(String::as_str).collect()
    }
}
