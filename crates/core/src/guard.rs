//! Route guard decisions
//!
//! Guards are pure functions of the session so they can be checked without a browser;
//! the frontend turns a [`GuardDecision`] into markup or a navigation.

use crate::config::SessionConfig;
use crate::state::SessionState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not known yet; render nothing
    Suspend,
    /// Render the wrapped route
    Render,
    /// Replace the current entry with `to`; `from` is handed over as navigation state
    Redirect { to: String, from: Option<String> },
}

impl GuardDecision {
    fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            from: None,
        }
    }
}

/// Pages meant for anonymous visitors, such as the login page.
///
/// A signed-in user is sent back where they came from (`origin`), or to the default
/// landing route.
pub fn public_only(state: &SessionState, origin: Option<&str>) -> GuardDecision {
    if state.is_loading() {
        return GuardDecision::Suspend;
    }

    if state.is_authenticated() {
        let to = origin
            .filter(|path| {
                path.starts_with('/')
                    && !path.starts_with("//")
                    && *path != SessionConfig::LOGIN_ROUTE
            })
            .unwrap_or(SessionConfig::DEFAULT_ROUTE);
        return GuardDecision::redirect(to);
    }

    GuardDecision::Render
}

/// Pages that need a signed-in user with a finished profile.
///
/// Anonymous visitors go to the login page, remembering `current` so they can come
/// back; users with an incomplete profile go to profile setup.
pub fn require_session(state: &SessionState, current: &str) -> GuardDecision {
    if state.is_loading() {
        return GuardDecision::Suspend;
    }

    if !state.is_authenticated() {
        return GuardDecision::Redirect {
            to: SessionConfig::LOGIN_ROUTE.to_string(),
            from: Some(current.to_string()),
        };
    }

    if !state.is_profile_complete() {
        return GuardDecision::redirect(SessionConfig::SETUP_ROUTE);
    }

    GuardDecision::Render
}
