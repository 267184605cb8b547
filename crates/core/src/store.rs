//! Session store: state plus write-through persistence and an optional observer

use crate::persist;
use crate::state::{SessionAction, SessionState};
use crate::storage::StateStorage;
use quill_http::{Claims, Profile};
use std::fmt;
use std::rc::Rc;
use tracing::warn;

/// Receives every applied action together with the resulting state
pub trait SessionObserver {
    fn on_change(&self, action: &SessionAction, state: &SessionState);
}

impl<F> SessionObserver for F
where
    F: Fn(&SessionAction, &SessionState),
{
    fn on_change(&self, action: &SessionAction, state: &SessionState) {
        self(action, state);
    }
}

/// Single source of truth for the current user.
///
/// Created once at startup with [`SessionStore::restore`] and handed to whoever needs
/// it; every write goes through [`SessionStore::dispatch`], which persists the new
/// state before notifying the observer.
#[derive(Clone)]
pub struct SessionStore<S> {
    state: SessionState,
    storage: S,
    observer: Option<Rc<dyn SessionObserver>>,
}

impl<S: StateStorage> SessionStore<S> {
    /// Rebuild the store from storage. The result is loading until hydration runs.
    pub fn restore(storage: S) -> Self {
        let state = persist::restore(&storage);
        Self {
            state,
            storage,
            observer: None,
        }
    }

    /// Attach an observer notified after every dispatched action
    #[must_use]
    pub fn with_observer(mut self, observer: Rc<dyn SessionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply an action, persist the result and notify the observer
    pub fn dispatch(&mut self, action: SessionAction) {
        let seen = self.observer.as_ref().map(|_| action.clone());

        self.state.apply(action);

        if let Err(e) = persist::save(&self.storage, &self.state) {
            warn!(error = %e, "Failed to persist session");
        }

        if let (Some(observer), Some(action)) = (&self.observer, seen) {
            observer.on_change(&action, &self.state);
        }
    }

    pub fn set_claims(&mut self, claims: Option<Claims>) {
        self.dispatch(SessionAction::SetClaims(claims));
    }

    pub fn set_profile(&mut self, profile: Option<Profile>) {
        self.dispatch(SessionAction::SetProfile(profile));
    }

    pub fn clear(&mut self) {
        self.dispatch(SessionAction::Clear);
    }
}

impl<S> PartialEq for SessionStore<S> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<S> fmt::Debug for SessionStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .field("observed", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
