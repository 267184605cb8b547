//! Session state and the actions that mutate it

use quill_http::{Claims, Profile};
use tracing::{debug, warn};

/// Who is signed in and whether their profile is complete.
///
/// The profile is only ever held for the subject of the current claims: replacing or
/// clearing the claims drops a profile that no longer belongs to them in the same write.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    loading: bool,
    claims: Option<Claims>,
    profile: Option<Profile>,
}

/// Every way the session can change
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Hydration started
    BeginHydration,
    /// Hydration finished with a signed-in user
    Hydrated {
        claims: Claims,
        profile: Option<Profile>,
    },
    /// Hydration could not establish a session; fail closed
    HydrationFailed,
    /// Replace the claims after an explicit mutation elsewhere
    SetClaims(Option<Claims>),
    /// Replace the profile after an explicit mutation elsewhere
    SetProfile(Option<Profile>),
    /// Forget the user; the loading flag is left alone
    Clear,
}

impl SessionAction {
    /// Short name for logs
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BeginHydration => "begin_hydration",
            Self::Hydrated { .. } => "hydrated",
            Self::HydrationFailed => "hydration_failed",
            Self::SetClaims(_) => "set_claims",
            Self::SetProfile(_) => "set_profile",
            Self::Clear => "clear",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            loading: true, // Start loading until hydration has run
            claims: None,
            profile: None,
        }
    }
}

impl SessionState {
    /// A state restored from storage; still waiting for hydration
    pub fn restored(claims: Option<Claims>, profile: Option<Profile>) -> Self {
        let mut state = Self::default();
        state.replace(claims, profile);
        state
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub const fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub const fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    /// Subject of the current claims
    pub fn subject(&self) -> Option<&str> {
        self.claims.as_ref().map(|claims| claims.sub.as_str())
    }

    /// Whether the signed-in user has finished profile setup
    pub fn is_profile_complete(&self) -> bool {
        self.profile.as_ref().is_some_and(Profile::is_complete)
    }

    /// Apply an action in place
    pub fn apply(&mut self, action: SessionAction) {
        debug!(action = action.name(), "Applying session action");
        match action {
            SessionAction::BeginHydration => self.loading = true,
            SessionAction::Hydrated { claims, profile } => {
                self.replace(Some(claims), profile);
                self.loading = false;
            }
            SessionAction::HydrationFailed => {
                self.replace(None, None);
                self.loading = false;
            }
            SessionAction::SetClaims(claims) => self.set_claims(claims),
            SessionAction::SetProfile(profile) => self.set_profile(profile),
            SessionAction::Clear => self.replace(None, None),
        }
    }

    fn replace(&mut self, claims: Option<Claims>, profile: Option<Profile>) {
        self.claims = claims;
        self.profile = None;
        self.set_profile(profile);
    }

    fn set_claims(&mut self, claims: Option<Claims>) {
        let same_subject = match (&self.claims, &claims) {
            (Some(current), Some(next)) => current.sub == next.sub,
            _ => false,
        };
        if !same_subject {
            self.profile = None;
        }
        self.claims = claims;
    }

    fn set_profile(&mut self, profile: Option<Profile>) {
        let subject = self.claims.as_ref().map(|claims| claims.sub.as_str());
        match (profile, subject) {
            (None, _) => self.profile = None,
            (Some(profile), Some(subject)) if profile.id == subject => {
                self.profile = Some(profile);
            }
            (Some(profile), subject) => {
                warn!(
                    profile_id = %profile.id,
                    subject = subject.unwrap_or("<none>"),
                    "Ignoring profile that does not belong to the current session"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{claims, profile};

    fn signed_in(sub: &str, bio: Option<&str>) -> SessionState {
        let mut state = SessionState::default();
        state.apply(SessionAction::Hydrated {
            claims: claims(sub),
            profile: Some(profile(sub, bio)),
        });
        state
    }

    #[test]
    fn starts_loading_and_empty() {
        let state = SessionState::default();
        assert!(state.is_loading());
        assert!(state.claims().is_none());
        assert!(state.profile().is_none());
    }

    #[test]
    fn hydrated_sets_both_and_stops_loading() {
        let state = signed_in("u1", Some("hello"));
        assert!(!state.is_loading());
        assert_eq!(state.subject(), Some("u1"));
        assert!(state.is_profile_complete());
    }

    #[test]
    fn hydration_failure_clears_everything() {
        let mut state = signed_in("u1", Some("hello"));
        state.apply(SessionAction::BeginHydration);
        assert!(state.is_loading());

        state.apply(SessionAction::HydrationFailed);
        assert!(!state.is_loading());
        assert!(state.claims().is_none());
        assert!(state.profile().is_none());
    }

    #[test]
    fn claims_change_drops_foreign_profile() {
        let mut state = signed_in("u1", Some("hello"));

        state.apply(SessionAction::SetClaims(Some(claims("u2"))));
        assert_eq!(state.subject(), Some("u2"));
        assert!(state.profile().is_none());
    }

    #[test]
    fn same_subject_keeps_profile() {
        let mut state = signed_in("u1", Some("hello"));

        let mut refreshed = claims("u1");
        refreshed.email = Some("new@example.com".into());
        state.apply(SessionAction::SetClaims(Some(refreshed)));
        assert!(state.profile().is_some());
    }

    #[test]
    fn clearing_claims_drops_profile() {
        let mut state = signed_in("u1", Some("hello"));
        state.apply(SessionAction::SetClaims(None));
        assert!(state.profile().is_none());
    }

    #[test]
    fn profile_for_another_subject_is_ignored() {
        let mut state = signed_in("u1", None);
        state.apply(SessionAction::SetProfile(Some(profile("u2", Some("x")))));
        assert_eq!(state.profile().map(|p| p.id.as_str()), Some("u1"));
        assert!(!state.is_profile_complete());
    }

    #[test]
    fn profile_without_claims_is_ignored() {
        let mut state = SessionState::default();
        state.apply(SessionAction::SetProfile(Some(profile("u1", Some("x")))));
        assert!(state.profile().is_none());
    }

    #[test]
    fn clear_keeps_loading_flag() {
        let mut state = SessionState::default();
        state.apply(SessionAction::Hydrated {
            claims: claims("u1"),
            profile: None,
        });
        state.apply(SessionAction::BeginHydration);
        state.apply(SessionAction::Clear);
        assert!(state.is_loading());
        assert!(state.claims().is_none());
    }

    #[test]
    fn empty_bio_is_incomplete() {
        let state = signed_in("u1", Some(""));
        assert!(!state.is_profile_complete());
    }
}
