//! Startup hydration and sign-out

use crate::backend::SessionBackend;
use crate::state::SessionAction;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How a hydration attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationOutcome {
    /// A user is signed in
    Authenticated { profile_complete: bool },
    /// The provider did not confirm a session; state was cleared
    Anonymous,
    /// Claims were fine but the profile lookup failed; state was cleared
    Invalidated,
    /// The token fired; nothing was committed after the cancellation point
    Cancelled,
}

/// Rebuild the session from the provider.
///
/// Claims are always resolved before the profile is requested, and the loading flag
/// stays set until one of the terminal actions is committed. Any failure clears claims
/// and profile together. `commit` is skipped once `cancel` has fired.
pub async fn hydrate<B, F>(
    backend: &B,
    cancel: &CancellationToken,
    mut commit: F,
) -> HydrationOutcome
where
    B: SessionBackend + ?Sized,
    F: FnMut(SessionAction),
{
    if cancel.is_cancelled() {
        return HydrationOutcome::Cancelled;
    }
    commit(SessionAction::BeginHydration);

    let claims = backend.get_claims().await;
    if cancel.is_cancelled() {
        debug!("Hydration cancelled after claims fetch");
        return HydrationOutcome::Cancelled;
    }

    let claims = match claims {
        Ok(claims) => claims,
        Err(e) => {
            if e.is_auth_expired() {
                debug!(error = %e, "No authenticated session");
            } else {
                warn!(error = %e, "Failed to fetch session claims");
            }
            commit(SessionAction::HydrationFailed);
            return HydrationOutcome::Anonymous;
        }
    };

    let profile = backend.select_profile_by_id(&claims.sub).await;
    if cancel.is_cancelled() {
        debug!("Hydration cancelled after profile fetch");
        return HydrationOutcome::Cancelled;
    }

    match profile {
        Ok(profile) => {
            let profile_complete = profile.as_ref().is_some_and(|p| p.is_complete());
            info!(subject = %claims.sub, profile_complete, "Session hydrated");
            commit(SessionAction::Hydrated { claims, profile });
            HydrationOutcome::Authenticated { profile_complete }
        }
        Err(e) => {
            warn!(subject = %claims.sub, error = %e, "Profile lookup failed; clearing session");
            commit(SessionAction::HydrationFailed);
            HydrationOutcome::Invalidated
        }
    }
}

/// End the session. A provider failure is logged; local state is cleared regardless.
pub async fn sign_out<B, F>(backend: &B, mut commit: F)
where
    B: SessionBackend + ?Sized,
    F: FnMut(SessionAction),
{
    if let Err(e) = backend.sign_out().await {
        warn!(error = %e, "Provider sign-out failed; clearing local session anyway");
    }
    commit(SessionAction::Clear);
    info!("Signed out");
}
