//! Session context and provider

use crate::client::{self, get_client};
use crate::storage::BrowserStorage;
use quill_core::{
    SessionAction, SessionObserver, SessionState, SessionStore, hydrate, persist, sign_out,
};
use std::rc::Rc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// The session store as a Yew reducer
#[derive(Clone, Debug, PartialEq)]
pub struct SessionModel(SessionStore<BrowserStorage>);

impl SessionModel {
    fn restore() -> Self {
        let observer: Rc<dyn SessionObserver> = Rc::new(log_change);
        Self(SessionStore::restore(BrowserStorage).with_observer(observer))
    }

    pub const fn state(&self) -> &SessionState {
        self.0.state()
    }
}

impl Reducible for SessionModel {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut store = self.0.clone();
        store.dispatch(action);
        Rc::new(Self(store))
    }
}

fn log_change(action: &SessionAction, state: &SessionState) {
    debug!(
        action = action.name(),
        loading = state.is_loading(),
        subject = state.subject().unwrap_or("-"),
        profile_complete = state.is_profile_complete(),
        "Session changed"
    );
}

/// Session context
pub type SessionContext = UseReducerHandle<SessionModel>;

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

/// Restores the persisted session and hydrates it from the backend on mount
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_reducer(SessionModel::restore);

    {
        let session = session.clone();
        use_effect_with((), move |_| {
            let cancel = CancellationToken::new();
            let token = cancel.clone();

            spawn_local(async move {
                client::refresh_if_expired().await;

                let backend = match get_client() {
                    Ok(backend) => backend,
                    Err(e) => {
                        error!(error = %e, "Backend client unavailable");
                        if !token.is_cancelled() {
                            session.dispatch(SessionAction::HydrationFailed);
                        }
                        return;
                    }
                };

                debug!(signed_in = backend.has_session(), "Hydrating session");
                let outcome = hydrate(&backend, &token, |action| session.dispatch(action)).await;
                debug!(?outcome, "Hydration finished");
            });

            move || cancel.cancel()
        });
    }

    html! {
        <ContextProvider<SessionContext> context={session}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found. Make sure to wrap your component with SessionProvider")
}

/// Callback that signs the user out on the backend and tears down the local session
#[hook]
pub fn use_sign_out() -> Callback<()> {
    let session = use_session();

    use_callback(session, |(), session| {
        let session = session.clone();
        spawn_local(async move {
            match get_client() {
                Ok(backend) => sign_out(&backend, |action| session.dispatch(action)).await,
                Err(e) => {
                    error!(error = %e, "Backend client unavailable; clearing local session");
                    session.dispatch(SessionAction::Clear);
                }
            }
            persist::forget(&BrowserStorage);
            client::clear_tokens();
        });
    })
}
