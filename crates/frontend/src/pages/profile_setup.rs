//! Profile setup: the landing page after social login

use super::input_value;
use crate::app::Route;
use crate::client::get_client;
use crate::components::LoadingSpinner;
use crate::session::use_session;
use quill_core::{FormField, SetupPhase, load_setup, submit_setup};
use tokio_util::sync::CancellationToken;
use tracing::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const COMPLETE_MESSAGE: &str = "Your profile is complete.";

#[function_component(ProfileSetupPage)]
pub fn profile_setup_page() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let phase = use_state(|| SetupPhase::Loading);

    // Load claims and profile once; drop the result if the page goes away first
    {
        let phase = phase.clone();
        use_effect_with((), move |_| {
            let cancel = CancellationToken::new();
            let token = cancel.clone();

            spawn_local(async move {
                let result = match get_client() {
                    Ok(backend) => load_setup(&backend, &token).await,
                    Err(e) => Err(e.into()),
                };
                if token.is_cancelled() {
                    return;
                }
                if let Some(next) = SetupPhase::loaded(result) {
                    phase.set(next);
                }
            });

            move || cancel.cancel()
        });
    }

    // Complete profiles leave for the blog
    {
        let navigator = navigator.clone();
        use_effect_with((*phase).clone(), move |phase| {
            if matches!(phase, SetupPhase::RedirectedComplete)
                && let Some(navigator) = navigator
            {
                navigator.replace(&Route::BlogList);
            }
        });
    }

    let on_input = |field: FormField| {
        let phase = phase.clone();
        Callback::from(move |e: InputEvent| {
            phase.set(phase.edit(field, input_value(&e)));
        })
    };

    let on_submit = {
        let phase = phase.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let next = phase.begin_submit();
            let SetupPhase::Submitting { claims, form } = next.clone() else {
                phase.set(next);
                return;
            };
            phase.set(next.clone());

            let phase = phase.clone();
            let session = session.clone();
            spawn_local(async move {
                let result = match get_client() {
                    Ok(backend) => submit_setup(&backend, &claims.sub, &form).await,
                    Err(e) => Err(e.into()),
                };
                match &result {
                    Ok(profile) => {
                        if let Some(action) = next.completion(profile.clone()) {
                            session.dispatch(action);
                        }
                        gloo::dialogs::alert(COMPLETE_MESSAGE);
                    }
                    Err(e) => error!(error = %e, "Profile update failed"),
                }
                phase.set(next.submitted(&result));
            });
        })
    };

    match &*phase {
        SetupPhase::Loading | SetupPhase::RedirectedComplete => html! {
            <LoadingSpinner label="Checking your profile..." />
        },
        SetupPhase::FatalError(message) => html! {
            <div class="max-w-md mx-auto bg-red-50 border border-red-200 rounded-lg p-6">
                <h1 class="text-lg font-semibold text-red-800 mb-2">{"We could not load your profile"}</h1>
                <p class="text-sm text-red-700">{message.clone()}</p>
            </div>
        },
        SetupPhase::FormReady { form, .. } | SetupPhase::Submitting { form, .. } => {
            let submitting = matches!(&*phase, SetupPhase::Submitting { .. });
            html! {
                <form class="max-w-md mx-auto bg-white rounded-lg shadow p-6 flex flex-col gap-4" onsubmit={on_submit}>
                    <h1 class="text-2xl font-bold text-gray-900">{"Finish your profile"}</h1>
                    <input
                        type="text"
                        class="w-full px-3 py-2 border border-gray-300 rounded-md"
                        placeholder="Name"
                        value={form.name.clone()}
                        oninput={on_input(FormField::Name)}
                    />
                    <input
                        type="email"
                        class="w-full px-3 py-2 border border-gray-300 rounded-md"
                        placeholder="Email"
                        value={form.email.clone()}
                        oninput={on_input(FormField::Email)}
                    />
                    <textarea
                        class="w-full px-3 py-2 border border-gray-300 rounded-md h-32"
                        placeholder="A few words about you"
                        value={form.bio.clone()}
                        oninput={on_input(FormField::Bio)}
                    />
                    if let Some(message) = error_of(&phase) {
                        <p class="text-sm text-red-600">{message}</p>
                    }
                    <button
                        type="submit"
                        class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white rounded-md disabled:bg-gray-300"
                        disabled={submitting}
                    >
                        { if submitting { "Saving..." } else { "Save profile" } }
                    </button>
                </form>
            }
        }
    }
}

fn error_of(phase: &SetupPhase) -> Option<String> {
    match phase {
        SetupPhase::FormReady { error, .. } => error.clone(),
        _ => None,
    }
}
