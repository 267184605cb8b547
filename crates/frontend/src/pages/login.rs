//! Social login

use crate::client::get_client;
use quill_core::SessionConfig;
use quill_http::OAuthProvider;
use tracing::{error, info};
use yew::prelude::*;

/// Where the provider should send the browser back to
fn redirect_target() -> Option<String> {
    let origin = web_sys::window()?.location().origin().ok()?;
    Some(format!("{origin}{}", SessionConfig::SETUP_ROUTE))
}

fn start_login(provider: OAuthProvider) -> Result<(), String> {
    let redirect_to = redirect_target().ok_or("Browser location is unavailable")?;
    let url = get_client()
        .and_then(|client| client.authorize_url(provider, &redirect_to))
        .map_err(|e| e.to_string())?;

    info!(provider = provider.as_str(), "Starting social login");
    web_sys::window()
        .ok_or("Browser window is unavailable")?
        .location()
        .set_href(url.as_str())
        .map_err(|e| format!("{e:?}"))
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let error_message = use_state(|| None::<String>);

    let buttons = OAuthProvider::ALL.iter().map(|&provider| {
        let onclick = {
            let error_message = error_message.clone();
            Callback::from(move |_: MouseEvent| {
                if let Err(e) = start_login(provider) {
                    error!(provider = provider.as_str(), error = %e, "Could not start social login");
                    error_message.set(Some(e));
                }
            })
        };
        html! {
            <button
                key={provider.as_str()}
                class="w-full px-4 py-2 border border-gray-300 rounded-md bg-white hover:bg-gray-50 text-gray-800 font-medium"
                {onclick}
            >
                {format!("Continue with {}", provider.label())}
            </button>
        }
    });

    html! {
        <div class="max-w-sm mx-auto bg-white rounded-lg shadow p-6">
            <h1 class="text-2xl font-bold text-gray-900 mb-6 text-center">{"Sign in"}</h1>
            <div class="flex flex-col gap-3">
                { for buttons }
            </div>
            if let Some(message) = &*error_message {
                <p class="mt-4 text-sm text-red-600">{message.clone()}</p>
            }
        </div>
    }
}
