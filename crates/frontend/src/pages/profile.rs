use crate::session::{use_session, use_sign_out};
use yew::prelude::*;

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let session = use_session();
    let sign_out = use_sign_out();
    let state = session.state();

    let on_sign_out = Callback::from(move |_: MouseEvent| sign_out.emit(()));

    let field = |label: &'static str, value: Option<String>| {
        html! {
            <div class="py-3">
                <dt class="text-sm text-gray-500">{label}</dt>
                <dd class="text-gray-900">{value.unwrap_or_else(|| "-".to_string())}</dd>
            </div>
        }
    };

    let profile = state.profile();
    html! {
        <section class="bg-white rounded-lg shadow p-6">
            <h1 class="text-2xl font-bold text-gray-900 mb-4">{"Your profile"}</h1>
            <dl class="divide-y divide-gray-200">
                { field("Name", profile.and_then(|p| p.display_name.clone())) }
                { field("Email", profile.and_then(|p| p.email.clone())) }
                { field("Bio", profile.and_then(|p| p.bio.clone())) }
            </dl>
            <button
                class="mt-6 px-4 py-2 bg-gray-200 hover:bg-gray-300 text-gray-700 rounded-md"
                onclick={on_sign_out}
            >
                {"Sign out"}
            </button>
        </section>
    }
}
