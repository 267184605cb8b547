//! Page chrome: navigation bar and content frame

use crate::app::Route;
use crate::session::use_session;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let session = use_session();
    let state = session.state();

    let account = if state.is_loading() {
        Html::default()
    } else if let Some(claims) = state.claims() {
        let name = state
            .profile()
            .and_then(|profile| profile.display_name.clone())
            .or_else(|| claims.display_name().map(str::to_string))
            .or_else(|| claims.email.clone())
            .unwrap_or_else(|| "Profile".to_string());
        html! {
            <>
                <Link<Route> to={Route::BlogCreate} classes="text-sm text-gray-600 hover:text-gray-900">{"Write"}</Link<Route>>
                <Link<Route> to={Route::Profile} classes="text-sm font-medium text-indigo-600">{name}</Link<Route>>
            </>
        }
    } else {
        html! {
            <Link<Route> to={Route::Login} classes="text-sm font-medium text-indigo-600">{"Sign in"}</Link<Route>>
        }
    };

    html! {
        <div class="min-h-screen bg-gray-50">
            <header class="bg-white border-b border-gray-200">
                <nav class="max-w-3xl mx-auto px-4 h-14 flex items-center justify-between">
                    <Link<Route> to={Route::BlogList} classes="text-lg font-bold text-gray-900">{"Quill"}</Link<Route>>
                    <div class="flex items-center gap-4">{account}</div>
                </nav>
            </header>
            <main class="max-w-3xl mx-auto px-4 py-8">
                {props.children.clone()}
            </main>
        </div>
    }
}
