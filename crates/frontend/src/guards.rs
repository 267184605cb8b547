//! Route guard components

use crate::app::Route;
use crate::session::use_session;
use quill_core::{GuardDecision, public_only, require_session};
use yew::prelude::*;
use yew_router::prelude::*;

/// Navigation state telling the login page where the visitor was headed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectFrom(pub String);

/// Route for an absolute path; unknown paths land on the blog
pub fn route_for(path: &str) -> Route {
    match Route::recognize(path) {
        Some(Route::NotFound) | None => Route::BlogList,
        Some(route) => route,
    }
}

#[derive(Properties, PartialEq)]
pub struct ReplaceProps {
    pub to: Route,
    #[prop_or_default]
    pub from: Option<String>,
}

/// Replaces the current history entry once mounted
#[function_component(Replace)]
pub fn replace(props: &ReplaceProps) -> Html {
    let navigator = use_navigator();

    use_effect_with((props.to.clone(), props.from.clone()), move |(to, from)| {
        if let Some(navigator) = navigator {
            match from {
                Some(from) => navigator.replace_with_state(to, RedirectFrom(from.clone())),
                None => navigator.replace(to),
            }
        }
    });

    Html::default()
}

fn render(decision: GuardDecision, children: &Children) -> Html {
    match decision {
        GuardDecision::Suspend => Html::default(),
        GuardDecision::Render => html! { <>{ children.clone() }</> },
        GuardDecision::Redirect { to, from } => html! {
            <Replace to={route_for(&to)} {from} />
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    pub children: Children,
}

/// Renders its children only for anonymous visitors
#[function_component(PublicOnly)]
pub fn public_only_guard(props: &GuardProps) -> Html {
    let session = use_session();
    let location = use_location();
    let origin = location
        .as_ref()
        .and_then(|location| location.state::<RedirectFrom>())
        .map(|from| from.0.clone());

    render(public_only(session.state(), origin.as_deref()), &props.children)
}

/// Renders its children only for signed-in users with a complete profile
#[function_component(RequireSession)]
pub fn require_session_guard(props: &GuardProps) -> Html {
    let session = use_session();
    let location = use_location();
    let current = location
        .as_ref()
        .map(|location| location.path().to_string())
        .unwrap_or_default();

    render(require_session(session.state(), &current), &props.children)
}
