use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <section class="text-center py-16">
            <h1 class="text-3xl font-bold text-gray-900 mb-2">{"Page not found"}</h1>
            <Link<Route> to={Route::BlogList} classes="text-indigo-600">{"Back to the blog"}</Link<Route>>
        </section>
    }
}
