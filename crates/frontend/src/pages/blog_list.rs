//! Post index

use crate::app::Route;
use crate::components::LoadingSpinner;
use crate::services::BlogApiService;
use quill_http::Post;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(BlogListPage)]
pub fn blog_list_page() -> Html {
    let posts = use_state(|| None::<Result<Vec<Post>, String>>);

    {
        let posts = posts.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = BlogApiService::new().list_posts().await;
                if let Err(e) = &result {
                    warn!(error = %e, "Failed to load posts");
                }
                posts.set(Some(result));
            });
        });
    }

    let body = match &*posts {
        None => html! { <LoadingSpinner label="Loading posts..." /> },
        Some(Err(e)) => html! {
            <p class="text-red-600">{format!("Could not load posts: {e}")}</p>
        },
        Some(Ok(posts)) if posts.is_empty() => html! {
            <p class="text-gray-500">{"Nothing has been published yet."}</p>
        },
        Some(Ok(posts)) => html! {
            <ul class="divide-y divide-gray-200">
                { for posts.iter().map(|post| html! {
                    <li key={post.id.to_string()} class="py-4">
                        <Link<Route> to={Route::BlogDetail { id: post.id }} classes="text-lg font-semibold text-gray-900 hover:text-indigo-600">
                            {post.title.clone()}
                        </Link<Route>>
                        <p class="text-xs text-gray-500 mt-1">{post.created_at.format("%B %-d, %Y").to_string()}</p>
                    </li>
                }) }
            </ul>
        },
    };

    html! {
        <section>
            <h1 class="text-3xl font-bold text-gray-900 mb-6">{"Latest posts"}</h1>
            {body}
        </section>
    }
}
