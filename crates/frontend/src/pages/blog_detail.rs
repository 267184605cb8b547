use crate::app::Route;
use crate::components::LoadingSpinner;
use crate::services::BlogApiService;
use quill_http::Post;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BlogDetailProps {
    pub id: i64,
}

#[function_component(BlogDetailPage)]
pub fn blog_detail_page(props: &BlogDetailProps) -> Html {
    let post = use_state(|| None::<Result<Option<Post>, String>>);

    {
        let post = post.clone();
        use_effect_with(props.id, move |&id| {
            post.set(None);
            spawn_local(async move {
                let result = BlogApiService::new().get_post(id).await;
                if let Err(e) = &result {
                    warn!(id, error = %e, "Failed to load post");
                }
                post.set(Some(result));
            });
        });
    }

    let body = match &*post {
        None => html! { <LoadingSpinner /> },
        Some(Err(e)) => html! { <p class="text-red-600">{format!("Could not load post: {e}")}</p> },
        Some(Ok(None)) => html! { <p class="text-gray-500">{"This post could not be found."}</p> },
        Some(Ok(Some(post))) => html! {
            <article>
                <h1 class="text-3xl font-bold text-gray-900">{post.title.clone()}</h1>
                <p class="text-xs text-gray-500 mt-2 mb-6">{post.created_at.format("%B %-d, %Y").to_string()}</p>
                <div class="whitespace-pre-wrap text-gray-800 leading-relaxed">{post.content.clone()}</div>
            </article>
        },
    };

    html! {
        <section>
            <Link<Route> to={Route::BlogList} classes="text-sm text-indigo-600">{"← All posts"}</Link<Route>>
            <div class="mt-4">{body}</div>
        </section>
    }
}
