//! Post editor

use super::input_value;
use crate::app::Route;
use crate::services::BlogApiService;
use crate::session::use_session;
use quill_core::PostDraft;
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(BlogCreatePage)]
pub fn blog_create_page() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let draft = use_state(PostDraft::default);
    let error_message = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_title = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            draft.set(PostDraft {
                title: input_value(&e),
                ..(*draft).clone()
            });
        })
    };

    let on_content = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            draft.set(PostDraft {
                content: input_value(&e),
                ..(*draft).clone()
            });
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let error_message = error_message.clone();
        let submitting = submitting.clone();
        let author = session.state().subject().map(str::to_string);
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(author) = author.as_deref() else {
                error_message.set(Some("You need to be signed in to publish.".to_string()));
                return;
            };
            let post = match draft.validate(author) {
                Ok(post) => post,
                Err(e) => {
                    error_message.set(Some(e.to_string()));
                    return;
                }
            };

            error_message.set(None);
            submitting.set(true);

            let error_message = error_message.clone();
            let submitting = submitting.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match BlogApiService::new().create_post(post).await {
                    Ok(created) => {
                        info!(id = created.id, "Post published");
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::BlogDetail { id: created.id });
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to publish post");
                        error_message.set(Some(e));
                        submitting.set(false);
                    }
                }
            });
        })
    };

    html! {
        <form class="bg-white rounded-lg shadow p-6 flex flex-col gap-4" onsubmit={on_submit}>
            <h1 class="text-2xl font-bold text-gray-900">{"New post"}</h1>
            <input
                type="text"
                class="w-full px-3 py-2 border border-gray-300 rounded-md"
                placeholder="Title"
                value={draft.title.clone()}
                oninput={on_title}
            />
            <textarea
                class="w-full px-3 py-2 border border-gray-300 rounded-md h-64"
                placeholder="Write something..."
                value={draft.content.clone()}
                oninput={on_content}
            />
            if let Some(message) = &*error_message {
                <p class="text-sm text-red-600">{message.clone()}</p>
            }
            <button
                type="submit"
                class="self-end px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white rounded-md disabled:bg-gray-300"
                disabled={*submitting}
            >
                { if *submitting { "Publishing..." } else { "Publish" } }
            </button>
        </form>
    }
}
