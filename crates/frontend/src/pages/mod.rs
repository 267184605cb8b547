//! One component per route

mod blog_create;
mod blog_detail;
mod blog_list;
mod login;
mod not_found;
mod profile;
mod profile_setup;

pub use blog_create::BlogCreatePage;
pub use blog_detail::BlogDetailPage;
pub use blog_list::BlogListPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
pub use profile_setup::ProfileSetupPage;

use wasm_bindgen::JsCast;
use yew::InputEvent;

/// Value of the input or textarea that fired `event`
fn input_value(event: &InputEvent) -> String {
    let Some(target) = event.target() else {
        return String::new();
    };
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return input.value();
    }
    target
        .dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(web_sys::HtmlTextAreaElement::value)
        .unwrap_or_default()
}
