//! Loading indicator

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub label: Option<AttrValue>,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class="flex flex-col items-center py-12" role="status">
            <div class="w-8 h-8 border-4 border-gray-200 border-t-indigo-500 rounded-full animate-spin"></div>
            if let Some(label) = &props.label {
                <p class="mt-3 text-sm text-gray-500">{label}</p>
            }
        </div>
    }
}
