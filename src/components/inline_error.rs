//! Inline Error Component
//!
//! Shows a failure next to the region it belongs to instead of breaking the page.

use leptos::prelude::*;

#[component]
pub fn InlineError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <p class="inline-error" role="alert" hidden=move || message.with(|m| m.is_none())>
            {move || message.get().unwrap_or_default()}
        </p>
    }
}
