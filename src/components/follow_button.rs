//! Follow Button Component
//!
//! Follow/Unfollow toggle for one business.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::InlineError;
use crate::context::use_app_context;
use crate::error::{ApiError, FailurePolicy};
use crate::follow::{self, FollowState};

fn inline(err: &ApiError) -> String {
    FailurePolicy::widget_message("follow status", err)
}

#[component]
pub fn FollowButton(#[prop(into)] business_id: String) -> impl IntoView {
    let ctx = use_app_context();

    let (state, set_state) = signal::<Option<FollowState>>(None);
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    // Re-derived from the server on every load
    let load_id = business_id.clone();
    let api = ctx.api.clone();
    Effect::new(move |_| {
        let api = api.clone();
        let id = load_id.clone();
        spawn_local(async move {
            match follow::load(&api, &id).await {
                Ok(s) => set_state.set(Some(s)),
                Err(e) => set_error.set(Some(inline(&e))),
            }
        });
    });

    let on_click = move |_| {
        // Ignore clicks until the previous request is acknowledged
        if busy.get_untracked() {
            return;
        }
        let Some(current) = state.get_untracked() else { return };
        set_busy.set(true);
        let api = ctx.api.clone();
        let id = business_id.clone();
        spawn_local(async move {
            match follow::toggle(&api, &id, current).await {
                Ok(next) => {
                    set_state.set(Some(next));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(inline(&e))),
            }
            set_busy.set(false);
        });
    };

    view! {
        <button
            id="follow-button"
            class=move || state.get().map(FollowState::class).unwrap_or("btn btn-light float-right")
            hidden=move || state.get().is_none()
            disabled=move || busy.get()
            on:click=on_click
        >
            {move || state.get().map(FollowState::label).unwrap_or_default()}
        </button>
        <InlineError message=error />
    }
}
