//! Comment Section Component
//!
//! Comment thread for one business or user: the new-comment form, top-level
//! comments in server order, each with its own replies subtree.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::comments::{self, CommentThread, ThreadCell};
use crate::components::{CommentForm, CommentItem, InlineError};
use crate::context::use_app_context;
use crate::models::Subject;
use crate::store::{use_page_store, viewer_logged_in};

impl ThreadCell for RwSignal<CommentThread> {
    fn with_thread<R>(&self, f: impl FnOnce(&mut CommentThread) -> R) -> Option<R> {
        self.try_update(f)
    }
}

#[component]
pub fn CommentSection(subject: Subject, allow_reply: bool) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_page_store();

    let thread = RwSignal::new(CommentThread::new(subject, false, allow_reply));

    // Reply controls follow the viewer's login state
    Effect::new(move |_| {
        let logged_in = viewer_logged_in(&store);
        thread.update(|t| t.set_viewer_logged_in(logged_in));
    });

    Effect::new(move |_| {
        let api = ctx.api.clone();
        spawn_local(async move {
            comments::reload(&api, &thread).await;
        });
    });

    let can_reply = move || thread.with(|t| t.can_reply());
    let error = Signal::derive(move || thread.with(|t| t.error().map(str::to_string)));
    let ids = move || thread.with(|t| t.nodes().iter().map(|n| n.comment.id.clone()).collect::<Vec<_>>());

    view! {
        <section class="comment-section" id="comment-section">
            <h3>"Comments"</h3>
            {move || if can_reply() {
                view! { <CommentForm thread=thread parent_id=None /> }.into_any()
            } else if allow_reply && thread.with(|t| t.is_loaded()) {
                view! { <p class="comment-login-hint">"Log in to leave a comment."</p> }.into_any()
            } else {
                view! { <span class="comment-form-placeholder"></span> }.into_any()
            }}
            <InlineError message=error />
            <p class="loading" hidden=move || !thread.with(|t| t.is_loading())>"Loading comments..."</p>
            <div class="comment-list">
                <For
                    each=ids
                    key=|id| id.clone()
                    children=move |id| view! { <CommentItem thread=thread id=id /> }
                />
            </div>
        </section>
    }
}
